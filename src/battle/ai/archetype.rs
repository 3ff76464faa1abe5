//! Behaviour archetypes
//!
//! An archetype picks the base weight table. Medium and Hard read it from
//! the stat spread and fall back to an element bias; Easy flips a 70/30 coin.

use serde::{Deserialize, Serialize};

use crate::battle::ai::Difficulty;
use crate::combat::{Element, Fighter};
use crate::core::rng::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    Aggressive,
    Defensive,
    Balanced,
    Tactical,
}

impl Archetype {
    pub const ALL: [Archetype; 4] = [
        Archetype::Aggressive,
        Archetype::Defensive,
        Archetype::Balanced,
        Archetype::Tactical,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Archetype::Aggressive => "aggressive",
            Archetype::Defensive => "defensive",
            Archetype::Balanced => "balanced",
            Archetype::Tactical => "tactical",
        }
    }
}

/// Easy opponents are aggressive this often
const EASY_AGGRESSIVE_CHANCE: f64 = 0.7;

/// Stats that clearly point at one archetype, if any
pub fn archetype_from_stats(fighter: &Fighter) -> Option<Archetype> {
    let attack = fighter.attack;
    let defense = fighter.defense;
    let speed = fighter.speed;

    if attack > defense + 5 {
        return Some(if attack > speed {
            Archetype::Aggressive
        } else {
            Archetype::Tactical
        });
    }
    if defense > attack + 3 {
        return Some(Archetype::Defensive);
    }
    if speed as f64 > (attack + defense) as f64 / 2.0 {
        return Some(Archetype::Tactical);
    }
    None
}

/// Element flavour used when the stats are inconclusive
fn archetype_from_element<R: RandomSource + ?Sized>(element: Element, rng: &mut R) -> Archetype {
    let (chance, likely, otherwise) = match element {
        Element::Fire => (0.6, Archetype::Aggressive, Archetype::Tactical),
        Element::Water => (0.6, Archetype::Balanced, Archetype::Defensive),
        Element::Earth => (0.7, Archetype::Defensive, Archetype::Balanced),
        Element::Air => (0.6, Archetype::Tactical, Archetype::Aggressive),
    };
    if rng.chance(chance) {
        likely
    } else {
        otherwise
    }
}

/// Pick the archetype for this decision
///
/// Draws one roll on Easy, one roll when the element decides, none otherwise.
pub fn classify<R: RandomSource + ?Sized>(
    fighter: &Fighter,
    difficulty: Difficulty,
    rng: &mut R,
) -> Archetype {
    if difficulty == Difficulty::Easy {
        return if rng.chance(EASY_AGGRESSIVE_CHANCE) {
            Archetype::Aggressive
        } else {
            Archetype::Balanced
        };
    }

    archetype_from_stats(fighter).unwrap_or_else(|| archetype_from_element(fighter.element, rng))
}
