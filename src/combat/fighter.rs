//! Fighter profiles
//!
//! Fighters are read-only inputs to the resolver. Stats are fixed at mint
//! time from element and level; battles only ever change a combatant's
//! current health.

use serde::{Deserialize, Serialize};

use crate::combat::element::Element;
use crate::core::error::{LegendsError, Result};
use crate::core::types::FighterId;

const BASE_HEALTH: i32 = 100;
const BASE_ATTACK: i32 = 20;
const BASE_DEFENSE: i32 = 15;
const BASE_SPEED: i32 = 10;
const LEVEL_SCALING: f64 = 0.1;

/// Experience needed per level
pub const EXPERIENCE_PER_LEVEL: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fighter {
    pub id: FighterId,
    pub name: String,
    pub element: Element,
    pub level: u32,
    pub experience: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub max_health: u32,
}

/// Stat block produced by `Fighter::generate_stats`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FighterStats {
    pub health: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
}

/// Flat bonuses (health, attack, defense, speed) per element
fn element_bonus(element: Element) -> (i32, i32, i32, i32) {
    match element {
        Element::Fire => (0, 5, 0, 3),
        Element::Water => (10, 0, 3, 0),
        Element::Earth => (15, 0, 5, -2),
        Element::Air => (0, 2, -2, 8),
    }
}

impl Fighter {
    /// Mint a fresh level-appropriate fighter with zero experience
    pub fn generate(id: FighterId, name: impl Into<String>, element: Element, level: u32) -> Self {
        let level = level.max(1);
        let stats = Self::generate_stats(element, level);
        Self {
            id,
            name: name.into(),
            element,
            level,
            experience: 0,
            attack: stats.attack,
            defense: stats.defense,
            speed: stats.speed,
            max_health: stats.health,
        }
    }

    /// Base stats plus element bonus, scaled by 10% per level above 1
    pub fn generate_stats(element: Element, level: u32) -> FighterStats {
        let (health, attack, defense, speed) = element_bonus(element);
        let multiplier = 1.0 + (level.max(1) - 1) as f64 * LEVEL_SCALING;
        let scale = |base: i32, bonus: i32| ((base + bonus) as f64 * multiplier).floor() as u32;

        FighterStats {
            health: scale(BASE_HEALTH, health),
            attack: scale(BASE_ATTACK, attack),
            defense: scale(BASE_DEFENSE, defense),
            speed: scale(BASE_SPEED, speed),
        }
    }

    /// Level implied by the fighter's experience total
    pub fn level_for_experience(experience: u32) -> u32 {
        experience / EXPERIENCE_PER_LEVEL + 1
    }

    /// Reject profiles the resolver cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.level == 0 {
            return Err(LegendsError::InvalidFighter(format!(
                "{} has level 0",
                self.name
            )));
        }
        if self.max_health == 0 || self.attack == 0 || self.defense == 0 || self.speed == 0 {
            return Err(LegendsError::InvalidFighter(format!(
                "{} has a zero stat",
                self.name
            )));
        }
        Ok(())
    }
}
