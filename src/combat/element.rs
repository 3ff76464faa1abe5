//! Elements and the cyclic advantage graph
//!
//! Fire > Earth > Air > Water > Fire. Each element beats exactly one other,
//! is beaten by exactly one, and is neutral against itself and the element
//! across the cycle.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::combat::constants::{NOT_EFFECTIVE_MULTIPLIER, SUPER_EFFECTIVE_MULTIPLIER};
use crate::core::error::LegendsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Water,
    Earth,
    Air,
}

impl Element {
    pub const ALL: [Element; 4] = [Element::Fire, Element::Water, Element::Earth, Element::Air];

    /// The element this one beats
    pub fn beats(self) -> Element {
        match self {
            Element::Fire => Element::Earth,
            Element::Earth => Element::Air,
            Element::Air => Element::Water,
            Element::Water => Element::Fire,
        }
    }

    /// The element that beats this one
    pub fn beaten_by(self) -> Element {
        match self {
            Element::Fire => Element::Water,
            Element::Water => Element::Air,
            Element::Air => Element::Earth,
            Element::Earth => Element::Fire,
        }
    }

    pub fn matchup(self, target: Element) -> ElementalMatchup {
        if self.beats() == target {
            ElementalMatchup::Advantage
        } else if self.beaten_by() == target {
            ElementalMatchup::Disadvantage
        } else {
            ElementalMatchup::Neutral
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Element::Fire => "fire",
            Element::Water => "water",
            Element::Earth => "earth",
            Element::Air => "air",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Element {
    type Err = LegendsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fire" => Ok(Element::Fire),
            "water" => Ok(Element::Water),
            "earth" => Ok(Element::Earth),
            "air" => Ok(Element::Air),
            other => Err(LegendsError::UnknownElement(other.to_string())),
        }
    }
}

/// How an attacker's element fares against a target's element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementalMatchup {
    Advantage,
    Neutral,
    Disadvantage,
}

impl ElementalMatchup {
    pub fn multiplier(self) -> f64 {
        match self {
            ElementalMatchup::Advantage => SUPER_EFFECTIVE_MULTIPLIER,
            ElementalMatchup::Neutral => 1.0,
            ElementalMatchup::Disadvantage => NOT_EFFECTIVE_MULTIPLIER,
        }
    }
}
