use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::LegendsError;

/// A combatant's choice for one round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Attack,
    Defend,
    Special,
    /// Healing potion, targets the actor
    Item,
}

impl Action {
    /// Fixed enumeration order, also the order the policy samples in
    pub const ALL: [Action; 4] = [Action::Attack, Action::Defend, Action::Special, Action::Item];

    pub fn index(self) -> usize {
        match self {
            Action::Attack => 0,
            Action::Defend => 1,
            Action::Special => 2,
            Action::Item => 3,
        }
    }

    /// Attack and Special hit the opponent and are subject to elements
    pub fn is_offensive(self) -> bool {
        matches!(self, Action::Attack | Action::Special)
    }

    pub fn targets_self(self) -> bool {
        matches!(self, Action::Item)
    }

    pub fn name(self) -> &'static str {
        match self {
            Action::Attack => "attack",
            Action::Defend => "defend",
            Action::Special => "special",
            Action::Item => "item",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = LegendsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "attack" | "a" => Ok(Action::Attack),
            "defend" | "d" => Ok(Action::Defend),
            "special" | "s" => Ok(Action::Special),
            "item" | "heal" | "i" => Ok(Action::Item),
            other => Err(LegendsError::UnknownAction(other.to_string())),
        }
    }
}
