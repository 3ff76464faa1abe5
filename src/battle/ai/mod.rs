//! Opponent AI for battle decision-making
//!
//! Architecture: Trait + Data hybrid
//! - BattleAi trait lets hosts swap in other controllers
//! - AiConfig holds TOML-loadable base weight tables per archetype
//! - DecisionContext is the read-only view a decision is made from

mod archetype;
mod policy;
mod quips;
mod weights;

pub use archetype::{archetype_from_stats, classify, Archetype};
pub use policy::{DecisionContext, Difficulty, OpponentPolicy};
pub use quips::{battle_quip, QuipKind};
pub use weights::ActionWeights;

use crate::battle::state::{BattleState, Side};
use crate::combat::Action;
use crate::core::rng::RandomSource;

/// Trait for anything that can pick a side's action
pub trait BattleAi {
    /// Choose the next action for `side`
    fn choose(&self, state: &BattleState, side: Side, rng: &mut dyn RandomSource) -> Action;

    /// Display name for logs
    fn name(&self) -> String;
}
