pub mod action;
pub mod constants;
pub mod element;
pub mod fighter;
pub mod outcome;

pub use action::Action;
pub use element::{Element, ElementalMatchup};
pub use fighter::{Fighter, FighterStats};
pub use outcome::{compute_outcome, ActionOutcome};
