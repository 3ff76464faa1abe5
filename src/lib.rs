//! Chain Legends - elemental fighter battle core
//!
//! Turn resolution for two-sided battles and the opponent policy that plays
//! the non-human side. Wallets, contracts and rendering live elsewhere; they
//! hand in fighters and actions and read back state, events and settlement.

pub mod battle;
pub mod combat;
pub mod core;
