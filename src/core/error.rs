use thiserror::Error;

use crate::battle::state::{BattleStatus, Side};

#[derive(Error, Debug)]
pub enum LegendsError {
    #[error("Battle is not active (status: {0:?})")]
    BattleNotActive(BattleStatus),

    #[error("Battle is not completed (status: {0:?})")]
    BattleNotCompleted(BattleStatus),

    #[error("Health out of range for {fighter}: {current} not in [0, {max}]")]
    HealthOutOfRange {
        fighter: String,
        current: u32,
        max: u32,
    },

    #[error("Active battle has a knocked-out combatant on side {0:?}")]
    KnockedOutWhileActive(Side),

    #[error("Inconsistent battle state: {0}")]
    InconsistentState(String),

    #[error("Invalid fighter: {0}")]
    InvalidFighter(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Unknown element: {0}")]
    UnknownElement(String),

    #[error("Unknown difficulty: {0}")]
    UnknownDifficulty(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, LegendsError>;
