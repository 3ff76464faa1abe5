pub mod config;
pub mod error;
pub mod rng;
pub mod types;

pub use config::{config, set_config, AiConfig, BattleConfig, ResolverConfig, WeightTable};
pub use error::{LegendsError, Result};
pub use rng::{RandomSource, ScriptedRolls};
pub use types::{BattleId, Clock, CombatantId, FighterId, FixedClock, SystemClock, Timestamp};
