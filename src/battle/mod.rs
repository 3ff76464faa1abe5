//! Battle layer: state, round resolution, events, and the opponent AI

pub mod ai;
pub mod events;
pub mod resolver;
pub mod rewards;
pub mod state;
pub mod transcript;

pub use events::{BattleEvent, BattleEventLog, BattleEventType, BattleObserver, EndReason, NullObserver};
pub use resolver::{advance_round, Resolver};
pub use rewards::{experience_gained, should_level_up};
pub use state::{ActionRecord, BattleState, BattleStatus, CombatantSlot, Side};
pub use transcript::{narrate, transcript_hash, Settlement, TranscriptHash};
