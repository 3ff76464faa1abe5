//! Battle transcripts
//!
//! Narration for display, a content hash of the action log for on-chain
//! settlement, and the settlement record itself.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::battle::state::{ActionRecord, BattleState, BattleStatus, Side};
use crate::core::error::{LegendsError, Result};
use crate::core::types::{BattleId, FighterId};

/// Human-readable log of a battle, one line per action
pub fn narrate(state: &BattleState) -> Vec<String> {
    let mut lines = Vec::with_capacity(state.actions.len() + 2);
    lines.push(format!(
        "Battle begins! {} vs {}",
        state.side_a.fighter.name, state.side_b.fighter.name
    ));

    for record in &state.actions {
        let actor = &state.slot(record.side).fighter.name;
        let action = record.action.name().to_uppercase();
        let line = if record.damage > 0 {
            format!(
                "{actor} uses {action} for {} damage! {}",
                record.damage, record.effect
            )
        } else if record.damage < 0 {
            format!(
                "{actor} uses {action} and heals for {} HP! {}",
                -record.damage, record.effect
            )
        } else {
            format!("{actor} uses {action}! {}", record.effect)
        };
        lines.push(line.trim_end().to_string());
    }

    if let Some(winner) = state.winner {
        lines.push(format!("{} wins the battle!", state.slot(winner).fighter.name));
    }

    lines
}

/// 32-byte content hash of an action log, shaped like a `bytes32`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TranscriptHash(pub [u8; 32]);

impl TranscriptHash {
    pub fn to_hex(&self) -> String {
        let mut hex = String::with_capacity(66);
        hex.push_str("0x");
        for byte in self.0 {
            hex.push_str(&format!("{byte:02x}"));
        }
        hex
    }
}

impl fmt::Display for TranscriptHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// SHA-256 of the canonical JSON encoding of the action log
pub fn transcript_hash(actions: &[ActionRecord]) -> Result<TranscriptHash> {
    let encoded = serde_json::to_vec(actions)?;
    let digest = Sha256::digest(&encoded);
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest);
    Ok(TranscriptHash(bytes))
}

/// Everything the arena contract needs to settle a finished battle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub battle_id: BattleId,
    pub winner: Side,
    pub winner_fighter: FighterId,
    pub loser_fighter: FighterId,
    pub loser_level: u32,
    pub turns: u32,
    pub battle_data_hash: TranscriptHash,
}

impl Settlement {
    pub fn from_state(state: &BattleState) -> Result<Self> {
        let winner = match (state.status, state.winner) {
            (BattleStatus::Completed, Some(winner)) => winner,
            (status, _) => return Err(LegendsError::BattleNotCompleted(status)),
        };
        let loser = state.slot(winner.opponent());

        Ok(Self {
            battle_id: state.id,
            winner,
            winner_fighter: state.slot(winner).fighter.id.clone(),
            loser_fighter: loser.fighter.id.clone(),
            loser_level: loser.fighter.level,
            turns: state.turn_number,
            battle_data_hash: transcript_hash(&state.actions)?,
        })
    }
}
