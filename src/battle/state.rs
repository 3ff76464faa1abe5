//! Battle state: the two combatant slots, the round counter, and the action log

use serde::{Deserialize, Serialize};

use crate::combat::constants::{EFFECT_CRITICAL, EFFECT_SPECIAL_CRITICAL};
use crate::combat::{Action, Fighter};
use crate::core::error::{LegendsError, Result};
use crate::core::types::{BattleId, CombatantId, Timestamp};

/// One of the two sides of a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::A, Side::B];

    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Battle lifecycle
///
/// Waiting and Cancelled belong to matchmaking; the resolver only ever
/// sees Active and moves it to Completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BattleStatus {
    Waiting,
    #[default]
    Active,
    Completed,
    Cancelled,
}

/// A fighter in a battle together with its live health
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantSlot {
    pub fighter: Fighter,
    pub current_health: u32,
    pub owner: CombatantId,
}

impl CombatantSlot {
    /// Enter the battle at full health
    pub fn new(fighter: Fighter, owner: CombatantId) -> Self {
        let current_health = fighter.max_health;
        Self {
            fighter,
            current_health,
            owner,
        }
    }

    pub fn health_fraction(&self) -> f64 {
        if self.fighter.max_health == 0 {
            return 0.0;
        }
        self.current_health as f64 / self.fighter.max_health as f64
    }

    pub fn is_knocked_out(&self) -> bool {
        self.current_health == 0
    }
}

/// One resolved action, appended to the battle log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub side: Side,
    pub action: Action,
    /// Positive: damage dealt. Negative: health restored to the actor. Zero: no effect.
    pub damage: i32,
    pub effect: String,
    pub timestamp: Timestamp,
}

impl ActionRecord {
    /// Whether the action landed a critical hit
    pub fn is_critical(&self) -> bool {
        self.effect.contains(EFFECT_CRITICAL) || self.effect.contains(EFFECT_SPECIAL_CRITICAL)
    }
}

/// Full record of a battle in progress or finished
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleState {
    pub id: BattleId,
    pub side_a: CombatantSlot,
    pub side_b: CombatantSlot,
    /// Completed rounds
    pub turn_number: u32,
    pub status: BattleStatus,
    pub actions: Vec<ActionRecord>,
    pub winner: Option<Side>,
    pub created_at: Timestamp,
    /// When the next pair of actions is due. Not enforced here.
    pub turn_deadline: Timestamp,
}

impl BattleState {
    pub fn new(
        id: BattleId,
        side_a: CombatantSlot,
        side_b: CombatantSlot,
        created_at: Timestamp,
        turn_deadline: Timestamp,
    ) -> Result<Self> {
        side_a.fighter.validate()?;
        side_b.fighter.validate()?;

        let state = Self {
            id,
            side_a,
            side_b,
            turn_number: 0,
            status: BattleStatus::Active,
            actions: Vec::new(),
            winner: None,
            created_at,
            turn_deadline,
        };
        state.check_invariants()?;
        Ok(state)
    }

    pub fn slot(&self, side: Side) -> &CombatantSlot {
        match side {
            Side::A => &self.side_a,
            Side::B => &self.side_b,
        }
    }

    pub(crate) fn slot_mut(&mut self, side: Side) -> &mut CombatantSlot {
        match side {
            Side::A => &mut self.side_a,
            Side::B => &mut self.side_b,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == BattleStatus::Active
    }

    pub fn is_completed(&self) -> bool {
        self.status == BattleStatus::Completed
    }

    /// The loser of a completed battle
    pub fn loser(&self) -> Option<Side> {
        self.winner.map(Side::opponent)
    }

    /// The last `count` actions taken by `side`, oldest first
    pub fn recent_actions(&self, side: Side, count: usize) -> Vec<Action> {
        let mut recent: Vec<Action> = self
            .actions
            .iter()
            .rev()
            .filter(|record| record.side == side)
            .take(count)
            .map(|record| record.action)
            .collect();
        recent.reverse();
        recent
    }

    /// Check the invariants the resolver relies on
    ///
    /// Health within `[0, max]`, winner set iff completed, and no knocked-out
    /// combatant in an active battle.
    pub fn check_invariants(&self) -> Result<()> {
        for side in Side::BOTH {
            let slot = self.slot(side);
            if slot.current_health > slot.fighter.max_health {
                return Err(LegendsError::HealthOutOfRange {
                    fighter: slot.fighter.name.clone(),
                    current: slot.current_health,
                    max: slot.fighter.max_health,
                });
            }
            if self.is_active() && slot.is_knocked_out() {
                return Err(LegendsError::KnockedOutWhileActive(side));
            }
        }

        if self.winner.is_some() != self.is_completed() {
            return Err(LegendsError::InconsistentState(format!(
                "winner {:?} with status {:?}",
                self.winner, self.status
            )));
        }

        Ok(())
    }
}
