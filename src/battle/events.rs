//! Structured battle events
//!
//! The resolver emits one event per notable step of a round. Anything that
//! wants to react (chat overlays, sound cues, analytics) implements
//! `BattleObserver` instead of reaching into the resolver.

use serde::{Deserialize, Serialize};

use crate::battle::state::Side;
use crate::combat::Action;

/// Why a battle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// The loser's health reached 0
    Knockout,
    /// Round cap reached, decided on health percentage
    RoundLimit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleEventType {
    TurnOrderDecided {
        first: Side,
    },
    ActionResolved {
        side: Side,
        action: Action,
        amount: i32,
        critical: bool,
        resulting_health: u32,
    },
    CombatantDefeated {
        side: Side,
    },
    BattleEnded {
        winner: Side,
        reason: EndReason,
    },
}

/// Log entry for battle events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleEvent {
    pub round: u32,
    pub event_type: BattleEventType,
    pub description: String,
}

/// Receives events as the resolver produces them
pub trait BattleObserver {
    fn on_event(&mut self, event: &BattleEvent);
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl BattleObserver for NullObserver {
    fn on_event(&mut self, _event: &BattleEvent) {}
}

/// Collects events in order
#[derive(Debug, Clone, Default)]
pub struct BattleEventLog {
    pub events: Vec<BattleEvent>,
}

impl BattleEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event_type: BattleEventType, description: String, round: u32) {
        self.events.push(BattleEvent {
            round,
            event_type,
            description,
        });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl BattleObserver for BattleEventLog {
    fn on_event(&mut self, event: &BattleEvent) {
        self.events.push(event.clone());
    }
}

/// Fans events out to several observers
#[derive(Default)]
pub struct ObserverList<'a> {
    observers: Vec<&'a mut dyn BattleObserver>,
}

impl<'a> ObserverList<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: &'a mut dyn BattleObserver) {
        self.observers.push(observer);
    }
}

impl BattleObserver for ObserverList<'_> {
    fn on_event(&mut self, event: &BattleEvent) {
        for observer in self.observers.iter_mut() {
            observer.on_event(event);
        }
    }
}
