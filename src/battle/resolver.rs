//! Round resolution
//!
//! Each round: order by jittered speed -> first action -> second action ->
//! round counter and deadline -> end conditions.
//!
//! Both chosen actions are always resolved into the log. The first side
//! knocked to 0 during a round loses, whatever the second action does.

use tracing::{debug, info};

use crate::battle::ai::BattleAi;
use crate::battle::events::{BattleEvent, BattleEventType, BattleObserver, EndReason, NullObserver};
use crate::battle::state::{ActionRecord, BattleState, BattleStatus, CombatantSlot, Side};
use crate::combat::{compute_outcome, Action, ActionOutcome};
use crate::core::config::{config, ResolverConfig};
use crate::core::error::{LegendsError, Result};
use crate::core::rng::RandomSource;
use crate::core::types::{BattleId, Clock, SystemClock, Timestamp};

/// Advances battles one round at a time
#[derive(Debug, Clone, Default)]
pub struct Resolver<C: Clock = SystemClock> {
    config: ResolverConfig,
    clock: C,
}

impl Resolver<SystemClock> {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            config,
            clock: SystemClock,
        }
    }
}

impl<C: Clock> Resolver<C> {
    pub fn with_clock(config: ResolverConfig, clock: C) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Open a new active battle between two full-health combatants
    pub fn start_battle(&self, side_a: CombatantSlot, side_b: CombatantSlot) -> Result<BattleState> {
        let now = self.clock.now_millis();
        BattleState::new(
            BattleId::new(),
            side_a,
            side_b,
            now,
            self.deadline_from(now),
        )
    }

    fn deadline_from(&self, now: Timestamp) -> Timestamp {
        now.saturating_add(self.config.turn_time_limit_ms)
    }

    /// Resolve one round and return the resulting state
    ///
    /// Rejects completed battles and states that break the health invariants.
    /// The input state is never modified.
    pub fn advance_round<R: RandomSource + ?Sized>(
        &self,
        state: &BattleState,
        action_a: Action,
        action_b: Action,
        rng: &mut R,
        observer: &mut dyn BattleObserver,
    ) -> Result<BattleState> {
        if !state.is_active() {
            return Err(LegendsError::BattleNotActive(state.status));
        }
        state.check_invariants()?;

        let now = self.clock.now_millis();
        let mut next = state.clone();
        next.turn_number = state.turn_number.checked_add(1).ok_or_else(|| {
            LegendsError::InconsistentState(format!("round counter overflow at {}", state.turn_number))
        })?;
        next.turn_deadline = self.deadline_from(now);
        let round = next.turn_number;

        let first = self.first_to_act(state, rng);
        emit(
            observer,
            round,
            BattleEventType::TurnOrderDecided { first },
            format!("{:?} acts first", first),
        );

        let mut first_down: Option<Side> = None;
        for side in [first, first.opponent()] {
            let action = match side {
                Side::A => action_a,
                Side::B => action_b,
            };
            let outcome = apply_action(&mut next, side, action, rng, now)?;

            emit(
                observer,
                round,
                BattleEventType::ActionResolved {
                    side,
                    action,
                    amount: outcome.amount,
                    critical: outcome.critical,
                    resulting_health: outcome.resulting_health,
                },
                format!(
                    "{} uses {} ({}) {}",
                    next.slot(side).fighter.name,
                    action,
                    outcome.amount,
                    outcome.effect
                ),
            );

            let target = side.opponent();
            if first_down.is_none() && action.is_offensive() && next.slot(target).is_knocked_out() {
                first_down = Some(target);
                emit(
                    observer,
                    round,
                    BattleEventType::CombatantDefeated { side: target },
                    format!("{} is knocked out", next.slot(target).fighter.name),
                );
            }
        }

        if let Some((winner, reason)) = self.decide(&next, first_down) {
            next.status = BattleStatus::Completed;
            next.winner = Some(winner);
            info!(
                battle = ?next.id,
                ?winner,
                ?reason,
                rounds = next.turn_number,
                "Battle completed"
            );
            emit(
                observer,
                round,
                BattleEventType::BattleEnded { winner, reason },
                format!("{} wins the battle!", next.slot(winner).fighter.name),
            );
        }

        Ok(next)
    }

    /// Let two controllers play a battle out to completion
    ///
    /// Terminates: every round either finishes the battle or moves it one
    /// round closer to the cap.
    pub fn play_out(
        &self,
        state: &BattleState,
        controller_a: &dyn BattleAi,
        controller_b: &dyn BattleAi,
        rng: &mut dyn RandomSource,
        observer: &mut dyn BattleObserver,
    ) -> Result<BattleState> {
        let mut current = state.clone();
        while current.is_active() {
            let action_a = controller_a.choose(&current, Side::A, rng);
            let action_b = controller_b.choose(&current, Side::B, rng);
            current = self.advance_round(&current, action_a, action_b, rng, observer)?;
        }
        Ok(current)
    }

    /// Higher jittered speed acts first; side A wins ties
    fn first_to_act<R: RandomSource + ?Sized>(&self, state: &BattleState, rng: &mut R) -> Side {
        let speed_a = state.side_a.fighter.speed as f64 + rng.next_range(self.config.speed_jitter);
        let speed_b = state.side_b.fighter.speed as f64 + rng.next_range(self.config.speed_jitter);
        debug!(speed_a, speed_b, "Turn order rolled");
        if speed_a >= speed_b {
            Side::A
        } else {
            Side::B
        }
    }

    /// End conditions: knockout first, then the round cap on health percentage
    fn decide(&self, state: &BattleState, first_down: Option<Side>) -> Option<(Side, EndReason)> {
        if let Some(down) = first_down {
            return Some((down.opponent(), EndReason::Knockout));
        }
        if state.side_a.is_knocked_out() {
            return Some((Side::B, EndReason::Knockout));
        }
        if state.side_b.is_knocked_out() {
            return Some((Side::A, EndReason::Knockout));
        }

        if state.turn_number >= self.config.max_rounds {
            let a = &state.side_a;
            let b = &state.side_b;
            // a.cur / a.max >= b.cur / b.max without floating point
            let a_share = a.current_health as u64 * b.fighter.max_health as u64;
            let b_share = b.current_health as u64 * a.fighter.max_health as u64;
            let winner = if a_share >= b_share { Side::A } else { Side::B };
            return Some((winner, EndReason::RoundLimit));
        }

        None
    }
}

/// Resolve one side's action against the working state and log it
fn apply_action<R: RandomSource + ?Sized>(
    state: &mut BattleState,
    side: Side,
    action: Action,
    rng: &mut R,
    now: Timestamp,
) -> Result<ActionOutcome> {
    let actor = state.slot(side);
    let target = if action.targets_self() {
        actor
    } else {
        state.slot(side.opponent())
    };

    let outcome = compute_outcome(
        &actor.fighter,
        &target.fighter,
        action,
        actor.current_health,
        target.current_health,
        rng,
    )?;

    if outcome.is_heal() {
        state.slot_mut(side).current_health = outcome.resulting_health;
    } else if action.is_offensive() {
        state.slot_mut(side.opponent()).current_health = outcome.resulting_health;
    }

    debug!(
        ?side,
        %action,
        amount = outcome.amount,
        critical = outcome.critical,
        effect = %outcome.effect,
        "Action resolved"
    );

    state.actions.push(ActionRecord {
        side,
        action,
        damage: outcome.amount,
        effect: outcome.effect.clone(),
        timestamp: now,
    });

    Ok(outcome)
}

fn emit(observer: &mut dyn BattleObserver, round: u32, event_type: BattleEventType, description: String) {
    observer.on_event(&BattleEvent {
        round,
        event_type,
        description,
    });
}

/// Advance with the global config's tunables, the system clock, and no observers
pub fn advance_round<R: RandomSource + ?Sized>(
    state: &BattleState,
    action_a: Action,
    action_b: Action,
    rng: &mut R,
) -> Result<BattleState> {
    Resolver::new(config().resolver.clone()).advance_round(
        state,
        action_a,
        action_b,
        rng,
        &mut NullObserver,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::events::BattleEventLog;
    use crate::combat::{Element, Fighter};
    use crate::core::rng::ScriptedRolls;
    use crate::core::types::{CombatantId, FighterId, FixedClock};

    const NOW: Timestamp = 1_000_000;

    fn fighter(name: &str, element: Element, attack: u32, defense: u32, speed: u32) -> Fighter {
        Fighter {
            id: FighterId::new(name),
            name: name.to_string(),
            element,
            level: 1,
            experience: 0,
            attack,
            defense,
            speed,
            max_health: 100,
        }
    }

    fn resolver() -> Resolver<FixedClock> {
        Resolver::with_clock(ResolverConfig::default(), FixedClock(NOW))
    }

    fn battle(a: Fighter, b: Fighter) -> BattleState {
        resolver()
            .start_battle(
                CombatantSlot::new(a, CombatantId::new("0xA")),
                CombatantSlot::new(b, CombatantId::new("0xB")),
            )
            .expect("valid battle")
    }

    fn fire_vs_water() -> BattleState {
        battle(
            fighter("Ember", Element::Fire, 25, 15, 13),
            fighter("Tide", Element::Water, 20, 18, 10),
        )
    }

    #[test]
    fn test_round_appends_two_records_and_advances_counter() {
        let state = fire_vs_water();
        let mut rolls = ScriptedRolls::constant(0.99);

        let next = resolver()
            .advance_round(&state, Action::Attack, Action::Attack, &mut rolls, &mut NullObserver)
            .unwrap();

        assert_eq!(next.turn_number, 1);
        assert_eq!(next.actions.len(), 2);
        assert_eq!(next.turn_deadline, NOW + 10_000);
        // Input untouched
        assert_eq!(state.turn_number, 0);
        assert!(state.actions.is_empty());
    }

    #[test]
    fn test_speed_tie_goes_to_side_a() {
        let state = battle(
            fighter("Left", Element::Fire, 20, 15, 10),
            fighter("Right", Element::Fire, 20, 15, 10),
        );
        let mut rolls = ScriptedRolls::constant(0.5);

        let next = resolver()
            .advance_round(&state, Action::Defend, Action::Defend, &mut rolls, &mut NullObserver)
            .unwrap();

        assert_eq!(next.actions[0].side, Side::A);
        assert_eq!(next.actions[1].side, Side::B);
    }

    #[test]
    fn test_faster_jitter_acts_first() {
        let state = fire_vs_water();
        // A: 13 + 0.0, B: 10 + 9.0
        let mut rolls = ScriptedRolls::new(vec![0.0, 0.9, 0.99]);

        let next = resolver()
            .advance_round(&state, Action::Defend, Action::Defend, &mut rolls, &mut NullObserver)
            .unwrap();

        assert_eq!(next.actions[0].side, Side::B);
    }

    #[test]
    fn test_attack_damage_applied_to_opponent() {
        let state = fire_vs_water();
        let mut rolls = ScriptedRolls::constant(0.99);

        let next = resolver()
            .advance_round(&state, Action::Attack, Action::Defend, &mut rolls, &mut NullObserver)
            .unwrap();

        assert_eq!(next.side_b.current_health, 88);
        assert_eq!(next.side_a.current_health, 100);
        let record = next.actions.iter().find(|r| r.side == Side::A).unwrap();
        assert_eq!(record.damage, 12);
        assert_eq!(record.timestamp, NOW);
    }

    #[test]
    fn test_item_records_negative_damage() {
        let mut state = fire_vs_water();
        state.side_a.current_health = 40;
        let mut rolls = ScriptedRolls::constant(0.99);

        let next = resolver()
            .advance_round(&state, Action::Item, Action::Defend, &mut rolls, &mut NullObserver)
            .unwrap();

        assert_eq!(next.side_a.current_health, 65);
        let record = next.actions.iter().find(|r| r.side == Side::A).unwrap();
        assert_eq!(record.damage, -25);
    }

    #[test]
    fn test_defend_has_no_lasting_mitigation() {
        // Defend is cosmetic: the next round's attack lands in full
        let state = fire_vs_water();
        let mut rolls = ScriptedRolls::constant(0.99);
        let resolver = resolver();

        let after_defend = resolver
            .advance_round(&state, Action::Defend, Action::Defend, &mut rolls, &mut NullObserver)
            .unwrap();
        let after_attack = resolver
            .advance_round(&after_defend, Action::Attack, Action::Defend, &mut rolls, &mut NullObserver)
            .unwrap();

        assert_eq!(after_attack.side_b.current_health, 88);
    }

    #[test]
    fn test_knockout_by_first_actor_decides_winner() {
        let mut state = fire_vs_water();
        state.side_b.current_health = 10;
        state.side_a.current_health = 5;
        // A acts first (tie), no crits
        let mut rolls = ScriptedRolls::constant(0.99);
        let mut log = BattleEventLog::new();

        let next = resolver()
            .advance_round(&state, Action::Attack, Action::Attack, &mut rolls, &mut log)
            .unwrap();

        assert_eq!(next.side_b.current_health, 0);
        // B's attack is still resolved into the log
        assert_eq!(next.actions.len(), 2);
        assert_eq!(next.side_a.current_health, 0);
        assert_eq!(next.status, BattleStatus::Completed);
        assert_eq!(next.winner, Some(Side::A));
        assert!(log.events.iter().any(|e| matches!(
            e.event_type,
            BattleEventType::BattleEnded {
                winner: Side::A,
                reason: EndReason::Knockout
            }
        )));
    }

    #[test]
    fn test_round_cap_decided_on_health_percentage() {
        let mut state = fire_vs_water();
        state.turn_number = 19;
        state.side_a.current_health = 40;
        state.side_b.current_health = 60;
        let mut rolls = ScriptedRolls::constant(0.99);

        let next = resolver()
            .advance_round(&state, Action::Defend, Action::Defend, &mut rolls, &mut NullObserver)
            .unwrap();

        assert_eq!(next.turn_number, 20);
        assert_eq!(next.status, BattleStatus::Completed);
        assert_eq!(next.winner, Some(Side::B));
    }

    #[test]
    fn test_round_cap_tie_goes_to_side_a() {
        let mut state = fire_vs_water();
        state.turn_number = 19;
        state.side_a.current_health = 50;
        state.side_b.current_health = 50;
        let mut rolls = ScriptedRolls::constant(0.99);

        let next = resolver()
            .advance_round(&state, Action::Defend, Action::Defend, &mut rolls, &mut NullObserver)
            .unwrap();

        assert_eq!(next.winner, Some(Side::A));
    }

    #[test]
    fn test_completed_battle_rejected() {
        let mut state = fire_vs_water();
        state.status = BattleStatus::Completed;
        state.winner = Some(Side::A);
        let mut rolls = ScriptedRolls::constant(0.5);

        let result = resolver().advance_round(
            &state,
            Action::Attack,
            Action::Attack,
            &mut rolls,
            &mut NullObserver,
        );

        assert!(matches!(
            result,
            Err(LegendsError::BattleNotActive(BattleStatus::Completed))
        ));
    }

    #[test]
    fn test_health_above_max_rejected() {
        let mut state = fire_vs_water();
        state.side_a.current_health = 150;
        let mut rolls = ScriptedRolls::constant(0.5);

        let result = resolver().advance_round(
            &state,
            Action::Attack,
            Action::Attack,
            &mut rolls,
            &mut NullObserver,
        );

        assert!(matches!(result, Err(LegendsError::HealthOutOfRange { .. })));
        assert_eq!(rolls.drawn(), 0);
    }

    #[test]
    fn test_round_counter_overflow_rejected() {
        let mut state = fire_vs_water();
        state.turn_number = u32::MAX;
        let mut rolls = ScriptedRolls::constant(0.5);

        let result = resolver().advance_round(
            &state,
            Action::Defend,
            Action::Defend,
            &mut rolls,
            &mut NullObserver,
        );

        assert!(matches!(result, Err(LegendsError::InconsistentState(_))));
        assert_eq!(rolls.drawn(), 0);
    }

    #[test]
    fn test_play_out_reaches_completion() {
        use crate::battle::ai::{Difficulty, OpponentPolicy};
        use rand::SeedableRng;
        use rand_chacha::ChaCha8Rng;

        let state = fire_vs_water();
        let easy = OpponentPolicy::new(Difficulty::Easy);
        let hard = OpponentPolicy::new(Difficulty::Hard);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let done = resolver()
            .play_out(&state, &easy, &hard, &mut rng, &mut NullObserver)
            .unwrap();

        assert!(done.is_completed());
        assert!(done.winner.is_some());
        assert!(done.turn_number <= 20);
        assert_eq!(done.actions.len(), done.turn_number as usize * 2);
    }

    #[test]
    fn test_events_emitted_per_action() {
        let state = fire_vs_water();
        let mut rolls = ScriptedRolls::constant(0.99);
        let mut log = BattleEventLog::new();

        resolver()
            .advance_round(&state, Action::Attack, Action::Special, &mut rolls, &mut log)
            .unwrap();

        let resolved = log
            .events
            .iter()
            .filter(|e| matches!(e.event_type, BattleEventType::ActionResolved { .. }))
            .count();
        assert_eq!(resolved, 2);
        assert!(matches!(
            log.events[0].event_type,
            BattleEventType::TurnOrderDecided { first: Side::A }
        ));
    }
}
