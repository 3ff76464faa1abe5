// Property-based tests for round resolution and the opponent policy
use chain_legends::battle::ai::{Archetype, DecisionContext, Difficulty, OpponentPolicy};
use chain_legends::battle::{BattleState, CombatantSlot, NullObserver, Resolver, Side};
use chain_legends::combat::{compute_outcome, Action, Element, ElementalMatchup, Fighter};
use chain_legends::core::{CombatantId, FighterId, FixedClock, ResolverConfig, ScriptedRolls};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn element() -> impl Strategy<Value = Element> {
    prop::sample::select(Element::ALL.to_vec())
}

fn action() -> impl Strategy<Value = Action> {
    prop::sample::select(Action::ALL.to_vec())
}

fn fighter(tag: &'static str) -> impl Strategy<Value = Fighter> {
    (element(), 1u32..60, 1u32..60, 1u32..40, 20u32..300).prop_map(
        move |(element, attack, defense, speed, max_health)| Fighter {
            id: FighterId::new(tag),
            name: tag.to_string(),
            element,
            level: 1,
            experience: 0,
            attack,
            defense,
            speed,
            max_health,
        },
    )
}

fn resolver() -> Resolver<FixedClock> {
    Resolver::with_clock(ResolverConfig::default(), FixedClock(0))
}

fn start(a: Fighter, b: Fighter) -> BattleState {
    resolver()
        .start_battle(
            CombatantSlot::new(a, CombatantId::new("0xA")),
            CombatantSlot::new(b, CombatantId::new("0xB")),
        )
        .expect("generated fighters are valid")
}

proptest! {
    #[test]
    fn proptest_health_stays_in_bounds(
        a in fighter("a"),
        b in fighter("b"),
        rounds in prop::collection::vec((action(), action()), 1..30),
        seed in any::<u64>()
    ) {
        let resolver = resolver();
        let mut state = start(a, b);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        for (action_a, action_b) in rounds {
            if !state.is_active() {
                break;
            }
            let previous_turn = state.turn_number;
            state = resolver
                .advance_round(&state, action_a, action_b, &mut rng, &mut NullObserver)
                .expect("active battle advances");

            prop_assert_eq!(state.turn_number, previous_turn + 1);
            prop_assert!(state.turn_number <= 20);
            for side in Side::BOTH {
                let slot = state.slot(side);
                prop_assert!(slot.current_health <= slot.fighter.max_health);
            }
            prop_assert!(state.check_invariants().is_ok());
        }
    }

    #[test]
    fn proptest_completed_battles_stay_completed(
        a in fighter("a"),
        b in fighter("b"),
        seed in any::<u64>()
    ) {
        let resolver = resolver();
        let mut state = start(a, b);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        while state.is_active() {
            state = resolver
                .advance_round(&state, Action::Special, Action::Attack, &mut rng, &mut NullObserver)
                .expect("active battle advances");
        }

        prop_assert!(state.winner.is_some());
        let again = resolver.advance_round(&state, Action::Attack, Action::Attack, &mut rng, &mut NullObserver);
        prop_assert!(again.is_err());
    }

    #[test]
    fn proptest_same_seed_same_battle(
        a in fighter("a"),
        b in fighter("b"),
        rounds in prop::collection::vec((action(), action()), 1..20),
        seed in any::<u64>()
    ) {
        let resolver = resolver();
        let start = start(a, b);
        let mut left = start.clone();
        let mut right = start;
        let mut rng_left = ChaCha8Rng::seed_from_u64(seed);
        let mut rng_right = ChaCha8Rng::seed_from_u64(seed);

        for (action_a, action_b) in rounds {
            if !left.is_active() {
                break;
            }
            left = resolver
                .advance_round(&left, action_a, action_b, &mut rng_left, &mut NullObserver)
                .expect("active battle advances");
            right = resolver
                .advance_round(&right, action_a, action_b, &mut rng_right, &mut NullObserver)
                .expect("active battle advances");
        }

        prop_assert_eq!(left, right);
    }

    #[test]
    fn proptest_offense_never_heals(
        actor in fighter("a"),
        target in fighter("b"),
        special in any::<bool>(),
        roll in 0.0f64..1.0
    ) {
        let action = if special { Action::Special } else { Action::Attack };
        let outcome = compute_outcome(
            &actor,
            &target,
            action,
            actor.max_health,
            target.max_health,
            &mut ScriptedRolls::constant(roll),
        )
        .expect("health within bounds");

        prop_assert!(outcome.amount >= 0);
        prop_assert_eq!(
            outcome.resulting_health,
            target.max_health.saturating_sub(outcome.amount as u32)
        );
    }

    #[test]
    fn proptest_elements_form_a_cycle(attacker in element(), defender in element()) {
        let forward = attacker.matchup(defender);
        let backward = defender.matchup(attacker);

        match forward {
            ElementalMatchup::Advantage => prop_assert_eq!(backward, ElementalMatchup::Disadvantage),
            ElementalMatchup::Disadvantage => prop_assert_eq!(backward, ElementalMatchup::Advantage),
            ElementalMatchup::Neutral => prop_assert_eq!(backward, ElementalMatchup::Neutral),
        }
        prop_assert_eq!(attacker.beats().beaten_by(), attacker);
    }

    #[test]
    fn proptest_policy_weights_normalized(
        a in fighter("a"),
        b in fighter("b"),
        health_a in 0.0f64..=1.0,
        health_b in 0.0f64..=1.0,
        turn in 0u32..20,
        history in prop::collection::vec(action(), 0..8),
        difficulty in prop::sample::select(Difficulty::ALL.to_vec()),
        archetype in prop::sample::select(Archetype::ALL.to_vec())
    ) {
        let mut state = start(a, b);
        state.side_a.current_health = (state.side_a.fighter.max_health as f64 * health_a) as u32;
        state.side_b.current_health = (state.side_b.fighter.max_health as f64 * health_b) as u32;
        state.turn_number = turn;
        for (i, action) in history.into_iter().enumerate() {
            state.actions.push(chain_legends::battle::ActionRecord {
                side: if i % 2 == 0 { Side::A } else { Side::B },
                action,
                damage: 0,
                effect: String::new(),
                timestamp: 0,
            });
        }

        let ctx = DecisionContext::for_side(&state, Side::B);
        let weights = OpponentPolicy::new(difficulty).action_weights(&ctx, archetype);

        prop_assert!((weights.total() - 1.0).abs() < 1e-9);
        prop_assert!(weights.iter().all(|(_, w)| w >= 0.0));
    }
}
