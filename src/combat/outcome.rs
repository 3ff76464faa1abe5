//! Single-action outcome
//!
//! Computes what one action does: damage to the target or healing to the
//! actor, whether it crit, the effect annotation, and the health it leaves
//! behind. Pure apart from the critical roll.

use serde::{Deserialize, Serialize};

use crate::combat::action::Action;
use crate::combat::constants::*;
use crate::combat::element::ElementalMatchup;
use crate::combat::fighter::Fighter;
use crate::core::error::{LegendsError, Result};
use crate::core::rng::RandomSource;

/// Result of resolving one action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionOutcome {
    /// Positive: damage to the target. Negative: healing to the actor. Zero: no-op.
    pub amount: i32,
    pub critical: bool,
    pub effect: String,
    /// Target health after damage, or actor health after healing
    pub resulting_health: u32,
    pub matchup: ElementalMatchup,
}

impl ActionOutcome {
    pub fn is_heal(&self) -> bool {
        self.amount < 0
    }
}

fn check_health(fighter: &Fighter, current: u32) -> Result<()> {
    if current > fighter.max_health {
        return Err(LegendsError::HealthOutOfRange {
            fighter: fighter.name.clone(),
            current,
            max: fighter.max_health,
        });
    }
    Ok(())
}

fn scale(amount: i32, multiplier: f64) -> i32 {
    (amount as f64 * multiplier).floor() as i32
}

fn annotate(effect: &mut String, note: &str) {
    if !effect.is_empty() {
        effect.push(' ');
    }
    effect.push_str(note);
}

/// Resolve `action` performed by `actor` against `target`
///
/// Attack and Special draw one critical roll each; Defend and Item draw none.
pub fn compute_outcome<R: RandomSource + ?Sized>(
    actor: &Fighter,
    target: &Fighter,
    action: Action,
    actor_health: u32,
    target_health: u32,
    rng: &mut R,
) -> Result<ActionOutcome> {
    check_health(actor, actor_health)?;
    check_health(target, target_health)?;
    let attack = i32::try_from(actor.attack).map_err(|_| {
        LegendsError::InvalidFighter(format!("{} has attack {} beyond range", actor.name, actor.attack))
    })?;

    let mut critical = false;
    let mut effect = String::new();

    let mut amount = match action {
        Action::Attack => {
            let mitigated = attack.saturating_sub_unsigned(target.defense / DEFENSE_DIVISOR);
            let mut base = mitigated.max(MIN_ATTACK_DAMAGE);
            if rng.chance(ATTACK_CRIT_CHANCE) {
                critical = true;
                base = scale(base, ATTACK_CRIT_MULTIPLIER);
                annotate(&mut effect, EFFECT_CRITICAL);
            }
            base
        }
        Action::Defend => {
            annotate(&mut effect, EFFECT_DEFEND);
            0
        }
        Action::Special => {
            let mut base = scale(attack, SPECIAL_POWER_MULTIPLIER);
            if rng.chance(SPECIAL_CRIT_CHANCE) {
                critical = true;
                base = scale(base, SPECIAL_CRIT_MULTIPLIER);
                annotate(&mut effect, EFFECT_SPECIAL_CRITICAL);
            } else {
                annotate(&mut effect, EFFECT_SPECIAL);
            }
            base
        }
        Action::Item => {
            annotate(&mut effect, EFFECT_HEAL);
            -((actor.max_health as f64 * HEAL_FRACTION).floor() as i32)
        }
    };

    let matchup = actor.element.matchup(target.element);
    if action.is_offensive() {
        match matchup {
            ElementalMatchup::Advantage => {
                amount = scale(amount, matchup.multiplier());
                annotate(&mut effect, EFFECT_SUPER_EFFECTIVE);
            }
            ElementalMatchup::Disadvantage => {
                amount = scale(amount, matchup.multiplier());
                annotate(&mut effect, EFFECT_NOT_EFFECTIVE);
            }
            ElementalMatchup::Neutral => {}
        }
    }

    let resulting_health = if action.targets_self() {
        let healed = actor_health as i64 - amount as i64;
        healed.min(actor.max_health as i64) as u32
    } else {
        amount = amount.max(0);
        target_health.saturating_sub(amount as u32)
    };

    Ok(ActionOutcome {
        amount,
        critical,
        effect,
        resulting_health,
        matchup,
    })
}
