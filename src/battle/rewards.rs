//! Post-battle experience

use crate::combat::Fighter;
use crate::core::rng::RandomSource;

const BASE_EXPERIENCE: i64 = 50;
const EXPERIENCE_PER_LEVEL_GAP: i64 = 10;
const MIN_EXPERIENCE: i64 = 10;
/// Variance is drawn from `[-VARIANCE, VARIANCE)`
const VARIANCE: i64 = 10;

/// Experience awarded to the winner
///
/// Beating a higher-level opponent pays 10 extra per level of difference.
pub fn experience_gained<R: RandomSource + ?Sized>(winner: &Fighter, loser: &Fighter, rng: &mut R) -> u32 {
    let mut experience = BASE_EXPERIENCE;
    if loser.level > winner.level {
        experience += (loser.level - winner.level) as i64 * EXPERIENCE_PER_LEVEL_GAP;
    }
    experience += rng.next_range((VARIANCE * 2) as f64).floor() as i64 - VARIANCE;
    experience.max(MIN_EXPERIENCE) as u32
}

/// Whether moving to `new_experience` crosses a level boundary
pub fn should_level_up(fighter: &Fighter, new_experience: u32) -> bool {
    Fighter::level_for_experience(new_experience) > Fighter::level_for_experience(fighter.experience)
}
