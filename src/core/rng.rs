//! Random source abstraction
//!
//! Every roll the resolver and the policy make goes through `RandomSource`,
//! so a seeded generator or a scripted list of rolls fixes the outcome.

use rand::{Rng, RngCore};

/// Source of uniform rolls in `[0, 1)`
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;

    /// Uniform roll in `[0, max)`
    fn next_range(&mut self, max: f64) -> f64 {
        self.next_unit() * max
    }

    /// True with probability `chance`
    fn chance(&mut self, chance: f64) -> bool {
        self.next_unit() < chance
    }
}

impl<R: RngCore> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed list of rolls, wrapping around at the end
#[derive(Debug, Clone)]
pub struct ScriptedRolls {
    rolls: Vec<f64>,
    cursor: usize,
}

impl ScriptedRolls {
    pub fn new(rolls: impl Into<Vec<f64>>) -> Self {
        let rolls = rolls.into();
        debug_assert!(rolls.iter().all(|r| (0.0..1.0).contains(r)));
        Self { rolls, cursor: 0 }
    }

    /// The same roll forever
    pub fn constant(roll: f64) -> Self {
        Self::new(vec![roll])
    }

    /// How many rolls have been drawn so far
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRolls {
    fn next_unit(&mut self) -> f64 {
        if self.rolls.is_empty() {
            return 0.0;
        }
        let roll = self.rolls[self.cursor % self.rolls.len()];
        self.cursor += 1;
        roll
    }
}
