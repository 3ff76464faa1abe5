//! Action weight vectors
//!
//! Immutable: every modifier returns a new vector, so a decision never
//! shares or mutates a weight table.

use serde::{Deserialize, Serialize};

use crate::combat::Action;
use crate::core::config::WeightTable;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionWeights([f64; 4]);

impl ActionWeights {
    pub fn new(attack: f64, defend: f64, special: f64, item: f64) -> Self {
        Self([attack, defend, special, item])
    }

    pub fn from_table(table: &WeightTable) -> Self {
        Self::new(table.attack, table.defend, table.special, table.item)
    }

    pub fn get(&self, action: Action) -> f64 {
        self.0[action.index()]
    }

    #[must_use]
    pub fn scaled(self, action: Action, factor: f64) -> Self {
        let mut weights = self.0;
        weights[action.index()] *= factor;
        Self(weights)
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Rescale to sum to 1; an all-zero vector is returned unchanged
    #[must_use]
    pub fn normalized(self) -> Self {
        let total = self.total();
        if total <= 0.0 {
            return self;
        }
        Self(self.0.map(|w| w / total))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Action, f64)> + '_ {
        Action::ALL.iter().map(move |&action| (action, self.get(action)))
    }

    /// Cumulative draw in enumeration order
    ///
    /// Returns the first action whose cumulative weight reaches `roll`, or
    /// `None` if rounding leaves the roll past the last bucket.
    pub fn sample(&self, roll: f64) -> Option<Action> {
        let mut cumulative = 0.0;
        for (action, weight) in self.iter() {
            cumulative += weight;
            if roll <= cumulative {
                return Some(action);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_leaves_original() {
        let base = ActionWeights::new(0.5, 0.1, 0.3, 0.1);
        let boosted = base.scaled(Action::Defend, 2.0);
        assert_eq!(base.get(Action::Defend), 0.1);
        assert_eq!(boosted.get(Action::Defend), 0.2);
    }

    #[test]
    fn test_normalized_sums_to_one() {
        let weights = ActionWeights::new(2.0, 1.0, 0.5, 0.5).normalized();
        assert!((weights.total() - 1.0).abs() < 1e-12);
        assert_eq!(weights.get(Action::Attack), 0.5);
    }

    #[test]
    fn test_sample_walks_enumeration_order() {
        let weights = ActionWeights::new(0.25, 0.25, 0.25, 0.25);
        assert_eq!(weights.sample(0.0), Some(Action::Attack));
        assert_eq!(weights.sample(0.25), Some(Action::Attack));
        assert_eq!(weights.sample(0.3), Some(Action::Defend));
        assert_eq!(weights.sample(0.6), Some(Action::Special));
        assert_eq!(weights.sample(0.99), Some(Action::Item));
    }

    #[test]
    fn test_sample_past_total_is_none() {
        let weights = ActionWeights::new(0.1, 0.1, 0.1, 0.1);
        assert_eq!(weights.sample(0.5), None);
    }

    #[test]
    fn test_zero_vector_normalizes_to_itself() {
        let zero = ActionWeights::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(zero.normalized(), zero);
    }
}
