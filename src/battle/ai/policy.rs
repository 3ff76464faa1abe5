//! Opponent policy
//!
//! archetype -> base weights -> situational modifiers -> normalize -> draw.
//! Reads the battle state, never writes it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::battle::ai::archetype::{classify, Archetype};
use crate::battle::ai::weights::ActionWeights;
use crate::battle::ai::BattleAi;
use crate::battle::state::{BattleState, Side};
use crate::combat::{Action, ElementalMatchup, Fighter};
use crate::core::config::{config, AiConfig};
use crate::core::error::LegendsError;
use crate::core::rng::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = LegendsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(LegendsError::UnknownDifficulty(other.to_string())),
        }
    }
}

/// What the policy sees when choosing for one side
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    pub ai_fighter: &'a Fighter,
    pub ai_health: u32,
    pub opponent_fighter: &'a Fighter,
    pub opponent_health: u32,
    pub state: &'a BattleState,
    /// The side the policy is playing; its history drives anti-repetition
    pub side: Side,
}

impl<'a> DecisionContext<'a> {
    pub fn new(
        ai_fighter: &'a Fighter,
        ai_health: u32,
        opponent_fighter: &'a Fighter,
        opponent_health: u32,
        state: &'a BattleState,
        side: Side,
    ) -> Self {
        Self {
            ai_fighter,
            ai_health,
            opponent_fighter,
            opponent_health,
            state,
            side,
        }
    }

    /// Context for `side` taken straight from the battle state
    pub fn for_side(state: &'a BattleState, side: Side) -> Self {
        let own = state.slot(side);
        let opponent = state.slot(side.opponent());
        Self::new(
            &own.fighter,
            own.current_health,
            &opponent.fighter,
            opponent.current_health,
            state,
            side,
        )
    }

    fn health_fraction(health: u32, fighter: &Fighter) -> f64 {
        if fighter.max_health == 0 {
            return 0.0;
        }
        health as f64 / fighter.max_health as f64
    }

    pub fn own_health_fraction(&self) -> f64 {
        Self::health_fraction(self.ai_health, self.ai_fighter)
    }

    pub fn opponent_health_fraction(&self) -> f64 {
        Self::health_fraction(self.opponent_health, self.opponent_fighter)
    }
}

// Health thresholds (fractions of max health)
const CRITICAL_HEALTH: f64 = 0.3;
const WOUNDED_HEALTH: f64 = 0.5;
const FINISHING_HEALTH: f64 = 0.25;
const SPECIAL_ROTATION_HEALTH: f64 = 0.4;

// Round thresholds
const OPENING_ROUNDS: u32 = 2;
const DESPERATION_ROUND: u32 = 15;

const REPETITION_PENALTY: f64 = 0.5;

/// Weighted, situational action chooser for a non-human side
#[derive(Debug, Clone)]
pub struct OpponentPolicy {
    difficulty: Difficulty,
    tables: AiConfig,
}

impl Default for OpponentPolicy {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

impl OpponentPolicy {
    /// Policy using the weight tables from the global config
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            tables: config().ai.clone(),
        }
    }

    pub fn with_config(difficulty: Difficulty, tables: AiConfig) -> Self {
        Self { difficulty, tables }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Pick an action. Never fails; floating-point drift falls back to Attack.
    pub fn choose_action<R: RandomSource + ?Sized>(&self, ctx: &DecisionContext, rng: &mut R) -> Action {
        let archetype = classify(ctx.ai_fighter, self.difficulty, rng);
        let weights = self.action_weights(ctx, archetype);
        let roll = rng.next_unit();

        match weights.sample(roll) {
            Some(action) => {
                debug!(
                    side = ?ctx.side,
                    difficulty = %self.difficulty,
                    ?archetype,
                    ?weights,
                    roll,
                    %action,
                    "Opponent chose action"
                );
                action
            }
            None => {
                warn!(roll, ?weights, "Weighted draw unresolved, falling back to attack");
                Action::Attack
            }
        }
    }

    /// Final normalized weights for `archetype` in this situation
    pub fn action_weights(&self, ctx: &DecisionContext, archetype: Archetype) -> ActionWeights {
        let mut w = ActionWeights::from_table(self.tables.table(archetype));
        let own = ctx.own_health_fraction();
        let opponent = ctx.opponent_health_fraction();
        let round = ctx.state.turn_number;

        if own < CRITICAL_HEALTH {
            w = w
                .scaled(Action::Item, 2.5)
                .scaled(Action::Defend, 1.8)
                .scaled(Action::Attack, 0.6)
                .scaled(Action::Special, 0.7);
        } else if own < WOUNDED_HEALTH {
            w = w.scaled(Action::Item, 1.5).scaled(Action::Defend, 1.3);
        }

        if opponent < FINISHING_HEALTH {
            w = w
                .scaled(Action::Attack, 1.8)
                .scaled(Action::Special, 2.0)
                .scaled(Action::Defend, 0.5)
                .scaled(Action::Item, 0.3);
        }

        match ctx.ai_fighter.element.matchup(ctx.opponent_fighter.element) {
            ElementalMatchup::Advantage => {
                w = w.scaled(Action::Attack, 1.4).scaled(Action::Special, 1.6);
            }
            ElementalMatchup::Disadvantage => {
                w = w.scaled(Action::Defend, 1.5).scaled(Action::Item, 1.3);
            }
            ElementalMatchup::Neutral => {}
        }

        if round <= OPENING_ROUNDS {
            if self.difficulty == Difficulty::Hard {
                w = w.scaled(Action::Special, 1.3).scaled(Action::Attack, 1.2);
            }
        } else if round >= DESPERATION_ROUND {
            w = w
                .scaled(Action::Attack, 1.5)
                .scaled(Action::Special, 1.3)
                .scaled(Action::Defend, 0.8);
        }

        let recent = ctx.state.recent_actions(ctx.side, 3);
        if recent.len() >= 2 {
            let last = recent[recent.len() - 1];
            if last == recent[recent.len() - 2] {
                w = w.scaled(last, REPETITION_PENALTY);
            }
            if !recent.contains(&Action::Special) && own > SPECIAL_ROTATION_HEALTH {
                w = w.scaled(Action::Special, 1.4);
            }
        }

        match self.difficulty {
            Difficulty::Hard => {
                let threats = ctx.state.recent_actions(ctx.side.opponent(), 2);
                if threats.contains(&Action::Attack) {
                    w = w.scaled(Action::Defend, 1.3);
                }
                if threats.contains(&Action::Special) {
                    w = w.scaled(Action::Defend, 1.5);
                }
            }
            Difficulty::Easy => {
                w = w.scaled(Action::Attack, 1.2).scaled(Action::Defend, 0.8);
            }
            Difficulty::Medium => {}
        }

        w.normalized()
    }
}

impl BattleAi for OpponentPolicy {
    fn choose(&self, state: &BattleState, side: Side, rng: &mut dyn RandomSource) -> Action {
        self.choose_action(&DecisionContext::for_side(state, side), rng)
    }

    fn name(&self) -> String {
        format!("{} policy", self.difficulty)
    }
}
