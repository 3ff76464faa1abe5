//! Battle configuration with documented constants
//!
//! Resolver tunables and the opponent policy's base weight tables live here.
//! Defaults reproduce the live game; a TOML file can override any section.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::battle::ai::Archetype;
use crate::core::error::{LegendsError, Result};

/// Tunables for round resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Round cap. Reaching it ends the battle on health percentage.
    pub max_rounds: u32,

    /// Time a side has to submit its next action (milliseconds)
    ///
    /// Only stamped into the state as a deadline; enforcing it belongs
    /// to whoever collects actions.
    pub turn_time_limit_ms: u64,

    /// Upper bound of the uniform jitter added to speed when ordering a round
    pub speed_jitter: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_rounds: 20,
            turn_time_limit_ms: 10_000,
            speed_jitter: 10.0,
        }
    }
}

/// Base probability for each action before situational modifiers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightTable {
    pub attack: f64,
    pub defend: f64,
    pub special: f64,
    pub item: f64,
}

impl WeightTable {
    pub const fn new(attack: f64, defend: f64, special: f64, item: f64) -> Self {
        Self {
            attack,
            defend,
            special,
            item,
        }
    }

    pub fn total(&self) -> f64 {
        self.attack + self.defend + self.special + self.item
    }

    fn validate(&self, name: &str) -> Result<()> {
        let entries = [self.attack, self.defend, self.special, self.item];
        if entries.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(LegendsError::InvalidConfig(format!(
                "{name} weights must be finite and non-negative"
            )));
        }
        if self.total() <= 0.0 {
            return Err(LegendsError::InvalidConfig(format!(
                "{name} weights must have a positive total"
            )));
        }
        Ok(())
    }
}

/// Base weight tables, one per archetype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Attack and Special carry ~80% of the mass
    pub aggressive: WeightTable,
    /// Leans on Defend and Item
    pub defensive: WeightTable,
    pub balanced: WeightTable,
    /// Prefers Special
    pub tactical: WeightTable,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            aggressive: WeightTable::new(0.5, 0.1, 0.3, 0.1),
            defensive: WeightTable::new(0.2, 0.4, 0.1, 0.3),
            balanced: WeightTable::new(0.3, 0.25, 0.25, 0.2),
            tactical: WeightTable::new(0.25, 0.25, 0.35, 0.15),
        }
    }
}

impl AiConfig {
    pub fn table(&self, archetype: Archetype) -> &WeightTable {
        match archetype {
            Archetype::Aggressive => &self.aggressive,
            Archetype::Defensive => &self.defensive,
            Archetype::Balanced => &self.balanced,
            Archetype::Tactical => &self.tactical,
        }
    }
}

/// Complete battle configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    pub resolver: ResolverConfig,
    pub ai: AiConfig,
}

impl BattleConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; missing sections keep their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: BattleConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.resolver.max_rounds == 0 {
            return Err(LegendsError::InvalidConfig(
                "max_rounds must be at least 1".into(),
            ));
        }
        if !self.resolver.speed_jitter.is_finite() || self.resolver.speed_jitter < 0.0 {
            return Err(LegendsError::InvalidConfig(format!(
                "speed_jitter ({}) must be finite and non-negative",
                self.resolver.speed_jitter
            )));
        }

        for archetype in Archetype::ALL {
            self.ai.table(archetype).validate(archetype.name())?;
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<BattleConfig> = OnceLock::new();

/// Get the global battle config (initializes with defaults if not set)
pub fn config() -> &'static BattleConfig {
    CONFIG.get_or_init(BattleConfig::default)
}

/// Set the global battle config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: BattleConfig) -> std::result::Result<(), BattleConfig> {
    CONFIG.set(config)
}
