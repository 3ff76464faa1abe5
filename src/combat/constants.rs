//! Combat constants - all tunable values in one place

// Attack
pub const ATTACK_CRIT_CHANCE: f64 = 0.15;
pub const ATTACK_CRIT_MULTIPLIER: f64 = 1.5;
/// Defense is halved before being subtracted from attack
pub const DEFENSE_DIVISOR: u32 = 2;
pub const MIN_ATTACK_DAMAGE: i32 = 1;

// Special
pub const SPECIAL_POWER_MULTIPLIER: f64 = 1.3;
pub const SPECIAL_CRIT_CHANCE: f64 = 0.25;
pub const SPECIAL_CRIT_MULTIPLIER: f64 = 1.2;

// Item (healing potion), fraction of max health
pub const HEAL_FRACTION: f64 = 0.25;

// Elemental matchups
pub const SUPER_EFFECTIVE_MULTIPLIER: f64 = 1.25;
pub const NOT_EFFECTIVE_MULTIPLIER: f64 = 0.8;

// Effect annotations
pub const EFFECT_CRITICAL: &str = "Critical Hit!";
pub const EFFECT_DEFEND: &str = "Defended! Damage reduced next turn";
pub const EFFECT_SPECIAL: &str = "Special Attack!";
pub const EFFECT_SPECIAL_CRITICAL: &str = "Special Critical!";
pub const EFFECT_HEAL: &str = "Used Healing Potion!";
pub const EFFECT_SUPER_EFFECTIVE: &str = "Super Effective!";
pub const EFFECT_NOT_EFFECTIVE: &str = "Not very effective...";
