//! Flavour lines for commentary overlays

use crate::battle::state::ActionRecord;
use crate::combat::{Action, Fighter};
use crate::core::rng::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuipKind {
    Hit,
    Miss,
    Critical,
    Heal,
    Defend,
}

impl QuipKind {
    /// The kind of line that fits a resolved action
    pub fn for_record(record: &ActionRecord) -> Self {
        match record.action {
            Action::Defend => QuipKind::Defend,
            Action::Item => QuipKind::Heal,
            Action::Attack | Action::Special if record.is_critical() => QuipKind::Critical,
            Action::Attack | Action::Special if record.damage <= 0 => QuipKind::Miss,
            Action::Attack | Action::Special => QuipKind::Hit,
        }
    }
}

fn templates(action: Action, kind: QuipKind) -> &'static [&'static str] {
    match (action, kind) {
        (Action::Attack, QuipKind::Hit) => &[
            "{name} strikes with precision!",
            "A solid hit from {name}!",
            "{name} lands a clean attack!",
        ],
        (Action::Attack, QuipKind::Critical) => &[
            "{name} finds a weak spot! Critical hit!",
            "Devastating blow from {name}!",
            "{name} strikes with perfect technique!",
        ],
        (Action::Attack, QuipKind::Miss) => &[
            "{name}'s attack goes wide!",
            "{name} swings and misses!",
        ],
        (Action::Special, QuipKind::Hit) => &[
            "{name} unleashes their {element} power!",
            "{name} channels elemental energy!",
            "{name} uses their signature move!",
        ],
        (Action::Special, QuipKind::Critical) => &[
            "{name}'s {element} technique is unstoppable!",
            "Maximum power! {name}'s special attack devastates!",
        ],
        (Action::Defend, QuipKind::Defend) => &[
            "{name} takes a defensive stance!",
            "{name} prepares for the next attack!",
            "{name} focuses on protection!",
        ],
        (Action::Item, QuipKind::Heal) => &[
            "{name} recovers their strength!",
            "{name} uses a healing item!",
            "{name} tends to their wounds!",
        ],
        _ => &["{name} acts!"],
    }
}

/// One random commentary line for `fighter` doing `action`
pub fn battle_quip<R: RandomSource + ?Sized>(
    action: Action,
    fighter: &Fighter,
    kind: QuipKind,
    rng: &mut R,
) -> String {
    let options = templates(action, kind);
    let index = (rng.next_range(options.len() as f64) as usize).min(options.len() - 1);
    options[index]
        .replace("{name}", &fighter.name)
        .replace("{element}", fighter.element.name())
}
