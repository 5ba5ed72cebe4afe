//! Process-wide defaults and search deadlines (`spec.md` §5, §6). Passed
//! explicitly to `Optimizer`/`Team` rather than read from module globals, so
//! a caller embedding this crate (the chat bot command handler) can run many
//! searches concurrently with different settings.

use crate::objective::Modifiers;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::time::Duration;

/// Base stat modifiers applied before any topping contribution, used when no
/// cookie-specific override is supplied.
pub const DEFAULT_MODIFIERS: Modifiers = Modifiers {
    base_atk: dec!(100),
    // Base 5 + Eerie Haunted House Landmark 8.
    base_crit: dec!(13),
    // Base 150 + CRIT DMG Bonus Lab 20 + Chocolate Alter of the Fallen Landmark 20.
    crit_dmg: dec!(190),
    atk_mult: Decimal::ZERO,
    base_hp: dec!(100),
    base_dmgres: dec!(0),
};

/// Per-cookie and whole-team search deadlines.
#[derive(Debug, Clone, Copy)]
pub struct Deadlines {
    /// Soft deadline: the search finishes its current frame and returns its
    /// best incumbent so far rather than continuing to search exhaustively.
    pub soft: Duration,
    /// Hard deadline: the search is cancelled even mid-frame.
    pub hard: Duration,
}

impl Default for Deadlines {
    fn default() -> Self {
        Self { soft: Duration::from_secs(20 * 60), hard: Duration::from_secs(22 * 60) }
    }
}

/// Top-level configuration threaded through a single team-optimization run.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub modifiers: Modifiers,
    pub deadlines: Deadlines,
}

impl Default for Config {
    fn default() -> Self {
        Self { modifiers: DEFAULT_MODIFIERS, deadlines: Deadlines::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_deadlines_are_strictly_ordered() {
        let deadlines = Deadlines::default();
        assert!(deadlines.soft < deadlines.hard);
    }
}
