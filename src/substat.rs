//! Flavor/resonance enumerations and the static per-flavor substat table.

use rust_decimal::Decimal;
use std::fmt;

/// The ten in-game substat kinds a topping can carry.
///
/// Each flavor determines its own main-stat ceiling, sub-stat range, and
/// set-bonus schedule via [`FlavorInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
pub enum Flavor {
    DmgRes,
    Atk,
    Cd,
    AtkSpd,
    Crit,
    Hp,
    Buff,
    Def,
    BuffRes,
    CritRes,
}

impl Flavor {
    pub const ALL: [Flavor; 10] = [
        Flavor::DmgRes,
        Flavor::Atk,
        Flavor::Cd,
        Flavor::AtkSpd,
        Flavor::Crit,
        Flavor::Hp,
        Flavor::Buff,
        Flavor::Def,
        Flavor::BuffRes,
        Flavor::CritRes,
    ];

    pub fn info(self) -> &'static FlavorInfo {
        &INFO[self as usize]
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.info().name)
    }
}

impl std::str::FromStr for Flavor {
    type Err = String;

    /// Parses the in-game display name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Flavor::ALL
            .into_iter()
            .find(|f| f.info().name.eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown substat: {s}"))
    }
}

/// The eight resonance tags, one of which every topping carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
pub enum Resonance {
    Normal,
    Moonkissed,
    Trio,
    Draconic,
    TropicalRock,
    SeaSalt,
    RadiantCheese,
    FrostedCrystal,
}

impl Resonance {
    pub const ALL: [Resonance; 8] = [
        Resonance::Normal,
        Resonance::Moonkissed,
        Resonance::Trio,
        Resonance::Draconic,
        Resonance::TropicalRock,
        Resonance::SeaSalt,
        Resonance::RadiantCheese,
        Resonance::FrostedCrystal,
    ];

    fn name(self) -> &'static str {
        match self {
            Resonance::Normal => "Normal",
            Resonance::Moonkissed => "Moonkissed",
            Resonance::Trio => "Trio",
            Resonance::Draconic => "Draconic",
            Resonance::TropicalRock => "Tropical Rock",
            Resonance::SeaSalt => "Sea Salt",
            Resonance::RadiantCheese => "Radiant Cheese",
            Resonance::FrostedCrystal => "Frosted Crystal",
        }
    }
}

impl fmt::Display for Resonance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Resonance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Resonance::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown resonance: {s}"))
    }
}

/// Static data for one flavor: display names, main-stat ceiling, sub-stat
/// range, and the set-bonus schedule (ascending `(required_count, bonus)`).
pub struct FlavorInfo {
    pub name: &'static str,
    pub short: &'static str,
    pub medium: &'static str,
    pub ceiling: Decimal,
    pub combos: &'static [(usize, Decimal)],
    pub minsub: Decimal,
    pub maxsub: Decimal,
}

impl FlavorInfo {
    /// Largest tier `(required_count, bonus)` with `required_count <= count`,
    /// or `(0, 0)` if none qualifies. `combos` is stored ascending, so this
    /// walks from the back.
    pub fn set_effect(&self, count: usize) -> (usize, Decimal) {
        for &(required, bonus) in self.combos.iter().rev() {
            if required <= count {
                return (required, bonus);
            }
        }
        (0, Decimal::ZERO)
    }
}

macro_rules! dec {
    ($mantissa:expr, $scale:expr) => {
        Decimal::from_parts($mantissa, 0, 0, false, $scale)
    };
}

static INFO: [FlavorInfo; 10] = [
    FlavorInfo {
        name: "DMG Resist",
        short: "DRS",
        medium: "DMGRES",
        ceiling: dec!(41, 1),
        combos: &[(5, dec!(5, 0))],
        minsub: dec!(1, 0),
        maxsub: dec!(6, 0),
    },
    FlavorInfo {
        name: "ATK",
        short: "ATK",
        medium: "ATK",
        ceiling: dec!(9, 0),
        combos: &[(3, dec!(3, 0)), (5, dec!(8, 0))],
        minsub: dec!(1, 0),
        maxsub: dec!(3, 0),
    },
    FlavorInfo {
        name: "Cooldown",
        short: "CD",
        medium: "CD",
        ceiling: dec!(3, 0),
        combos: &[(5, dec!(5, 0))],
        minsub: dec!(1, 0),
        maxsub: dec!(2, 0),
    },
    FlavorInfo {
        name: "ATK SPD",
        short: "SPD",
        medium: "ATKSPD",
        ceiling: dec!(41, 1),
        combos: &[(2, dec!(1, 0)), (5, dec!(3, 0))],
        minsub: dec!(1, 0),
        maxsub: dec!(3, 0),
    },
    FlavorInfo {
        name: "CRIT%",
        short: "CRT",
        medium: "CRIT%",
        ceiling: dec!(9, 0),
        combos: &[(5, dec!(5, 0))],
        minsub: dec!(1, 0),
        maxsub: dec!(3, 0),
    },
    FlavorInfo {
        name: "HP",
        short: "HP",
        medium: "HP",
        ceiling: dec!(9, 0),
        combos: &[(2, dec!(3, 0)), (5, dec!(8, 0))],
        minsub: dec!(1, 0),
        maxsub: dec!(3, 0),
    },
    FlavorInfo {
        name: "Amplify Buff",
        short: "BUF",
        medium: "BUFF",
        ceiling: dec!(3, 0),
        combos: &[(2, dec!(1, 0)), (5, dec!(3, 0))],
        minsub: dec!(1, 0),
        maxsub: dec!(2, 0),
    },
    FlavorInfo {
        name: "DEF",
        short: "DEF",
        medium: "DEF",
        ceiling: dec!(9, 0),
        combos: &[(3, dec!(3, 0)), (5, dec!(8, 0))],
        minsub: dec!(1, 0),
        maxsub: dec!(3, 0),
    },
    FlavorInfo {
        name: "Debuff Resist",
        short: "DBF",
        medium: "BUFFRES",
        ceiling: dec!(3, 0),
        combos: &[(2, dec!(3, 0)), (5, dec!(8, 0))],
        minsub: dec!(1, 0),
        maxsub: dec!(2, 0),
    },
    FlavorInfo {
        name: "CRIT Resist",
        short: "CRS",
        medium: "CRITRES",
        ceiling: dec!(45, 1),
        combos: &[(2, dec!(10, 0)), (5, dec!(30, 0))],
        minsub: dec!(3, 0),
        maxsub: dec!(4, 0),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_effect_is_monotone_in_count() {
        let info = Flavor::Hp.info();
        assert_eq!(info.set_effect(0), (0, Decimal::ZERO));
        assert_eq!(info.set_effect(1), (0, Decimal::ZERO));
        assert_eq!(info.set_effect(2), (2, dec!(3, 0)));
        assert_eq!(info.set_effect(4), (2, dec!(3, 0)));
        assert_eq!(info.set_effect(5), (5, dec!(8, 0)));
    }

    #[test]
    fn flavor_round_trips_through_display() {
        for flavor in Flavor::ALL {
            let parsed: Flavor = flavor.to_string().parse().unwrap();
            assert_eq!(parsed, flavor);
        }
    }

    #[test]
    fn resonance_round_trips_through_display() {
        for resonance in Resonance::ALL {
            let parsed: Resonance = resonance.to_string().parse().unwrap();
            assert_eq!(parsed, resonance);
        }
    }
}
