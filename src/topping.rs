//! A single inventory item ([`Topping`]) and a chosen five-item set ([`ToppingSet`]).

use crate::substat::{Flavor, Resonance};
use rust_decimal::Decimal;
use std::fmt;

/// One inventory item: a primary flavor, its ordered (substat, value) pairs
/// (first entry is the main stat), and a resonance tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topping {
    substats: Vec<(Flavor, Decimal)>,
    resonance: Resonance,
}

impl Topping {
    /// Builds a topping from its ordered substat pairs (main stat first,
    /// up to three sub-stats) and resonance tag. Does not validate; call
    /// [`Topping::validate`] separately, matching the source's load-then-check
    /// split.
    pub fn new(substats: Vec<(Flavor, Decimal)>, resonance: Resonance) -> Self {
        Self { substats, resonance }
    }

    pub fn flavor(&self) -> Flavor {
        self.substats[0].0
    }

    pub fn resonance(&self) -> Resonance {
        self.resonance
    }

    pub fn substats(&self) -> &[(Flavor, Decimal)] {
        &self.substats
    }

    /// Sum of this topping's contribution across the given substats.
    pub fn value(&self, substats: &[Flavor]) -> Decimal {
        self.substats
            .iter()
            .filter(|(flavor, _)| substats.contains(flavor))
            .map(|(_, value)| *value)
            .sum()
    }

    pub fn value_one(&self, substat: Flavor) -> Decimal {
        self.value(&[substat])
    }

    /// Well-formedness per `spec.md` §8: main-stat in `[0, ceiling]`,
    /// sub-stats mutually distinct, each within its flavor's `[min,max]`.
    pub fn validate(&self) -> bool {
        let (main_flavor, main_value) = self.substats[0];
        if main_value < Decimal::ZERO || main_value > main_flavor.info().ceiling {
            return false;
        }
        let subs = &self.substats[1..];
        let mut seen = Vec::with_capacity(subs.len());
        for (flavor, value) in subs {
            if seen.contains(flavor) {
                return false;
            }
            seen.push(*flavor);
            let info = flavor.info();
            if *value < info.minsub || *value > info.maxsub {
                return false;
            }
        }
        true
    }
}

impl fmt::Display for Topping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.flavor().info().medium)?;
        for (flavor, value) in &self.substats[1..] {
            write!(f, " : {} - {value}", flavor.info().short)?;
        }
        Ok(())
    }
}

/// A fixed-size collection of exactly five toppings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToppingSet {
    toppings: [Topping; 5],
}

impl ToppingSet {
    pub fn new(toppings: [Topping; 5]) -> Self {
        Self { toppings }
    }

    /// Fails if `toppings` does not contain exactly five items.
    pub fn from_vec(toppings: Vec<Topping>) -> Option<Self> {
        let arr: [Topping; 5] = toppings.try_into().ok()?;
        Some(Self::new(arr))
    }

    pub fn toppings(&self) -> &[Topping; 5] {
        &self.toppings
    }

    /// Sum, across every topping in the set, of each topping's own value for
    /// `substat` (no set-bonus applied).
    pub fn raw(&self, substat: Flavor) -> Decimal {
        self.toppings
            .iter()
            .map(|t| t.value_one(substat))
            .sum()
    }

    /// Largest set-bonus tier reached for `substat`, given how many members
    /// of that flavor are present.
    pub fn set_effect(&self, substat: Flavor) -> (usize, Decimal) {
        let count = self.toppings.iter().filter(|t| t.flavor() == substat).count();
        substat.info().set_effect(count)
    }

    /// `raw(s) + set_effect(s).bonus`, extended linearly over a substat tuple.
    pub fn value(&self, substats: &[Flavor]) -> Decimal {
        substats
            .iter()
            .map(|&s| self.raw(s) + self.set_effect(s).1)
            .sum()
    }

    pub fn value_one(&self, substat: Flavor) -> Decimal {
        self.value(&[substat])
    }

    /// True iff no item in `self` is also present (by value equality) in `other`.
    pub fn disjoint(&self, other: &ToppingSet) -> bool {
        self.toppings.iter().all(|t| !other.toppings.contains(t))
    }
}

impl fmt::Display for ToppingSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "┌─────────────┬─────────────┐")?;
        writeln!(
            f,
            "│ATK     {:>4}%│DEF     {:>4}%│",
            self.raw(Flavor::Atk),
            self.raw(Flavor::Def)
        )?;
        writeln!(
            f,
            "│HP      {:>4}%│ATK SPD {:>4}%│",
            self.raw(Flavor::Hp),
            self.raw(Flavor::AtkSpd)
        )?;
        writeln!(
            f,
            "│CRIT%   {:>4}%│CD      {:>4}%│",
            self.raw(Flavor::Crit),
            self.raw(Flavor::Cd)
        )?;
        writeln!(
            f,
            "│DMGRES  {:>4}%│CRITRES {:>4}%│",
            self.raw(Flavor::DmgRes),
            self.raw(Flavor::CritRes)
        )?;
        writeln!(
            f,
            "│BUFF    {:>4}%│BUFFRES {:>4}%│",
            self.raw(Flavor::Buff),
            self.raw(Flavor::BuffRes)
        )?;
        write!(f, "└─────────────┴─────────────┘")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn topping(flavor: Flavor, main: Decimal) -> Topping {
        Topping::new(vec![(flavor, main)], Resonance::Normal)
    }

    #[test]
    fn validate_rejects_out_of_range_main_stat() {
        let t = topping(Flavor::Atk, dec!(99));
        assert!(!t.validate());
    }

    #[test]
    fn validate_rejects_duplicate_substats() {
        let t = Topping::new(
            vec![(Flavor::Atk, dec!(9)), (Flavor::Hp, dec!(2)), (Flavor::Hp, dec!(2))],
            Resonance::Normal,
        );
        assert!(!t.validate());
    }

    #[test]
    fn set_effect_uses_largest_qualifying_tier() {
        let set = ToppingSet::new([
            topping(Flavor::Atk, dec!(9)),
            topping(Flavor::Atk, dec!(9)),
            topping(Flavor::Atk, dec!(9)),
            topping(Flavor::Hp, dec!(9)),
            topping(Flavor::Hp, dec!(9)),
        ]);
        assert_eq!(set.set_effect(Flavor::Atk), (3, dec!(3)));
        assert_eq!(set.value_one(Flavor::Atk), dec!(27) + dec!(3));
    }
}
