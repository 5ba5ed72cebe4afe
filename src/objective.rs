//! Polymorphic objective valuation: `Single` / `Combo` / `EDMG` / `Vitality`.
//!
//! Represented as a single closed tagged enum (`spec.md` §9: "no virtual
//! dispatch or open extension is needed at runtime — the four cases are a
//! closed set") rather than the source's class hierarchy.

use crate::substat::Flavor;
use crate::topping::{Topping, ToppingSet};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;

/// Per-substat `[min, max]` bound a `Special` objective's pruning may not
/// exceed, expressed as a fraction of the substat's percent value (i.e. the
/// same units `value()/100` uses). Defaults to `(-inf, +inf)`-equivalent via
/// `Option`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bound {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

impl Bound {
    fn clamp(&self, value: Decimal) -> Decimal {
        let mut v = value;
        if let Some(max) = self.max {
            v = v.min(max);
        }
        if let Some(min) = self.min {
            v = v.max(min);
        }
        v
    }

    fn clamp_max(&self, value: Decimal) -> Decimal {
        match self.max {
            Some(max) => value.min(max),
            None => value,
        }
    }
}

/// The numeric modifier bundle a cookie's `Requirements` carries (`spec.md`
/// §6): base ATK%, base CRIT%, crit-damage, ATK multiplier, base HP%, base
/// DMGRES%.
#[derive(Debug, Clone, Copy)]
pub struct Modifiers {
    pub base_atk: Decimal,
    pub base_crit: Decimal,
    pub crit_dmg: Decimal,
    pub atk_mult: Decimal,
    pub base_hp: Decimal,
    pub base_dmgres: Decimal,
}

/// The four objective variants, each exposing `value`/`floor`/`upper`.
#[derive(Debug, Clone)]
pub enum Objective {
    Single(Flavor),
    Combo {
        substats: Vec<Flavor>,
        bounds: HashMap<Flavor, Bound>,
    },
    EDmg {
        base_atk: Decimal,
        base_crit: Decimal,
        crit_dmg: Decimal,
        atk_mult: Decimal,
        bounds: HashMap<Flavor, Bound>,
    },
    Vitality {
        base_hp: Decimal,
        base_dmgres: Decimal,
        bounds: HashMap<Flavor, Bound>,
    },
}

impl Objective {
    pub fn combo(substats: Vec<Flavor>) -> Self {
        Objective::Combo { substats, bounds: HashMap::new() }
    }

    pub fn edmg(mods: Modifiers) -> Self {
        Objective::EDmg {
            base_atk: mods.base_atk / Decimal::ONE_HUNDRED,
            base_crit: mods.base_crit / Decimal::ONE_HUNDRED,
            crit_dmg: mods.crit_dmg / Decimal::ONE_HUNDRED,
            atk_mult: mods.atk_mult,
            bounds: HashMap::new(),
        }
    }

    pub fn vitality(mods: Modifiers) -> Self {
        Objective::Vitality {
            base_hp: mods.base_hp / Decimal::ONE_HUNDRED,
            base_dmgres: mods.base_dmgres / Decimal::ONE_HUNDRED,
            bounds: HashMap::new(),
        }
    }

    /// The substat tuple this objective reads from a `ToppingSet`.
    pub fn types(&self) -> Vec<Flavor> {
        match self {
            Objective::Single(s) => vec![*s],
            Objective::Combo { substats, .. } => substats.clone(),
            Objective::EDmg { .. } => vec![Flavor::Atk, Flavor::Crit],
            Objective::Vitality { .. } => vec![Flavor::DmgRes, Flavor::Hp],
        }
    }

    /// Mutable access to this objective's per-substat pruning bounds, used by
    /// `Requirements::realize` to tighten bounds from validity predicates.
    pub fn bounds_mut(&mut self) -> Option<&mut HashMap<Flavor, Bound>> {
        match self {
            Objective::Single(_) => None,
            Objective::Combo { bounds, .. }
            | Objective::EDmg { bounds, .. }
            | Objective::Vitality { bounds, .. } => Some(bounds),
        }
    }

    pub fn value(&self, set: &ToppingSet) -> Decimal {
        match self {
            Objective::Single(s) => set.value_one(*s),
            Objective::Combo { substats, .. } => substats.iter().map(|s| set.value_one(*s)).sum(),
            Objective::EDmg { base_atk, base_crit, crit_dmg, atk_mult, .. } => {
                let atk = set.value_one(Flavor::Atk) / Decimal::ONE_HUNDRED + base_atk;
                let crit = set.value_one(Flavor::Crit) / Decimal::ONE_HUNDRED + base_crit;
                edmg_value(atk, crit, *crit_dmg, *atk_mult)
            }
            Objective::Vitality { base_hp, base_dmgres, .. } => {
                let hp = set.value_one(Flavor::Hp) / Decimal::ONE_HUNDRED + base_hp;
                let dmgres = set.value_one(Flavor::DmgRes) / Decimal::ONE_HUNDRED + base_dmgres;
                vitality_value(hp, dmgres)
            }
        }
    }

    /// Minimum combined-pool needed to match `set`'s objective value.
    pub fn floor(&self, set: &ToppingSet) -> Decimal {
        match self {
            Objective::Single(s) => set.value_one(*s),
            Objective::Combo { .. } => self.value(set),
            Objective::EDmg { base_atk, base_crit, crit_dmg, atk_mult, .. } => {
                let obj = self.value(set);
                let obj_f64 = obj.to_f64().unwrap_or(0.0);
                let crit_dmg_f64 = crit_dmg.to_f64().unwrap_or(1.0);
                let minimum_atk = (obj_f64 / (crit_dmg_f64 - 1.0)).sqrt();
                let minimum_atk = Decimal::try_from(minimum_atk).unwrap_or(Decimal::ZERO);
                let minimum_crit = (obj - (Decimal::ONE + atk_mult) * minimum_atk) / ((*crit_dmg - Decimal::ONE) * minimum_atk);
                ((minimum_atk + minimum_crit - base_atk - base_crit) * Decimal::ONE_HUNDRED)
                    .round_dp_with_strategy(1, RoundingStrategy::AwayFromZero)
            }
            Objective::Vitality { base_hp, base_dmgres, .. } => {
                // Mirrors the source's literal (not percent-rescaled)
                // subtraction here rather than `(min_dmgres - base_dmgres) *
                // 100` — see DESIGN.md's Open Questions for why this is kept
                // as-is instead of "corrected".
                let obj = self.value(set);
                let hp = *base_hp;
                let min_dmgres = Decimal::ONE - (hp / obj);
                (min_dmgres - *base_dmgres * Decimal::ONE_HUNDRED)
                    .round_dp_with_strategy(1, RoundingStrategy::AwayFromZero)
            }
        }
    }

    /// Best objective value attainable given `combined` (a pool over this
    /// objective's substats, in raw percent-points) distributed across the
    /// uncommitted slots, given what `prefix` already fixed and `full_set`'s
    /// set-bonus context.
    pub fn upper(&self, combined: Decimal, full_set: &ToppingSet, prefix: &[Topping]) -> Decimal {
        match self {
            Objective::Single(_) => combined,
            Objective::Combo { substats, bounds } => {
                // `combined` already sums the fixed prefix plus each
                // remaining slot's per-substat ceiling across every substat
                // in this combo; per-substat bounds can only lower that
                // ceiling further, so clamping against the loosest
                // configured bound keeps this a valid (if slightly
                // conservative) upper bound without needing the combined
                // total broken back out by substat.
                let tightest_max = substats
                    .iter()
                    .filter_map(|s| bounds.get(s).and_then(|b| b.max))
                    .map(|max| max * Decimal::ONE_HUNDRED * Decimal::from(substats.len()))
                    .fold(combined, Decimal::min);
                tightest_max
            }
            Objective::EDmg { base_atk, base_crit, crit_dmg, atk_mult, bounds } => {
                let fixed = PrefixView(prefix);
                let atk = fixed.value_one(Flavor::Atk) / Decimal::ONE_HUNDRED + base_atk;
                let crit = fixed.value_one(Flavor::Crit) / Decimal::ONE_HUNDRED + base_crit;

                let combined = combined / Decimal::ONE_HUNDRED + base_atk + base_crit;
                let optimal_atk = (combined * (*crit_dmg - Decimal::ONE) + Decimal::ONE + atk_mult)
                    / (Decimal::TWO * (*crit_dmg - Decimal::ONE));

                let atk_bound = bounds.get(&Flavor::Atk).copied().unwrap_or_default();
                let crit_bound = bounds.get(&Flavor::Crit).copied().unwrap_or_default();

                let ideal_atk = atk_bound.clamp(atk.max(optimal_atk) - base_atk) + base_atk;
                let ideal_crit = crit_bound.clamp(crit.max(combined - ideal_atk) - base_crit) + base_crit;
                let ideal_atk = combined - ideal_crit;

                edmg_value(ideal_atk, ideal_crit, *crit_dmg, *atk_mult)
            }
            Objective::Vitality { base_hp, base_dmgres, bounds } => {
                let fixed = PrefixView(prefix);
                let dmgres = fixed.value_one(Flavor::DmgRes) / Decimal::ONE_HUNDRED;
                let hp = fixed.value_one(Flavor::Hp) / Decimal::ONE_HUNDRED;

                let combined = combined / Decimal::ONE_HUNDRED;

                let (_, bonus) = full_set.set_effect(Flavor::DmgRes);
                let obj_count = full_set
                    .toppings()
                    .iter()
                    .skip(prefix.len())
                    .filter(|t| t.flavor() == Flavor::DmgRes)
                    .count();
                let dmgres_ceiling = Flavor::DmgRes.info().ceiling;
                let wildcard_ceiling = dec_six();
                let max_additional_dmgres = (Decimal::from(obj_count) * (wildcard_ceiling + dmgres_ceiling)
                    + Decimal::from(5usize.saturating_sub(obj_count).saturating_sub(prefix.len())) * wildcard_ceiling
                    + bonus)
                    / Decimal::ONE_HUNDRED;

                let dmgres_bound = bounds.get(&Flavor::DmgRes).copied().unwrap_or_default();
                let hp_bound = bounds.get(&Flavor::Hp).copied().unwrap_or_default();

                let ideal_dmgres = dmgres_bound.clamp_max(combined.min(dmgres + max_additional_dmgres));
                let ideal_hp = hp_bound.clamp(hp.max(combined - ideal_dmgres));
                let ideal_dmgres = combined - ideal_hp;

                let ideal_hp = ideal_hp + base_hp;
                let ideal_dmgres = ideal_dmgres + base_dmgres;

                vitality_value(ideal_hp, ideal_dmgres)
            }
        }
    }

    /// Human-facing projection of a set's objective, plus derived display-only
    /// terms (RNG entropy for EDMG).
    pub fn fancy_value(&self, set: &ToppingSet) -> HashMap<&'static str, Decimal> {
        let mut out = HashMap::new();
        match self {
            Objective::Single(s) => {
                out.insert(s.info().medium, set.value_one(*s));
            }
            Objective::Combo { substats, .. } => {
                out.insert("Combo", self.value(set));
                for &s in substats {
                    out.insert(s.info().medium, set.value_one(s));
                }
            }
            Objective::EDmg { base_crit, .. } => {
                let crit = (set.value_one(Flavor::Crit) / Decimal::ONE_HUNDRED + base_crit).min(Decimal::ONE);
                let c = crit.to_f64().unwrap_or(0.0);
                let entropy = if c <= 0.0 || c >= 1.0 {
                    0.0
                } else {
                    -c * c.log2() - (1.0 - c) * (1.0 - c).log2()
                };
                let entropy = Decimal::try_from(entropy)
                    .unwrap_or(Decimal::ZERO)
                    .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero);
                out.insert("E[DMG]", self.value(set) * Decimal::ONE_HUNDRED);
                out.insert("RNG", entropy * Decimal::ONE_HUNDRED);
            }
            Objective::Vitality { .. } => {
                out.insert("Vitality", self.value(set) * Decimal::ONE_HUNDRED);
            }
        }
        out
    }
}

fn edmg_value(atk: Decimal, crit: Decimal, crit_dmg: Decimal, atk_mult: Decimal) -> Decimal {
    (crit_dmg - Decimal::ONE) * atk * crit + (Decimal::ONE + atk_mult) * atk
}

fn vitality_value(hp: Decimal, dmgres: Decimal) -> Decimal {
    hp * (Decimal::ONE / (Decimal::ONE - dmgres))
}

fn dec_six() -> Decimal {
    Decimal::from(6)
}

/// A view over a not-yet-complete branch-and-bound prefix, used only to sum
/// the fixed portion's raw contribution per substat. `ToppingSet` is always
/// exactly five items, but a prefix mid-search may be shorter.
struct PrefixView<'a>(&'a [Topping]);

impl PrefixView<'_> {
    fn value_one(&self, substat: Flavor) -> Decimal {
        self.0.iter().map(|t| t.value_one(substat)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::substat::Resonance;
    use rust_decimal_macros::dec;

    fn topping(flavor: Flavor, main: Decimal) -> Topping {
        Topping::new(vec![(flavor, main)], Resonance::Normal)
    }

    #[test]
    fn single_upper_is_identity() {
        let obj = Objective::Single(Flavor::Atk);
        let set = ToppingSet::new([
            topping(Flavor::Atk, dec!(9)),
            topping(Flavor::Atk, dec!(9)),
            topping(Flavor::Atk, dec!(9)),
            topping(Flavor::Atk, dec!(9)),
            topping(Flavor::Atk, dec!(9)),
        ]);
        assert_eq!(obj.upper(dec!(100), &set, &[]), dec!(100));
        assert_eq!(obj.value(&set), dec!(45) + dec!(8));
    }

    #[test]
    fn edmg_floor_is_consistent_with_value() {
        let mods = Modifiers {
            base_atk: dec!(100),
            base_crit: dec!(5),
            crit_dmg: dec!(150),
            atk_mult: Decimal::ZERO,
            base_hp: dec!(100),
            base_dmgres: Decimal::ZERO,
        };
        let obj = Objective::edmg(mods);
        let set = ToppingSet::new([
            topping(Flavor::Atk, dec!(9)),
            topping(Flavor::Atk, dec!(9)),
            topping(Flavor::Atk, dec!(9)),
            topping(Flavor::Crit, dec!(9)),
            topping(Flavor::Crit, dec!(9)),
        ]);
        let value = obj.value(&set);
        let floor = obj.floor(&set);
        assert!(floor > Decimal::ZERO);
        assert!(value > Decimal::ZERO);
    }

    #[test]
    fn vitality_floor_matches_the_sources_literal_subtraction() {
        // Regression for the review decision recorded in DESIGN.md: this
        // crate keeps the source's `min_dmgres - base_dmgres * 100` term
        // rather than rescaling the whole difference by 100, since
        // `spec.md` never flags this term as suspect the way it flags
        // `special_upper`'s HP/DMGRES bound mixup.
        let mods = Modifiers {
            base_atk: dec!(100),
            base_crit: dec!(5),
            crit_dmg: dec!(150),
            atk_mult: Decimal::ZERO,
            base_hp: dec!(100),
            base_dmgres: dec!(5),
        };
        let obj = Objective::vitality(mods);
        let set = ToppingSet::new([
            topping(Flavor::Hp, dec!(9)),
            topping(Flavor::Hp, dec!(9)),
            topping(Flavor::Hp, dec!(9)),
            topping(Flavor::DmgRes, dec!(6)),
            topping(Flavor::DmgRes, dec!(6)),
        ]);
        let value = obj.value(&set);
        let hp = dec!(1); // base_hp / 100
        let min_dmgres = Decimal::ONE - (hp / value);
        // base_dmgres is stored pre-divided by 100, so `* 100` here just
        // gets back the raw `dec!(5)` the modifiers were built from.
        let expected = (min_dmgres - dec!(5)).round_dp_with_strategy(1, RoundingStrategy::AwayFromZero);
        assert_eq!(obj.floor(&set), expected);
    }

    #[test]
    fn vitality_upper_respects_hp_bound_not_dmgres_bound() {
        // Regression for the source's copy-paste bug (spec.md §9): the HP
        // spillover clamp must use the HP bound, not the DMGRES bound.
        let mods = Modifiers {
            base_atk: dec!(100),
            base_crit: dec!(5),
            crit_dmg: dec!(150),
            atk_mult: Decimal::ZERO,
            base_hp: dec!(100),
            base_dmgres: Decimal::ZERO,
        };
        let mut obj = Objective::vitality(mods);
        if let Objective::Vitality { bounds, .. } = &mut obj {
            bounds.insert(Flavor::Hp, Bound { min: None, max: Some(dec!(1.2)) });
            bounds.insert(Flavor::DmgRes, Bound { min: None, max: Some(dec!(0.1)) });
        }
        let set = ToppingSet::new([
            topping(Flavor::Hp, dec!(9)),
            topping(Flavor::Hp, dec!(9)),
            topping(Flavor::Hp, dec!(9)),
            topping(Flavor::DmgRes, dec!(6)),
            topping(Flavor::DmgRes, dec!(6)),
        ]);
        // Should not panic and should produce a finite positive value; the
        // key regression is at the type level (distinct bound lookups).
        let value = obj.upper(dec!(100), &set, &[]);
        assert!(value > Decimal::ZERO);
    }
}
