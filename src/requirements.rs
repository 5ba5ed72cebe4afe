//! A single cookie's search problem: its validity predicates, objective,
//! resonance whitelist, and the "realize" step that binds relative
//! predicates and tightens objective bounds from floor/ceiling predicates.

use crate::error::SemanticError;
use crate::objective::{Bound, Objective};
use crate::substat::{Flavor, Resonance};
use crate::topping::ToppingSet;
use crate::validity::{convert_and_fuzz, Comparator, Predicate, Validity};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// One cookie's fully-specified search problem, pre-realize.
#[derive(Debug, Clone)]
pub struct Requirements {
    pub name: String,
    pub validity: Vec<Validity>,
    pub objective: Objective,
    pub resonances: Vec<Resonance>,
    pub leaderboard_weight: Option<Decimal>,
}

/// The realized form: canonical predicates plus an objective whose bounds
/// have been tightened from any floor/ceiling predicates naming its own
/// substats.
#[derive(Debug, Clone)]
pub struct Realized {
    pub predicates: Vec<Predicate>,
    pub objective: Objective,
    pub resonances: Vec<Resonance>,
}

impl Requirements {
    /// Binds relative predicates against `solved`, fuzzes strict inequalities,
    /// collapses duplicate predicates on the same substat/direction keeping
    /// the tightest, and folds floor/ceiling predicates on the objective's own
    /// substats into that objective's pruning bounds.
    pub fn realize(&self, solved: &HashMap<String, ToppingSet>) -> Result<Realized, SemanticError> {
        let mut predicates = Vec::new();
        for v in &self.validity {
            predicates.extend(convert_and_fuzz(v, solved)?);
        }
        let predicates = collapse_tightest(predicates)?;

        let mut objective = self.objective.clone();
        if let Some(bounds) = objective.bounds_mut() {
            let types = objective.types();
            tighten_bounds(bounds, &predicates, &types);
        }

        Ok(Realized { predicates, objective, resonances: self.resonances.clone() })
    }
}

/// Keeps, per `(substat, comparator)` pair, only the tightest target:
/// largest target for `Ge`, smallest for `Le`. Detects the degenerate case
/// where a substat's collapsed `Ge` target exceeds its collapsed `Le` target
/// (an unsatisfiable pair) and reports it as a semantic error rather than
/// silently producing a search space that can never yield a result.
fn collapse_tightest(predicates: Vec<Predicate>) -> Result<Vec<Predicate>, SemanticError> {
    let mut tightest: HashMap<(Flavor, Comparator), Predicate> = HashMap::new();
    for p in predicates {
        tightest
            .entry((p.substat, p.comparator))
            .and_modify(|existing| {
                let tighter = match p.comparator {
                    Comparator::Ge => p.target > existing.target,
                    Comparator::Le => p.target < existing.target,
                };
                if tighter {
                    *existing = p;
                }
            })
            .or_insert(p);
    }

    let mut by_substat: HashMap<Flavor, (Option<Predicate>, Option<Predicate>)> = HashMap::new();
    for p in tightest.values() {
        let entry = by_substat.entry(p.substat).or_default();
        match p.comparator {
            Comparator::Ge => entry.0 = Some(*p),
            Comparator::Le => entry.1 = Some(*p),
        }
    }
    for (substat, (ge, le)) in &by_substat {
        if let (Some(ge), Some(le)) = (ge, le) {
            if ge.target > le.target {
                return Err(SemanticError::ContradictoryPredicates {
                    substat: *substat,
                    low: ge.to_string(),
                    high: le.to_string(),
                });
            }
        }
    }

    Ok(tightest.into_values().collect())
}

/// Folds any `Ge`/`Le` predicate on one of `types` into that substat's
/// `Bound`, overwriting whatever default bound the objective started with.
fn tighten_bounds(bounds: &mut HashMap<Flavor, Bound>, predicates: &[Predicate], types: &[Flavor]) {
    for p in predicates {
        if !types.contains(&p.substat) {
            continue;
        }
        let entry = bounds.entry(p.substat).or_default();
        let fraction = p.target / Decimal::ONE_HUNDRED;
        match p.comparator {
            Comparator::Ge => entry.min = Some(fraction),
            Comparator::Le => entry.max = Some(fraction),
        }
    }
}

/// Largest set-bonus tier attainable for `substat` given how many of the
/// five slots remain uncommitted, assuming every other already-fixed
/// flavor's own tier has already been accounted for separately.
///
/// Precondition: `fixed_same_flavor` only counts toppings whose flavor is
/// `substat` — mixing flavors here would double count against a single
/// set-bonus schedule that only looks at one flavor's tier table.
pub fn best_possible_set_effect(substat: Flavor, fixed_same_flavor: usize, slots_remaining: usize) -> (usize, Decimal) {
    debug_assert!(
        fixed_same_flavor <= 5,
        "best_possible_set_effect: fixed_same_flavor must not exceed the five-item set size"
    );
    let best_count = (fixed_same_flavor + slots_remaining).min(5);
    substat.info().set_effect(best_count)
}
