//! Depth-first branch-and-bound search over five-item topping sets.
//!
//! Grounded on the source's `Optimizer`/`Cutter` pair (`optimize.py`,
//! `cutter.py`): a frame-level feasibility/bound check (`prune`) gates
//! whether a prefix's sibling loop is even attempted, and every candidate
//! tried in that loop is checked against five Pareto-dominance planes
//! (`crate::cutter::Cutter`) before recursing. Never a `None`-as-negative-
//! infinity sentinel (`spec.md` §9: the source's `max(None, candidate)`
//! pattern relies on Python's arbitrary cross-type ordering and is replaced
//! here with an explicit `Option<ToppingSet>` match at every comparison
//! site).

use crate::cutter::Cutter;
use crate::objective::Objective;
use crate::progress::SharedProgress;
use crate::requirements::Realized;
use crate::substat::Flavor;
use crate::topping::{Topping, ToppingSet};
use crate::validity::{Comparator, Predicate};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::time::Instant;

const SET_SIZE: usize = 5;

/// The three terminal outcomes a search can produce. Deliberately not an
/// error: running out of feasible sets or being asked to stop are expected,
/// structured results, not failures (`spec.md` §7).
#[derive(Debug, Clone)]
pub enum Outcome {
    SetSelected(ToppingSet),
    NoFeasibleSolution,
    Cancelled,
}

pub struct Optimizer<'a> {
    requirements: &'a Realized,
    inventory: Vec<&'a Topping>,
    progress: SharedProgress,
    deadline: Instant,
    cutter: Cutter,
    incumbent: Option<ToppingSet>,
    incumbent_value: Decimal,
    /// Substats named by a `Ge` predicate.
    floor_substats: Vec<Flavor>,
    /// Substats named by a `Le` predicate.
    ceiling_substats: Vec<Flavor>,
    /// Floor substats the objective doesn't itself read.
    valid_substats: Vec<Flavor>,
    /// The objective's own substat tuple.
    objective_substats: Vec<Flavor>,
    /// `valid_substats` union `objective_substats`.
    all_substats: Vec<Flavor>,
}

impl<'a> Optimizer<'a> {
    pub fn new(requirements: &'a Realized, inventory: &'a [Topping], progress: SharedProgress, deadline: Instant) -> Self {
        let mut inventory: Vec<&'a Topping> = inventory
            .iter()
            .filter(|t| requirements.resonances.contains(&t.resonance()))
            .collect();
        presort(&mut inventory, &requirements.objective);

        let floor_substats: Vec<Flavor> = requirements
            .predicates
            .iter()
            .filter(|p| p.comparator == Comparator::Ge)
            .map(|p| p.substat)
            .collect();
        let ceiling_substats: Vec<Flavor> = requirements
            .predicates
            .iter()
            .filter(|p| p.comparator == Comparator::Le)
            .map(|p| p.substat)
            .collect();
        let objective_substats = requirements.objective.types();
        let valid_substats: Vec<Flavor> =
            floor_substats.iter().copied().filter(|s| !objective_substats.contains(s)).collect();
        let mut all_substats = valid_substats.clone();
        for &s in &objective_substats {
            if !all_substats.contains(&s) {
                all_substats.push(s);
            }
        }

        Self {
            requirements,
            inventory,
            progress,
            deadline,
            cutter: Cutter::new(),
            incumbent: None,
            incumbent_value: Decimal::MIN,
            floor_substats,
            ceiling_substats,
            valid_substats,
            objective_substats,
            all_substats,
        }
    }

    pub fn solve(mut self) -> Outcome {
        let mut prefix: Vec<Topping> = Vec::with_capacity(SET_SIZE);
        self.dfs(0, &mut prefix);
        match self.incumbent {
            Some(set) => Outcome::SetSelected(set),
            None if self.progress.is_cancelled() => Outcome::Cancelled,
            None => Outcome::NoFeasibleSolution,
        }
    }

    fn dfs(&mut self, start: usize, prefix: &mut Vec<Topping>) {
        if Instant::now() >= self.deadline || self.progress.is_cancelled() {
            self.progress.cancel();
            return;
        }
        self.progress.record_frame(prefix.len() as u64);

        if prefix.len() == SET_SIZE {
            self.consider_complete(prefix);
            return;
        }

        let tail = self.tail_toppings(start);
        if self.prune(prefix, &tail) {
            return;
        }

        self.cutter.push();
        for i in start..self.inventory.len() {
            if prefix.len() + (self.inventory.len() - i) < SET_SIZE {
                break;
            }
            let candidate: Topping = (*self.inventory[i]).clone();
            if !candidate.validate() {
                continue;
            }

            if self.candidate_is_dominated(&candidate) {
                continue;
            }

            prefix.push(candidate);
            self.dfs(i + 1, prefix);
            prefix.pop();
            if self.progress.is_cancelled() {
                break;
            }
        }
        self.cutter.pop();
    }

    /// Checks `candidate` against all five dominance planes, in turn
    /// recording its values into whichever plane didn't already dominate it
    /// (`crate::cutter::Cutter::prune_*` both checks and updates in one
    /// call). A candidate dominated on any plane need not be tried: a
    /// previous sibling already reaches at least as far on every dimension
    /// that plane tracks.
    fn candidate_is_dominated(&mut self, candidate: &Topping) -> bool {
        if !self.floor_substats.is_empty() {
            let values = value_map(candidate, &self.floor_substats);
            if self.cutter.prune_floor(&values) {
                return true;
            }
        }
        if !self.ceiling_substats.is_empty() {
            let values = value_map(candidate, &self.ceiling_substats);
            if self.cutter.prune_ceiling(&values) {
                return true;
            }
        }
        if !self.valid_substats.is_empty() {
            let values = value_map(candidate, &self.valid_substats);
            if self.cutter.prune_valid_combined(&values) {
                return true;
            }
        }
        if self.cutter.prune_objective_combined(candidate.value(&self.objective_substats)) {
            return true;
        }
        if !self.all_substats.is_empty() {
            let values = value_map(candidate, &self.all_substats);
            if self.cutter.prune_all_combined(&values) {
                return true;
            }
        }
        false
    }

    fn consider_complete(&mut self, prefix: &[Topping]) {
        let Some(set) = ToppingSet::from_vec(prefix.to_vec()) else { return };
        if !predicates_hold(&self.requirements.predicates, &set) {
            return;
        }
        let value = self.requirements.objective.value(&set);
        if value > self.incumbent_value {
            self.incumbent_value = value;
            self.progress.record_incumbent(value);
            self.incumbent = Some(set);
        }
    }

    /// Frame-level feasibility/bound check, grounded on `optimize.py`'s
    /// `_prune`: is there any way at all to complete `prefix` with `tail`
    /// that could (1) satisfy every predicate and (2) possibly beat the
    /// incumbent? Returns `true` when the whole prefix — not just one
    /// candidate — should be abandoned without trying any sibling.
    fn prune(&self, prefix: &[Topping], tail: &[Topping]) -> bool {
        let remaining = SET_SIZE - prefix.len();

        // Floor predicates: is there a completion reaching every `Ge` target?
        let mut required: HashMap<Flavor, usize> = HashMap::new();
        for p in &self.requirements.predicates {
            if p.comparator != Comparator::Ge {
                continue;
            }
            match required_count_where(prefix, tail, &[p.substat], |v| p.comparator.test(v, p.target)) {
                Some(count) => {
                    required.insert(p.substat, count);
                }
                None => return true,
            }
        }

        // Objective floor: can the objective's own substats still beat the
        // incumbent's floor, once the incumbent exists?
        let have_incumbent = self.incumbent.is_some();
        let mut objective_required = 0usize;
        if have_incumbent {
            let floor = self.requirements.objective.floor(self.incumbent.as_ref().unwrap());
            match required_count_where(prefix, tail, &self.objective_substats, |v| v > floor) {
                Some(count) => {
                    let already: usize = self.objective_substats.iter().filter_map(|s| required.get(s)).sum();
                    objective_required = count.saturating_sub(already);
                }
                None => return true,
            }
        }

        // Fatal: the floor and objective requirements can't fit in what's left.
        let total_required = required.values().sum::<usize>() + objective_required;
        if total_required > remaining {
            return true;
        }

        // Combined-valid: best attainable validity total still clears the
        // sum of floor targets? (Fatal if not — mirrors the early return in
        // the source rather than the accumulate-and-continue the other two
        // combined checks use.)
        if have_incumbent && !self.valid_substats.is_empty() {
            let baseline = self.floor_target_sum(&self.valid_substats);
            let combined = best_combined_set(prefix, tail, &required, &self.valid_substats)
                .map(|s| s.value(&self.valid_substats) - baseline);
            if combined.is_none_or(|c| c < Decimal::ZERO) {
                return true;
            }
        }

        // Combined-objective / combined-all: EDMG and Vitality specialize
        // these into a wildcard-partition sweep between their two substats
        // (`optimize.py`'s ATK/CRIT and DMGRES/HP loops); everything else
        // gets the plain best-case check.
        let mut combined_all_fails = false;
        let mut combined_objective_fails = false;
        if have_incumbent {
            match &self.requirements.objective {
                Objective::EDmg { .. } => {
                    let (all_ok, obj_ok) =
                        self.special_partition_check(prefix, tail, &required, Flavor::Atk, Flavor::Crit, true);
                    combined_all_fails = !all_ok;
                    combined_objective_fails = !obj_ok;
                }
                Objective::Vitality { .. } => {
                    let (all_ok, obj_ok) =
                        self.special_partition_check(prefix, tail, &required, Flavor::DmgRes, Flavor::Hp, false);
                    combined_all_fails = !all_ok;
                    combined_objective_fails = !obj_ok;
                }
                _ => {
                    let incumbent = self.incumbent.as_ref().unwrap();
                    let all_baseline = self.floor_target_sum(&self.valid_substats);
                    let all_combined = best_combined_set(prefix, tail, &required, &self.all_substats)
                        .map(|s| s.value(&self.all_substats) - all_baseline);
                    combined_all_fails = all_combined.is_none_or(|c| c <= Decimal::ZERO);

                    let obj_floor = self.requirements.objective.floor(incumbent);
                    let obj_combined = best_combined_set(prefix, tail, &required, &self.objective_substats)
                        .map(|s| s.value(&self.objective_substats) - obj_floor);
                    combined_objective_fails = obj_combined.is_none_or(|c| c <= Decimal::ZERO);
                }
            }
        }

        // Ceiling predicates, checked last (the source runs this after the
        // combined-pool checks rather than short-circuiting on it).
        let mut ceiling_fails = false;
        for p in &self.requirements.predicates {
            if p.comparator != Comparator::Le {
                continue;
            }
            match worst_case_set(prefix, tail, p.substat, remaining) {
                Some(set) if p.comparator.test(set.value_one(p.substat), p.target) => {}
                _ => ceiling_fails = true,
            }
        }

        combined_all_fails || combined_objective_fails || ceiling_fails
    }

    fn floor_target(&self, substat: Flavor) -> Decimal {
        self.requirements
            .predicates
            .iter()
            .find(|p| p.substat == substat && p.comparator == Comparator::Ge)
            .map(|p| p.target)
            .unwrap_or(Decimal::ZERO)
    }

    fn floor_target_sum(&self, substats: &[Flavor]) -> Decimal {
        substats.iter().map(|&s| self.floor_target(s)).sum()
    }

    /// EDMG/Vitality's specialization: partitions the truly-uncommitted
    /// slots between `primary` and `secondary`, one unit at a time, and asks
    /// whether any partition's best-case completion could still beat the
    /// incumbent. Returns `(all_substats survives, objective_substats
    /// survives)`.
    fn special_partition_check(
        &self,
        prefix: &[Topping],
        tail: &[Topping],
        required: &HashMap<Flavor, usize>,
        primary: Flavor,
        secondary: Flavor,
        shift_secondary: bool,
    ) -> (bool, bool) {
        let remaining = SET_SIZE - prefix.len();
        let committed: usize = required.values().sum();
        let wildcard_count = remaining.saturating_sub(committed);
        if wildcard_count == 0 {
            return (false, false);
        }

        let all_baseline = self.floor_target_sum(&self.valid_substats);
        let all_upper = self.partition_best_upper(
            prefix,
            tail,
            required,
            &self.all_substats,
            primary,
            secondary,
            shift_secondary,
            wildcard_count,
            all_baseline,
        );
        let obj_upper = self.partition_best_upper(
            prefix,
            tail,
            required,
            &self.objective_substats,
            primary,
            secondary,
            shift_secondary,
            wildcard_count,
            Decimal::ZERO,
        );

        (
            all_upper.is_some_and(|u| u > self.incumbent_value),
            obj_upper.is_some_and(|u| u > self.incumbent_value),
        )
    }

    /// Sweeps `wildcard_count` ways of splitting the uncommitted slots
    /// between `primary` and `secondary` (all to `primary` first, shifting
    /// one unit at a time), returning the best `Objective::upper` reached
    /// across every partition that was buildable at all.
    fn partition_best_upper(
        &self,
        prefix: &[Topping],
        tail: &[Topping],
        required: &HashMap<Flavor, usize>,
        rank_substats: &[Flavor],
        primary: Flavor,
        secondary: Flavor,
        shift_secondary: bool,
        wildcard_count: usize,
        baseline: Decimal,
    ) -> Option<Decimal> {
        let mut reqs = required.clone();
        *reqs.entry(primary).or_insert(0) += wildcard_count - 1;

        let mut best: Option<Decimal> = None;
        for step in 0..wildcard_count {
            if step > 0 {
                if let Some(slot) = reqs.get_mut(&primary) {
                    *slot = slot.saturating_sub(1);
                }
                if shift_secondary {
                    *reqs.entry(secondary).or_insert(0) += 1;
                }
            }
            if let Some(full_set) = best_combined_set(prefix, tail, &reqs, rank_substats) {
                let combined = full_set.value(rank_substats) - baseline;
                if combined > Decimal::ZERO {
                    let upper = self.requirements.objective.upper(combined, &full_set, prefix);
                    best = Some(best.map_or(upper, |b: Decimal| b.max(upper)));
                }
            }
        }
        best
    }

    fn tail_toppings(&self, start: usize) -> Vec<Topping> {
        self.inventory[start..].iter().map(|t| (**t).clone()).collect()
    }
}

fn value_map(topping: &Topping, substats: &[Flavor]) -> HashMap<Flavor, Decimal> {
    substats.iter().map(|&s| (s, topping.value_one(s))).collect()
}

fn predicates_hold(predicates: &[Predicate], set: &ToppingSet) -> bool {
    predicates.iter().all(|p| p.comparator.test(set.value_one(p.substat), p.target))
}

/// Smallest `match_count` (from 0 up to the remaining slot count) for which
/// the best-case completion's combined value over `substats` satisfies
/// `holds`, or `None` if no count works.
fn required_count_where(
    prefix: &[Topping],
    tail: &[Topping],
    substats: &[Flavor],
    mut holds: impl FnMut(Decimal) -> bool,
) -> Option<usize> {
    let remaining = SET_SIZE - prefix.len();
    for match_count in 0..=remaining {
        let wildcard_count = remaining - match_count;
        if let Some(set) = best_case_set(prefix, tail, substats, match_count, wildcard_count) {
            if holds(set.value(substats)) {
                return Some(match_count);
            }
        }
    }
    None
}

/// Hypothetical completion of `prefix` using the `match_count` highest
/// `substats`-flavored toppings in `tail` plus the `wildcard_count` highest
/// remaining toppings by the same ranking (`optimize.py`'s `_floor_check`
/// shape, shared with the objective-floor check).
fn best_case_set(
    prefix: &[Topping],
    tail: &[Topping],
    substats: &[Flavor],
    match_count: usize,
    wildcard_count: usize,
) -> Option<ToppingSet> {
    if prefix.len() == SET_SIZE {
        return ToppingSet::from_vec(prefix.to_vec());
    }
    let mut matched: Vec<&Topping> = tail.iter().filter(|t| substats.contains(&t.flavor())).collect();
    matched.sort_by(|a, b| b.value(substats).cmp(&a.value(substats)));
    let mut wild: Vec<&Topping> = tail.iter().filter(|t| !substats.contains(&t.flavor())).collect();
    wild.sort_by(|a, b| b.value(substats).cmp(&a.value(substats)));
    if matched.len() < match_count || wild.len() < wildcard_count {
        return None;
    }
    let mut full = prefix.to_vec();
    full.extend(matched.into_iter().take(match_count).cloned());
    full.extend(wild.into_iter().take(wildcard_count).cloned());
    ToppingSet::from_vec(full)
}

/// Worst-case completion of `prefix`: the `remaining` lowest-`substat`
/// toppings in `tail`, used by the ceiling check (`optimize.py`'s
/// `_ceiling_check`).
fn worst_case_set(prefix: &[Topping], tail: &[Topping], substat: Flavor, remaining: usize) -> Option<ToppingSet> {
    if tail.len() < remaining {
        return None;
    }
    let mut sorted: Vec<&Topping> = tail.iter().collect();
    sorted.sort_by(|a, b| a.value_one(substat).cmp(&b.value_one(substat)));
    let mut full = prefix.to_vec();
    full.extend(sorted.into_iter().take(remaining).cloned());
    ToppingSet::from_vec(full)
}

/// Builds the best attainable five-item completion given a per-substat
/// requirement map (how many `tail` items of each flavor must be included),
/// filling any remaining slots with the highest-`rank_substats` leftovers.
/// Mirrors `optimize.py`'s `_best_combined_case`.
fn best_combined_set(
    prefix: &[Topping],
    tail: &[Topping],
    required: &HashMap<Flavor, usize>,
    rank_substats: &[Flavor],
) -> Option<ToppingSet> {
    let mut used = vec![false; tail.len()];
    let mut chosen: Vec<Topping> = Vec::new();

    for (&substat, &count) in required {
        if count == 0 {
            continue;
        }
        let mut idxs: Vec<usize> = (0..tail.len()).filter(|&i| !used[i] && tail[i].flavor() == substat).collect();
        idxs.sort_by(|&a, &b| tail[b].value(rank_substats).cmp(&tail[a].value(rank_substats)));
        for &i in idxs.iter().take(count) {
            used[i] = true;
            chosen.push(tail[i].clone());
        }
    }

    let mut full = prefix.to_vec();
    full.extend(chosen);
    if full.len() < SET_SIZE {
        let mut idxs: Vec<usize> = (0..tail.len()).filter(|&i| !used[i]).collect();
        idxs.sort_by(|&a, &b| tail[b].value(rank_substats).cmp(&tail[a].value(rank_substats)));
        let need = SET_SIZE - full.len();
        full.extend(idxs.into_iter().take(need).map(|i| tail[i].clone()));
    }
    ToppingSet::from_vec(full)
}

/// Orders candidates so branches most likely to improve the incumbent are
/// explored first. Vitality objectives presort DMGRES-flavored toppings
/// first (`spec.md` §9 / Design Notes): DMGRES is the scarcer, higher-payoff
/// substat for that objective's marginal return, so fixing it early prunes
/// harder sooner.
fn presort(inventory: &mut [&Topping], objective: &Objective) {
    let types = objective.types();
    let dmgres_first = matches!(objective, Objective::Vitality { .. });
    inventory.sort_by(|a, b| {
        if dmgres_first {
            let a_dmgres = a.flavor() == Flavor::DmgRes;
            let b_dmgres = b.flavor() == Flavor::DmgRes;
            if a_dmgres != b_dmgres {
                return b_dmgres.cmp(&a_dmgres);
            }
        }
        let a_val: Decimal = types.iter().map(|s| a.value_one(*s)).sum();
        let b_val: Decimal = types.iter().map(|s| b.value_one(*s)).sum();
        b_val.cmp(&a_val)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::Requirements;
    use crate::substat::Resonance;
    use rust_decimal_macros::dec;
    use std::time::Duration;

    fn topping(flavor: Flavor, main: Decimal) -> Topping {
        Topping::new(vec![(flavor, main)], Resonance::Normal)
    }

    #[test]
    fn single_objective_with_no_validity_picks_the_five_highest_toppings() {
        let mut inventory = Vec::new();
        for v in [9, 8, 7, 6, 5, 4, 3] {
            inventory.push(topping(Flavor::Atk, Decimal::from(v)));
        }
        let requirements = Requirements {
            name: "Squid".into(),
            validity: vec![],
            objective: Objective::Single(Flavor::Atk),
            resonances: vec![Resonance::Normal],
            leaderboard_weight: None,
        };
        let realized = requirements.realize(&HashMap::new()).unwrap();
        let progress = SharedProgress::new();
        let deadline = Instant::now() + Duration::from_secs(5);
        let outcome = Optimizer::new(&realized, &inventory, progress, deadline).solve();
        match outcome {
            Outcome::SetSelected(set) => {
                assert_eq!(set.raw(Flavor::Atk), Decimal::from(9 + 8 + 7 + 6 + 5));
            }
            other => panic!("expected SetSelected, got {other:?}"),
        }
    }

    #[test]
    fn impossible_floor_predicate_yields_no_feasible_solution() {
        let inventory: Vec<Topping> = (0..6).map(|_| topping(Flavor::Atk, dec!(1))).collect();
        let requirements = Requirements {
            name: "Squid".into(),
            validity: vec![crate::validity::Validity::parse("ATK >= 50").unwrap()],
            objective: Objective::Single(Flavor::Atk),
            resonances: vec![Resonance::Normal],
            leaderboard_weight: None,
        };
        let realized = requirements.realize(&HashMap::new()).unwrap();
        let progress = SharedProgress::new();
        let deadline = Instant::now() + Duration::from_secs(5);
        let outcome = Optimizer::new(&realized, &inventory, progress, deadline).solve();
        assert!(matches!(outcome, Outcome::NoFeasibleSolution));
    }

    #[test]
    fn already_cancelled_progress_yields_cancelled_outcome() {
        let inventory: Vec<Topping> = (0..6).map(|_| topping(Flavor::Atk, dec!(9))).collect();
        let requirements = Requirements {
            name: "Squid".into(),
            validity: vec![],
            objective: Objective::Single(Flavor::Atk),
            resonances: vec![Resonance::Normal],
            leaderboard_weight: None,
        };
        let realized = requirements.realize(&HashMap::new()).unwrap();
        let progress = SharedProgress::new();
        progress.cancel();
        let deadline = Instant::now() + Duration::from_secs(5);
        let outcome = Optimizer::new(&realized, &inventory, progress, deadline).solve();
        assert!(matches!(outcome, Outcome::Cancelled));
    }

    #[test]
    fn ceiling_predicate_excludes_sets_that_would_exceed_it() {
        let mut inventory: Vec<Topping> = (0..4).map(|_| topping(Flavor::Cd, dec!(3))).collect();
        inventory.extend((0..4).map(|_| topping(Flavor::Cd, dec!(1))));
        let requirements = Requirements {
            name: "Pitaya".into(),
            validity: vec![crate::validity::Validity::parse("Cooldown <= 10").unwrap()],
            objective: Objective::Single(Flavor::Cd),
            resonances: vec![Resonance::Normal],
            leaderboard_weight: None,
        };
        let realized = requirements.realize(&HashMap::new()).unwrap();
        let progress = SharedProgress::new();
        let deadline = Instant::now() + Duration::from_secs(5);
        let outcome = Optimizer::new(&realized, &inventory, progress, deadline).solve();
        match outcome {
            Outcome::SetSelected(set) => assert!(set.raw(Flavor::Cd) <= dec!(10)),
            other => panic!("expected SetSelected, got {other:?}"),
        }
    }

    #[test]
    fn conflicting_floor_requirements_on_distinct_substats_yield_no_feasible_solution() {
        // Each topping carries exactly one flavor, so a set satisfying both
        // an ATK floor and an HP floor needs more slots than five can cover
        // once both floors are set high enough to need all five toppings.
        let mut inventory: Vec<Topping> = (0..5).map(|_| topping(Flavor::Atk, dec!(9))).collect();
        inventory.extend((0..5).map(|_| topping(Flavor::Hp, dec!(9))));
        let requirements = Requirements {
            name: "Squid".into(),
            validity: vec![
                crate::validity::Validity::parse("ATK >= 45").unwrap(),
                crate::validity::Validity::parse("HP >= 45").unwrap(),
            ],
            objective: Objective::Single(Flavor::Atk),
            resonances: vec![Resonance::Normal],
            leaderboard_weight: None,
        };
        let realized = requirements.realize(&HashMap::new()).unwrap();
        let progress = SharedProgress::new();
        let deadline = Instant::now() + Duration::from_secs(5);
        let outcome = Optimizer::new(&realized, &inventory, progress, deadline).solve();
        assert!(matches!(outcome, Outcome::NoFeasibleSolution));
    }

    #[test]
    fn edmg_objective_finds_a_reasonable_set_without_hanging() {
        let mods = crate::objective::Modifiers {
            base_atk: dec!(100),
            base_crit: dec!(13),
            crit_dmg: dec!(190),
            atk_mult: Decimal::ZERO,
            base_hp: dec!(100),
            base_dmgres: Decimal::ZERO,
        };
        let mut inventory: Vec<Topping> = (0..8).map(|_| topping(Flavor::Atk, dec!(9))).collect();
        inventory.extend((0..8).map(|_| topping(Flavor::Crit, dec!(9))));
        let requirements = Requirements {
            name: "Pitaya".into(),
            validity: vec![],
            objective: Objective::edmg(mods),
            resonances: vec![Resonance::Normal],
            leaderboard_weight: None,
        };
        let realized = requirements.realize(&HashMap::new()).unwrap();
        let progress = SharedProgress::new();
        let deadline = Instant::now() + Duration::from_secs(5);
        let outcome = Optimizer::new(&realized, &inventory, progress, deadline).solve();
        match outcome {
            Outcome::SetSelected(set) => {
                assert_eq!(set.toppings().len(), 5);
            }
            other => panic!("expected SetSelected, got {other:?}"),
        }
    }
}
