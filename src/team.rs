//! Greedy cookie-by-cookie team assembly: solve one cookie at a time,
//! shrinking the shared inventory by five after each success, carrying
//! forward already-solved cookies so later `Relative` predicates can
//! resolve against them.

use crate::optimizer::{Optimizer, Outcome};
use crate::progress::SharedProgress;
use crate::requirements::Requirements;
use crate::topping::{Topping, ToppingSet};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::time::Instant;

/// A solved cookie's selected set, its human-facing `fancy_value` projection,
/// and the leaderboard weight carried over from its requirements document
/// (`original_source/topping_bot/optimize/requirements.py::Requirements.weight`
/// — not acted on by the search itself, just threaded through to the result).
#[derive(Debug, Clone)]
pub struct SolvedCookie {
    pub set: ToppingSet,
    pub fancy_value: HashMap<&'static str, Decimal>,
    pub leaderboard_weight: Option<Decimal>,
}

/// One cookie's result within a team run.
#[derive(Debug, Clone)]
pub enum CookieOutcome {
    SetSelected(SolvedCookie),
    NoFeasibleSolution,
    Cancelled,
}

/// The result of running an entire team's worth of requirements.
#[derive(Debug, Clone)]
pub struct TeamResult {
    pub solved: HashMap<String, ToppingSet>,
    pub outcomes: Vec<(String, CookieOutcome)>,
    /// Whatever inventory remains after every successfully-solved cookie's
    /// five toppings were removed.
    pub remaining_inventory: Vec<Topping>,
}

/// Solves each of `requirements` in order, removing a successful cookie's
/// five toppings from the shared inventory before moving to the next. Stops
/// early (without attempting later cookies) on the first `Cancelled`.
pub fn solve_team(
    requirements: &[Requirements],
    inventory: Vec<Topping>,
    progress: SharedProgress,
    deadline: Instant,
) -> TeamResult {
    let mut remaining = inventory;
    let mut solved = HashMap::new();
    let mut outcomes = Vec::new();

    for req in requirements {
        let realized = match req.realize(&solved) {
            Ok(r) => r,
            Err(_) => {
                outcomes.push((req.name.clone(), CookieOutcome::NoFeasibleSolution));
                continue;
            }
        };

        let outcome = Optimizer::new(&realized, &remaining, progress.clone(), deadline).solve();
        match outcome {
            Outcome::SetSelected(set) => {
                // Remove exactly the five chosen toppings, one at a time by
                // first-match position, rather than filtering by value —
                // duplicate-valued toppings (the common case for farmed
                // inventory) would otherwise all be dropped together.
                for chosen in set.toppings() {
                    if let Some(pos) = remaining.iter().position(|t| t == chosen) {
                        remaining.remove(pos);
                    }
                }
                let fancy_value = realized.objective.fancy_value(&set);
                solved.insert(req.name.clone(), set.clone());
                outcomes.push((
                    req.name.clone(),
                    CookieOutcome::SetSelected(SolvedCookie {
                        set,
                        fancy_value,
                        leaderboard_weight: req.leaderboard_weight,
                    }),
                ));
            }
            Outcome::NoFeasibleSolution => {
                outcomes.push((req.name.clone(), CookieOutcome::NoFeasibleSolution));
            }
            Outcome::Cancelled => {
                outcomes.push((req.name.clone(), CookieOutcome::Cancelled));
                break;
            }
        }
    }

    TeamResult { solved, outcomes, remaining_inventory: remaining }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::Objective;
    use crate::substat::{Flavor, Resonance};
    use rust_decimal_macros::dec;

    fn topping(flavor: Flavor, main: rust_decimal::Decimal) -> Topping {
        Topping::new(vec![(flavor, main)], Resonance::Normal)
    }

    #[test]
    fn successful_cookie_shrinks_inventory_by_exactly_five() {
        // All ten toppings share a value on purpose: a removal that matches
        // by value instead of by position would drop every one of them
        // (they're all equal to each of the five chosen), not just five.
        let inventory: Vec<Topping> = (0..10).map(|_| topping(Flavor::Atk, dec!(9))).collect();
        let requirements = vec![Requirements {
            name: "Squid".into(),
            validity: vec![],
            objective: Objective::Single(Flavor::Atk),
            resonances: vec![Resonance::Normal],
            leaderboard_weight: None,
        }];
        let progress = SharedProgress::new();
        let deadline = Instant::now() + std::time::Duration::from_secs(5);
        let result = solve_team(&requirements, inventory, progress, deadline);
        assert_eq!(result.remaining_inventory.len(), 5);
        assert!(result.solved.contains_key("Squid"));
    }

    #[test]
    fn second_cookie_can_resolve_a_relative_predicate_against_the_first() {
        let mut inventory: Vec<Topping> = Vec::new();
        for _ in 0..5 {
            inventory.push(topping(Flavor::Cd, dec!(3)));
        }
        for _ in 0..5 {
            inventory.push(topping(Flavor::Cd, dec!(1)));
        }
        let requirements = vec![
            Requirements {
                name: "Squid".into(),
                validity: vec![],
                objective: Objective::Single(Flavor::Cd),
                resonances: vec![Resonance::Normal],
                leaderboard_weight: None,
            },
            Requirements {
                name: "Pitaya".into(),
                validity: vec![crate::validity::Validity::parse("Cooldown below Squid").unwrap()],
                objective: Objective::Single(Flavor::Cd),
                resonances: vec![Resonance::Normal],
                leaderboard_weight: None,
            },
        ];
        let progress = SharedProgress::new();
        let deadline = Instant::now() + std::time::Duration::from_secs(5);
        let result = solve_team(&requirements, inventory, progress, deadline);
        assert!(matches!(
            result.outcomes[1].1,
            CookieOutcome::SetSelected(_) | CookieOutcome::NoFeasibleSolution
        ));
    }
}
