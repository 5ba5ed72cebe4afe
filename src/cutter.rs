//! Pareto-dominance pruning planes used during branch-and-bound search.
//!
//! Grounded on the source's standalone `Cutter` class: five cooperating
//! dominance checks (floor, ceiling, valid-combined, objective-combined,
//! all-combined), each scoped to the current search frame and popped when
//! the frame backtracks.

use crate::substat::Flavor;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// One frame's recorded extremes per substat, used to decide whether a
/// sibling branch can possibly beat the frame that already ran.
#[derive(Debug, Clone)]
struct Frame {
    floor: HashMap<Flavor, Decimal>,
    ceiling: HashMap<Flavor, Decimal>,
    valid_combined: HashMap<Flavor, Decimal>,
    objective_combined: Decimal,
    all_combined: HashMap<Flavor, Decimal>,
}

impl Default for Frame {
    /// `objective_combined` starts at `Decimal::MIN`, not `0`, so the first
    /// sibling in a frame is never dominated even when its own combined
    /// value is exactly zero (e.g. a candidate whose flavor doesn't touch
    /// any objective substat at all).
    fn default() -> Self {
        Self {
            floor: HashMap::new(),
            ceiling: HashMap::new(),
            valid_combined: HashMap::new(),
            objective_combined: Decimal::MIN,
            all_combined: HashMap::new(),
        }
    }
}

/// Tracks Pareto-dominance across sibling branches at every depth of the
/// search tree. `push`/`pop` bracket one frame's lifetime; `prune` is only
/// meaningful between a matching `push` and `pop`.
#[derive(Debug, Default)]
pub struct Cutter {
    frames: Vec<Frame>,
}

impl Cutter {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    pub fn push(&mut self) {
        self.frames.push(Frame::default());
    }

    pub fn pop(&mut self) {
        self.frames.pop();
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    fn top(&self) -> &Frame {
        self.frames.last().expect("Cutter::prune called outside any pushed frame")
    }

    fn top_mut(&mut self) -> &mut Frame {
        self.frames.last_mut().expect("Cutter::prune called outside any pushed frame")
    }

    /// True if a branch whose per-substat floors are all `<=` a
    /// previously-recorded sibling's floors can be skipped: it cannot carry
    /// any substat further than that sibling already did.
    pub fn prune_floor(&mut self, floors: &HashMap<Flavor, Decimal>) -> bool {
        let dominated = {
            let frame = self.top();
            floors
                .iter()
                .all(|(s, v)| frame.floor.get(s).is_some_and(|best| best >= v))
        };
        if !dominated {
            let frame = self.top_mut();
            for (&s, &v) in floors {
                frame.floor.entry(s).and_modify(|best| *best = (*best).max(v)).or_insert(v);
            }
        }
        dominated
    }

    /// Symmetric to [`Cutter::prune_floor`] but for upper bounds: a branch
    /// whose ceilings are all `<=` a sibling's recorded ceilings can never
    /// exceed what that sibling can reach.
    pub fn prune_ceiling(&mut self, ceilings: &HashMap<Flavor, Decimal>) -> bool {
        let dominated = {
            let frame = self.top();
            ceilings
                .iter()
                .all(|(s, v)| frame.ceiling.get(s).is_some_and(|best| best >= v))
        };
        if !dominated {
            let frame = self.top_mut();
            for (&s, &v) in ceilings {
                frame.ceiling.entry(s).and_modify(|best| *best = (*best).max(v)).or_insert(v);
            }
        }
        dominated
    }

    /// Combined dominance over every substat this cookie's validity
    /// predicates mention at once: a branch whose whole vector is
    /// coordinate-wise dominated by a recorded sibling is redundant.
    pub fn prune_valid_combined(&mut self, values: &HashMap<Flavor, Decimal>) -> bool {
        let dominated = {
            let frame = self.top();
            !frame.valid_combined.is_empty()
                && values
                    .iter()
                    .all(|(s, v)| frame.valid_combined.get(s).is_some_and(|best| best >= v))
        };
        if !dominated {
            let frame = self.top_mut();
            for (&s, &v) in values {
                frame.valid_combined.entry(s).and_modify(|best| *best = (*best).max(v)).or_insert(v);
            }
        }
        dominated
    }

    /// A branch whose best-possible objective value cannot exceed the best
    /// objective value already seen among this frame's siblings is pruned.
    pub fn prune_objective_combined(&mut self, upper: Decimal) -> bool {
        let frame = self.top();
        let dominated = upper <= frame.objective_combined;
        if !dominated {
            self.top_mut().objective_combined = upper;
        }
        dominated
    }

    /// The strictest plane: combines every substat this cookie's requirements
    /// reference (validity and objective alike) into one dominance check.
    pub fn prune_all_combined(&mut self, values: &HashMap<Flavor, Decimal>) -> bool {
        let dominated = {
            let frame = self.top();
            !frame.all_combined.is_empty()
                && values
                    .iter()
                    .all(|(s, v)| frame.all_combined.get(s).is_some_and(|best| best >= v))
        };
        if !dominated {
            let frame = self.top_mut();
            for (&s, &v) in values {
                frame.all_combined.entry(s).and_modify(|best| *best = (*best).max(v)).or_insert(v);
            }
        }
        dominated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn first_branch_in_a_frame_is_never_pruned() {
        let mut cutter = Cutter::new();
        cutter.push();
        let mut values = HashMap::new();
        values.insert(Flavor::Atk, dec!(10));
        assert!(!cutter.prune_floor(&values));
    }

    #[test]
    fn dominated_branch_is_pruned_within_a_frame() {
        let mut cutter = Cutter::new();
        cutter.push();
        let mut strong = HashMap::new();
        strong.insert(Flavor::Atk, dec!(20));
        assert!(!cutter.prune_floor(&strong));

        let mut weak = HashMap::new();
        weak.insert(Flavor::Atk, dec!(10));
        assert!(cutter.prune_floor(&weak));
    }

    #[test]
    fn pop_resets_dominance_state_for_the_next_sibling_group() {
        let mut cutter = Cutter::new();
        cutter.push();
        let mut strong = HashMap::new();
        strong.insert(Flavor::Atk, dec!(20));
        cutter.prune_floor(&strong);
        cutter.pop();

        cutter.push();
        let mut weak = HashMap::new();
        weak.insert(Flavor::Atk, dec!(10));
        assert!(!cutter.prune_floor(&weak));
    }

    #[test]
    fn objective_combined_only_prunes_non_improving_upper_bounds() {
        let mut cutter = Cutter::new();
        cutter.push();
        assert!(!cutter.prune_objective_combined(dec!(50)));
        assert!(cutter.prune_objective_combined(dec!(40)));
        assert!(!cutter.prune_objective_combined(dec!(60)));
    }
}
