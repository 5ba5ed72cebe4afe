//! Tiered error types (`spec.md` §7): parse errors, semantic errors, and
//! invariant violations each get a distinct, matchable signal rather than a
//! single `anyhow::anyhow!` string. Search outcomes (`SetSelected` /
//! `NoFeasibleSolution` / `Cancelled`, see `crate::team`) are not errors at
//! all — they're a normal three-way result.

use thiserror::Error;

/// Malformed input text: a validity expression, a CSV row, or a requirements
/// document that doesn't parse at all.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unrecognized validity expression: {0:?}")]
    Validity(String),

    #[error("malformed topping row: {0:?}")]
    ToppingRow(String),

    #[error("wrong column count in topping row: expected {expected}, got {actual} in {row:?}")]
    ColumnCount { expected: usize, actual: usize, row: String },

    #[error("unknown flavor or resonance name: {0:?}")]
    UnknownName(String),

    #[error("invalid requirements document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid decimal literal: {0:?}")]
    Decimal(String),
}

/// Parses successfully but is invalid once resolved against the rest of the
/// problem: a relative predicate naming a cookie that hasn't solved yet, a
/// requirements document naming an unknown flavor, a combo objective with
/// duplicate substats, and similar.
#[derive(Debug, Error)]
pub enum SemanticError {
    #[error("relative predicate refers to unsolved cookie {0:?}")]
    UnknownRelativeCookie(String),

    #[error("objective substat list must not contain duplicates: {0:?}")]
    DuplicateObjectiveSubstat(crate::substat::Flavor),

    #[error("requirements document is missing a resonance whitelist")]
    EmptyResonanceWhitelist,

    #[error("two predicates on {substat} are directly contradictory: {low} vs {high}")]
    ContradictoryPredicates {
        substat: crate::substat::Flavor,
        low: String,
        high: String,
    },

    #[error("requirements document defines {0} cookies, more than the maximum of 10")]
    TooManyCookies(usize),

    #[error("cookie {0:?} defines more than one objective")]
    MultipleObjectives(String),

    #[error("cookie {0:?} defines no objective")]
    MissingObjective(String),
}

/// Something the implementation itself should never produce: a broken
/// internal invariant, as opposed to bad user input. Surfacing this as its
/// own variant (rather than folding it into `SemanticError`) keeps "this is
/// a bug" distinguishable from "this input was invalid" at the call site.
#[derive(Debug, Error)]
pub enum InvariantError {
    #[error("dominance plane push/pop mismatch: expected depth {expected}, got {actual}")]
    FrameDepthMismatch { expected: usize, actual: usize },

    #[error("incumbent regressed: previous objective {previous}, candidate {candidate}")]
    IncumbentRegression { previous: String, candidate: String },

    #[error("best_possible_set_effect called with mismatched flavor tiers")]
    MismatchedSetEffectTiers,
}

/// Top-level error type a CLI or library caller can match on, unifying the
/// three tiers above. Library code returns the specific tier directly where
/// possible; this exists for call sites (the CLI binary, `crate::lib`'s
/// public `run` entry point) that need one return type across all of them.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Semantic(#[from] SemanticError),

    #[error(transparent)]
    Invariant(#[from] InvariantError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
