//! Validity predicate parsing and canonicalization ("realize").

use crate::substat::Flavor;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// The one display-decimal-digit granularity every in-game substat uses
/// today. `Validity::fuzz` widens strict inequalities by this amount.
///
/// If a future substat ever displays at 0.01 precision, this needs to become
/// a per-substat property (see `spec.md` §9) rather than a single constant.
pub const DISPLAY_ULP: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    Ge,
    Le,
}

impl Comparator {
    pub fn test(self, value: Decimal, target: Decimal) -> bool {
        match self {
            Comparator::Ge => value >= target,
            Comparator::Le => value <= target,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Comparator::Ge => ">=",
            Comparator::Le => "<=",
        })
    }
}

/// An already-canonical `(substat, comparator, target)` constraint.
///
/// Only [`Validity::realize`] produces these from the four textual forms;
/// everything downstream of the parser only ever sees [`Predicate`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Predicate {
    pub substat: Flavor,
    pub comparator: Comparator,
    pub target: Decimal,
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.substat, self.comparator, self.target)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawComparator {
    Gt,
    Lt,
    Ge,
    Le,
}

impl RawComparator {
    fn invert(self) -> Self {
        match self {
            RawComparator::Gt => RawComparator::Lt,
            RawComparator::Lt => RawComparator::Gt,
            RawComparator::Ge => RawComparator::Le,
            RawComparator::Le => RawComparator::Ge,
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            ">=" => Some(RawComparator::Ge),
            "<=" => Some(RawComparator::Le),
            ">" => Some(RawComparator::Gt),
            "<" => Some(RawComparator::Lt),
            _ => None,
        }
    }
}

/// One of the four textual validity forms, pre-"realize".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validity {
    /// `<substat> (>=|<=|>|<) <number>`, either operand order.
    Normal {
        substat: Flavor,
        op: RawComparator,
        target: Decimal,
    },
    /// `<low> <lt> <substat> <lt> <high>` (or both `gt`).
    Range {
        low_target: Decimal,
        low_op: RawComparator,
        substat: Flavor,
        high_op: RawComparator,
        high_target: Decimal,
    },
    /// `<substat> (==|=) <number>`.
    Equality { substat: Flavor, target: Decimal },
    /// `<substat> (above|below) <cookie-name>`.
    Relative {
        substat: Flavor,
        above: bool,
        cookie: String,
    },
}


impl Validity {
    /// Tries all four textual grammars in turn; the first that matches wins.
    pub fn parse(input: &str) -> Result<Self, crate::error::ParseError> {
        let trimmed = input.trim();
        if let Some(v) = parse_relative(trimmed) {
            return Ok(v);
        }
        if let Some(v) = parse_range(trimmed) {
            return Ok(v);
        }
        if let Some(v) = parse_equality(trimmed) {
            return Ok(v);
        }
        if let Some(v) = parse_normal(trimmed) {
            return Ok(v);
        }
        Err(crate::error::ParseError::Validity(input.to_string()))
    }

    /// Lowers this textual form to one or two canonical predicates. Only
    /// `Relative` needs `solved` (previously-solved cookies' sets); the other
    /// three forms ignore it.
    pub fn convert(
        &self,
        solved: &std::collections::HashMap<String, crate::topping::ToppingSet>,
    ) -> Result<Vec<Predicate>, crate::error::SemanticError> {
        match self {
            Validity::Normal { substat, op, target } => {
                Ok(vec![Predicate { substat: *substat, comparator: raw_to_canonical(*op), target: *target }])
            }
            Validity::Range { low_target, low_op, substat, high_op, high_target } => Ok(vec![
                Predicate {
                    substat: *substat,
                    comparator: raw_to_canonical(low_op.invert()),
                    target: *low_target,
                },
                Predicate {
                    substat: *substat,
                    comparator: raw_to_canonical(*high_op),
                    target: *high_target,
                },
            ]),
            Validity::Equality { substat, target } => {
                if *target == Decimal::ZERO {
                    Ok(vec![Predicate { substat: *substat, comparator: Comparator::Le, target: *target }])
                } else {
                    Ok(vec![
                        Predicate { substat: *substat, comparator: Comparator::Ge, target: *target },
                        Predicate { substat: *substat, comparator: Comparator::Le, target: *target },
                    ])
                }
            }
            Validity::Relative { substat, above, cookie } => {
                let set = solved
                    .get(cookie)
                    .ok_or_else(|| crate::error::SemanticError::UnknownRelativeCookie(cookie.clone()))?;
                let target = set.value_one(*substat);
                let op = if *above { RawComparator::Gt } else { RawComparator::Lt };
                Ok(vec![Predicate { substat: *substat, comparator: raw_to_canonical(op), target }])
            }
        }
    }
}

fn raw_to_canonical(op: RawComparator) -> Comparator {
    match op {
        RawComparator::Ge | RawComparator::Gt => Comparator::Ge,
        RawComparator::Le | RawComparator::Lt => Comparator::Le,
    }
}

/// Widens a strict canonical-adjacent comparison by [`DISPLAY_ULP`] and
/// clamps negative targets to zero. Applied once per predicate during
/// `Requirements::realize`.
pub fn fuzz(predicate: &mut Predicate, was_strict: bool) {
    if !was_strict {
        return;
    }
    match predicate.comparator {
        Comparator::Ge => predicate.target += DISPLAY_ULP,
        Comparator::Le => predicate.target -= DISPLAY_ULP,
    }
    if predicate.target < Decimal::ZERO {
        predicate.target = Decimal::ZERO;
    }
}

fn strictness(raw: RawComparator) -> bool {
    matches!(raw, RawComparator::Gt | RawComparator::Lt)
}

/// Convenience used by `Requirements::realize`: converts and fuzzes in one
/// step, tracking which raw comparator produced each canonical predicate.
pub fn convert_and_fuzz(
    validity: &Validity,
    solved: &std::collections::HashMap<String, crate::topping::ToppingSet>,
) -> Result<Vec<Predicate>, crate::error::SemanticError> {
    let strict_flags: Vec<bool> = match validity {
        Validity::Normal { op, .. } => vec![strictness(*op)],
        Validity::Range { low_op, high_op, .. } => vec![strictness(low_op.invert()), strictness(*high_op)],
        Validity::Equality { .. } => vec![false, false],
        Validity::Relative { .. } => vec![true],
    };
    let mut predicates = validity.convert(solved)?;
    for (predicate, strict) in predicates.iter_mut().zip(strict_flags) {
        fuzz(predicate, strict);
    }
    Ok(predicates)
}

fn split_tokens(s: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            continue;
        }
        if matches!(c, '>' | '<' | '=') && matches!(chars.peek(), Some('=')) {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            tokens.push(format!("{c}="));
            chars.next();
            continue;
        }
        if matches!(c, '>' | '<' | '=') {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            tokens.push(c.to_string());
            continue;
        }
        current.push(c);
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn parse_normal(s: &str) -> Option<Validity> {
    let tokens = split_tokens(s);
    if tokens.len() != 3 {
        return None;
    }
    if let (Ok(substat), Some(op), Ok(target)) = (
        Flavor::from_str(&tokens[0]),
        RawComparator::parse(&tokens[1]),
        Decimal::from_str(&tokens[2]),
    ) {
        return Some(Validity::Normal { substat, op, target });
    }
    if let (Ok(target), Some(op), Ok(substat)) = (
        Decimal::from_str(&tokens[0]),
        RawComparator::parse(&tokens[1]),
        Flavor::from_str(&tokens[2]),
    ) {
        return Some(Validity::Normal { substat, op: op.invert(), target });
    }
    None
}

fn parse_range(s: &str) -> Option<Validity> {
    let tokens = split_tokens(s);
    if tokens.len() != 5 {
        return None;
    }
    let low_target = Decimal::from_str(&tokens[0]).ok()?;
    let low_op = RawComparator::parse(&tokens[1])?;
    let substat = Flavor::from_str(&tokens[2]).ok()?;
    let high_op = RawComparator::parse(&tokens[3])?;
    let high_target = Decimal::from_str(&tokens[4]).ok()?;

    let both_less = matches!(low_op, RawComparator::Le | RawComparator::Lt)
        && matches!(high_op, RawComparator::Le | RawComparator::Lt);
    let both_more = matches!(low_op, RawComparator::Ge | RawComparator::Gt)
        && matches!(high_op, RawComparator::Ge | RawComparator::Gt);

    if both_less {
        Some(Validity::Range { low_target, low_op, substat, high_op, high_target })
    } else if both_more {
        // `high >= substat >= low` reversed to the canonical low..high shape.
        Some(Validity::Range {
            low_target: high_target,
            low_op: high_op.invert(),
            substat,
            high_op: low_op.invert(),
            high_target: low_target,
        })
    } else {
        None
    }
}

fn parse_equality(s: &str) -> Option<Validity> {
    let tokens = split_tokens(s);
    if tokens.len() != 3 || !matches!(tokens[1].as_str(), "==" | "=") {
        return None;
    }
    if let (Ok(substat), Ok(target)) = (Flavor::from_str(&tokens[0]), Decimal::from_str(&tokens[2])) {
        return Some(Validity::Equality { substat, target });
    }
    if let (Ok(target), Ok(substat)) = (Decimal::from_str(&tokens[0]), Flavor::from_str(&tokens[2])) {
        return Some(Validity::Equality { substat, target });
    }
    None
}

fn parse_relative(s: &str) -> Option<Validity> {
    let tokens = split_tokens(s);
    if tokens.len() < 3 {
        return None;
    }
    let direction = tokens[1].to_ascii_lowercase();
    if direction != "above" && direction != "below" {
        return None;
    }
    let substat = Flavor::from_str(&tokens[0]).ok()?;
    let cookie = tokens[2..].join(" ");
    Some(Validity::Relative { substat, above: direction == "above", cookie })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topping::ToppingSet;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    #[test]
    fn parses_normal_either_operand_order() {
        let a = Validity::parse("DMG Resist >= 30").unwrap();
        let b = Validity::parse("30 <= DMG Resist").unwrap();
        let solved = HashMap::new();
        assert_eq!(convert_and_fuzz(&a, &solved).unwrap(), convert_and_fuzz(&b, &solved).unwrap());
    }

    #[test]
    fn parses_range_and_expands_to_two_predicates() {
        let v = Validity::parse("27 <= Cooldown <= 29").unwrap();
        let solved = HashMap::new();
        let predicates = convert_and_fuzz(&v, &solved).unwrap();
        assert_eq!(predicates.len(), 2);
        assert_eq!(predicates[0].comparator, Comparator::Ge);
        assert_eq!(predicates[0].target, dec!(27));
        assert_eq!(predicates[1].comparator, Comparator::Le);
        assert_eq!(predicates[1].target, dec!(29));
    }

    #[test]
    fn strict_inequality_widens_by_display_ulp() {
        let v = Validity::parse("Cooldown > 28").unwrap();
        let solved = HashMap::new();
        let predicates = convert_and_fuzz(&v, &solved).unwrap();
        assert_eq!(predicates[0].comparator, Comparator::Ge);
        assert_eq!(predicates[0].target, dec!(28.1));
    }

    #[test]
    fn zero_equality_collapses_to_le() {
        let v = Validity::parse("DMG Resist == 0").unwrap();
        let solved = HashMap::new();
        let predicates = convert_and_fuzz(&v, &solved).unwrap();
        assert_eq!(predicates.len(), 1);
        assert_eq!(predicates[0].comparator, Comparator::Le);
    }

    #[test]
    fn relative_resolves_against_solved_cookie_value() {
        // Four Cd-flavored toppings (below the 5-tier set bonus threshold) so
        // `value(Cd) == raw(Cd)`, keeping the example arithmetic unambiguous.
        let toppings = [
            crate::topping::Topping::new(vec![(Flavor::Cd, dec!(3))], crate::substat::Resonance::Normal),
            crate::topping::Topping::new(vec![(Flavor::Cd, dec!(3))], crate::substat::Resonance::Normal),
            crate::topping::Topping::new(vec![(Flavor::Cd, dec!(3))], crate::substat::Resonance::Normal),
            crate::topping::Topping::new(vec![(Flavor::Cd, dec!(3))], crate::substat::Resonance::Normal),
            crate::topping::Topping::new(vec![(Flavor::Atk, dec!(9))], crate::substat::Resonance::Normal),
        ];
        let set = ToppingSet::new(toppings);
        let mut solved = HashMap::new();
        solved.insert("Squid".to_string(), set);

        let v = Validity::parse("Cooldown below Squid").unwrap();
        let predicates = convert_and_fuzz(&v, &solved).unwrap();
        assert_eq!(predicates[0].comparator, Comparator::Le);
        assert_eq!(predicates[0].target, dec!(11.9));
    }
}
