//! Hand-written topping inventory CSV reader/writer.
//!
//! The source's reader shells out to a Python `eval()` over a string column
//! to reconstruct each topping's substat list (`spec.md` §6 names this
//! explicitly as out of scope to replicate). This module instead parses a
//! fixed, documented column layout with no code execution of any kind.

use crate::error::ParseError;
use crate::substat::{Flavor, Resonance};
use crate::topping::Topping;
use rust_decimal::Decimal;
use std::str::FromStr;

/// `flavor,main,resonance,sub1_flavor,sub1_value,sub2_flavor,sub2_value,sub3_flavor,sub3_value`
/// Sub-stat columns are optional; a topping may have zero to three.
const MIN_COLUMNS: usize = 3;
const MAX_COLUMNS: usize = 9;

pub fn parse_row(row: &str) -> Result<Topping, ParseError> {
    let fields: Vec<&str> = row.split(',').map(str::trim).collect();
    if fields.len() < MIN_COLUMNS || fields.len() > MAX_COLUMNS || (fields.len() - MIN_COLUMNS) % 2 != 0 {
        return Err(ParseError::ColumnCount { expected: MIN_COLUMNS, actual: fields.len(), row: row.to_string() });
    }

    let flavor = Flavor::from_str(fields[0]).map_err(ParseError::UnknownName)?;
    let main = Decimal::from_str(fields[1]).map_err(|_| ParseError::Decimal(fields[1].to_string()))?;
    let resonance = Resonance::from_str(fields[2]).map_err(ParseError::UnknownName)?;

    let mut substats = vec![(flavor, main)];
    let mut rest = fields[3..].chunks_exact(2);
    for pair in &mut rest {
        let sub_flavor = Flavor::from_str(pair[0]).map_err(ParseError::UnknownName)?;
        let sub_value = Decimal::from_str(pair[1]).map_err(|_| ParseError::Decimal(pair[1].to_string()))?;
        substats.push((sub_flavor, sub_value));
    }

    Ok(Topping::new(substats, resonance))
}

pub fn parse_inventory(csv: &str) -> Result<Vec<Topping>, ParseError> {
    csv.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(parse_row)
        .collect()
}

pub fn write_row(topping: &Topping) -> String {
    let mut fields = vec![
        topping.flavor().to_string(),
        topping.substats()[0].1.to_string(),
        topping.resonance().to_string(),
    ];
    for (flavor, value) in &topping.substats()[1..] {
        fields.push(flavor.to_string());
        fields.push(value.to_string());
    }
    fields.join(",")
}

pub fn write_inventory(toppings: &[Topping]) -> String {
    toppings.iter().map(write_row).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn round_trips_a_topping_with_three_substats() {
        let topping = Topping::new(
            vec![
                (Flavor::Atk, dec!(9)),
                (Flavor::Crit, dec!(3)),
                (Flavor::Hp, dec!(2)),
                (Flavor::Def, dec!(1)),
            ],
            Resonance::Moonkissed,
        );
        let row = write_row(&topping);
        let parsed = parse_row(&row).unwrap();
        assert_eq!(parsed, topping);
    }

    #[test]
    fn rejects_wrong_column_count() {
        assert!(parse_row("ATK,9,Normal,Crit").is_err());
    }

    #[test]
    fn rejects_unknown_flavor_name() {
        assert!(parse_row("Nonsense,9,Normal").is_err());
    }

    #[test]
    fn parse_inventory_skips_blank_and_comment_lines() {
        let csv = "# header\nATK,9,Normal\n\nHP,9,Normal";
        let toppings = parse_inventory(csv).unwrap();
        assert_eq!(toppings.len(), 2);
    }
}
