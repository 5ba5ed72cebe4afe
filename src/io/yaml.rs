//! YAML requirements document parsing.
//!
//! One document describes a whole team (`spec.md` §6): a `cookies` list
//! (each entry its validity expressions, objective, and resonance
//! whitelist), an optional document-wide `modifiers` table that's summed
//! into the default modifier bundle before any cookie applies its own
//! per-objective overrides, and an optional `leaderboard` weight map.

use crate::config::Config;
use crate::error::{Error, ParseError, SemanticError};
use crate::objective::{Modifiers, Objective};
use crate::requirements::Requirements;
use crate::substat::{Flavor, Resonance};
use crate::validity::Validity;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;

const MAX_COOKIES: usize = 10;

#[derive(Debug, Deserialize)]
struct RequirementsFile {
    cookies: Vec<CookieDoc>,
    #[serde(default)]
    modifiers: HashMap<String, Vec<ModifierSourceDoc>>,
    #[serde(default)]
    leaderboard: HashMap<String, u32>,
}

#[derive(Debug, Deserialize)]
struct ModifierSourceDoc {
    #[serde(default)]
    #[allow(dead_code)]
    source: String,
    value: Decimal,
}

#[derive(Debug, Deserialize)]
struct CookieDoc {
    name: String,
    requirements: Vec<RequirementEntry>,
    #[serde(default)]
    resonant: Vec<String>,
}

/// One entry in a cookie's `requirements` list: either a free-text validity
/// predicate or a `max: ...` objective mapping.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RequirementEntry {
    Validity(String),
    Objective(ObjectiveDoc),
}

#[derive(Debug, Deserialize)]
struct ObjectiveDoc {
    max: String,
    #[serde(default)]
    substats: Vec<String>,
    /// Per-substat numeric overrides for Special objectives (`E[DMG]`,
    /// `Vitality`), keyed by the same names `modifiers` uses.
    #[serde(flatten)]
    overrides: HashMap<String, Decimal>,
}

/// Folds `requirements.modifiers`' per-substat `{source, value}` sums onto
/// `base`, mirroring `requirements.py::from_yaml`'s `mods[Type(stat)] +=
/// Decimal(buff["value"])` loop.
fn fold_document_modifiers(
    base: Modifiers,
    doc_modifiers: &HashMap<String, Vec<ModifierSourceDoc>>,
) -> Result<Modifiers, ParseError> {
    let mut mods = base;
    for (name, buffs) in doc_modifiers {
        for buff in buffs {
            apply_named_modifier(&mut mods, name, buff.value)?;
        }
    }
    Ok(mods)
}

/// Adds `value` onto the one `Modifiers` field `name` names. Names match
/// `Type.value` in the source (`ATK`, `CRIT%`, `HP`, `DMG Resist`, `CRIT
/// DMG`, `ATK MULT`).
fn apply_named_modifier(mods: &mut Modifiers, name: &str, value: Decimal) -> Result<(), ParseError> {
    match name {
        "ATK" => mods.base_atk += value,
        "CRIT%" => mods.base_crit += value,
        "HP" => mods.base_hp += value,
        "DMG Resist" => mods.base_dmgres += value,
        "CRIT DMG" => mods.crit_dmg += value,
        "ATK MULT" => mods.atk_mult += value,
        other => return Err(ParseError::UnknownName(other.to_string())),
    }
    Ok(())
}

fn parse_objective(doc: ObjectiveDoc, base_mods: Modifiers) -> Result<Objective, ParseError> {
    match doc.max.as_str() {
        "Combo" => {
            let substats = doc
                .substats
                .iter()
                .map(|s| Flavor::from_str(s).map_err(ParseError::UnknownName))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Objective::combo(substats))
        }
        "E[DMG]" => {
            let mods = apply_overrides(base_mods, &doc.overrides)?;
            Ok(Objective::edmg(mods))
        }
        // "E[Vit]" is the same objective under an alternate spelling the
        // source's `sanitize` step normalizes to "Vitality" before parsing.
        "Vitality" | "E[Vit]" => {
            let mods = apply_overrides(base_mods, &doc.overrides)?;
            Ok(Objective::vitality(mods))
        }
        other => Ok(Objective::Single(Flavor::from_str(other).map_err(ParseError::UnknownName)?)),
    }
}

fn apply_overrides(mut mods: Modifiers, overrides: &HashMap<String, Decimal>) -> Result<Modifiers, ParseError> {
    for (name, value) in overrides {
        apply_named_modifier(&mut mods, name, *value)?;
    }
    Ok(mods)
}

fn parse_cookie(doc: CookieDoc, base_mods: Modifiers, weight: Option<u32>) -> Result<Requirements, Error> {
    let mut validity = Vec::new();
    let mut objective = None;

    for entry in doc.requirements {
        match entry {
            RequirementEntry::Validity(text) => validity.push(Validity::parse(&text)?),
            RequirementEntry::Objective(obj_doc) => {
                if objective.is_some() {
                    return Err(SemanticError::MultipleObjectives(doc.name).into());
                }
                objective = Some(parse_objective(obj_doc, base_mods)?);
            }
        }
    }
    let objective = objective.ok_or_else(|| SemanticError::MissingObjective(doc.name.clone()))?;

    let mut resonances = doc
        .resonant
        .iter()
        .map(|s| Resonance::from_str(s).map_err(ParseError::UnknownName))
        .collect::<Result<Vec<_>, _>>()?;
    resonances.push(Resonance::Normal);

    Ok(Requirements {
        name: doc.name,
        validity,
        objective,
        resonances,
        leaderboard_weight: weight.map(Decimal::from),
    })
}

/// Parses a whole team's requirements document (`spec.md` §6): the
/// `cookies` list, in order, against the shared `config` modifiers folded
/// with the document's own `modifiers` table and each cookie's
/// `leaderboard` weight.
pub fn parse_team(yaml: &str, config: &Config) -> Result<Vec<Requirements>, Error> {
    let doc: RequirementsFile = serde_yaml::from_str(yaml).map_err(ParseError::from)?;

    if doc.cookies.len() > MAX_COOKIES {
        return Err(SemanticError::TooManyCookies(doc.cookies.len()).into());
    }

    let base_mods = fold_document_modifiers(config.modifiers, &doc.modifiers)?;

    doc.cookies
        .into_iter()
        .map(|cookie| {
            let weight = doc.leaderboard.get(&cookie.name).copied();
            parse_cookie(cookie, base_mods, weight)
        })
        .collect()
}

/// Raised when a parsed requirements document references a resonance or
/// substat the rest of the pipeline cannot act on; kept distinct from
/// `ParseError` since the YAML itself was well-formed.
pub fn validate_semantics(requirements: &Requirements) -> Result<(), SemanticError> {
    if requirements.resonances.is_empty() {
        return Err(SemanticError::EmptyResonanceWhitelist);
    }
    Ok(())
}
