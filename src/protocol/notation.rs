//! Battle notation encoding and decoding.
//!
//! A compact single-token notation for a full battle setup:
//!
//! `<battlefield>/<attackers>/<defenders>`
//!
//! Each side is `-` when empty, or a comma-separated list of unit entries
//! `key[+damage][*count]`, where `key` is a catalog key, `damage` is hits
//! already taken and `count` repeats the entry. For example
//! `sea/battleship+1,destroyer*2/submarine*3`.

use std::collections::BTreeMap;

use crate::battle::catalog::{unit_key, Catalog};
use crate::battle::setup::BattleSetup;
use crate::battle::unit::Unit;
use crate::resolve::hits::BattleMode;

/// Largest number of units one side may hold.
pub const MAX_SIDE_UNITS: usize = 1024;

/// Errors that can occur while parsing battle notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("expected 3 sections separated by '/', got {0}")]
    WrongSectionCount(usize),

    #[error("empty battlefield label")]
    EmptyBattlefield,

    #[error("unknown unit '{0}'")]
    UnknownUnit(String),

    #[error("invalid unit entry: '{0}'")]
    InvalidUnitEntry(String),

    #[error("invalid unit count in '{0}'")]
    InvalidCount(String),

    #[error("invalid damage in '{0}'")]
    InvalidDamage(String),

    #[error("unrecognized role: '{0}'")]
    UnknownRole(String),
}

/// Parses a full battle setup.
pub fn parse_setup(s: &str, catalog: &Catalog) -> Result<BattleSetup, NotationError> {
    let sections: Vec<&str> = s.trim().split('/').collect();
    if sections.len() != 3 {
        return Err(NotationError::WrongSectionCount(sections.len()));
    }
    let battlefield = sections[0].trim();
    if battlefield.is_empty() {
        return Err(NotationError::EmptyBattlefield);
    }
    let attackers = parse_units(sections[1], catalog)?;
    let defenders = parse_units(sections[2], catalog)?;
    Ok(BattleSetup::new(battlefield, attackers, defenders))
}

/// Parses one side of a battle (`-` or a comma-separated unit list).
pub fn parse_units(s: &str, catalog: &Catalog) -> Result<Vec<Unit>, NotationError> {
    let s = s.trim();
    if s == "-" || s.is_empty() {
        return Ok(Vec::new());
    }
    let mut units = Vec::new();
    for entry in s.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            return Err(NotationError::InvalidUnitEntry(s.to_string()));
        }
        let (unit, count) = parse_entry(entry, catalog)?;
        if count > MAX_SIDE_UNITS - units.len() {
            return Err(NotationError::InvalidCount(entry.to_string()));
        }
        units.extend(std::iter::repeat(unit).take(count));
    }
    Ok(units)
}

/// Parses `key[+damage][*count]`.
fn parse_entry(entry: &str, catalog: &Catalog) -> Result<(Unit, usize), NotationError> {
    let (body, count) = match entry.split_once('*') {
        Some((body, count)) => {
            let count = count
                .parse::<usize>()
                .map_err(|_| NotationError::InvalidCount(entry.to_string()))?;
            (body, count)
        }
        None => (entry, 1),
    };
    let (key, damage) = match body.split_once('+') {
        Some((key, damage)) => {
            let damage = damage
                .parse::<u32>()
                .map_err(|_| NotationError::InvalidDamage(entry.to_string()))?;
            (key, damage)
        }
        None => (body, 0),
    };
    if key.is_empty() {
        return Err(NotationError::InvalidUnitEntry(entry.to_string()));
    }
    let base = catalog
        .get(key)
        .ok_or_else(|| NotationError::UnknownUnit(key.to_string()))?;
    let unit = match base.take_hits(damage) {
        Ok(Some(unit)) => unit,
        _ => return Err(NotationError::InvalidDamage(entry.to_string())),
    };
    Ok((unit, count))
}

/// Parses a combat role name.
pub fn parse_mode(s: &str) -> Result<BattleMode, NotationError> {
    BattleMode::from_name(s).ok_or_else(|| NotationError::UnknownRole(s.to_string()))
}

/// Encodes a battle setup into notation.
pub fn format_setup(setup: &BattleSetup) -> String {
    format!(
        "{}/{}/{}",
        setup.battlefield(),
        format_units(setup.attackers()),
        format_units(setup.defenders())
    )
}

/// Encodes one side, grouping identical units into `*count` entries.
pub fn format_units(units: &[Unit]) -> String {
    if units.is_empty() {
        return "-".to_string();
    }
    let mut groups: BTreeMap<(String, u32), usize> = BTreeMap::new();
    for unit in units {
        *groups
            .entry((unit_key(unit.name()), unit.current_hits()))
            .or_insert(0) += 1;
    }
    let entries: Vec<String> = groups
        .into_iter()
        .map(|((key, damage), count)| {
            let mut entry = key;
            if damage > 0 {
                entry.push_str(&format!("+{}", damage));
            }
            if count > 1 {
                entry.push_str(&format!("*{}", count));
            }
            entry
        })
        .collect();
    entries.join(",")
}
