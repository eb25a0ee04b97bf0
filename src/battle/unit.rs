//! Unit stats and damage state.
//!
//! A `Unit` is an immutable value. Taking hits produces a new value, or
//! nothing when the unit is destroyed.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Errors raised when building or damaging a unit.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UnitError {
    #[error("invalid attack strength {strength} for '{name}': must be within [0, 1]")]
    InvalidAttackStrength { name: String, strength: f64 },

    #[error("invalid defense strength {strength} for '{name}': must be within [0, 1]")]
    InvalidDefenseStrength { name: String, strength: f64 },

    #[error("unit '{0}' must require at least one hit")]
    InvalidRequiredHits(String),

    #[error("unit '{0}' must have a positive cost")]
    InvalidCost(String),

    #[error("unit '{name}' cannot take {hits} more hits (has {current} of {required})")]
    TooManyHits {
        name: String,
        hits: u32,
        current: u32,
        required: u32,
    },
}

/// A single combat unit.
///
/// Field order defines the derived total order, which breaks ties when
/// choosing casualties.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "UnitRecord")]
pub struct Unit {
    name: String,
    cost: u32,
    attack_strength: OrderedFloat<f64>,
    defense_strength: OrderedFloat<f64>,
    required_hits: u32,
    current_hits: u32,
}

/// Unvalidated unit fields as they appear in catalog files.
#[derive(Debug, Clone, Deserialize)]
struct UnitRecord {
    name: String,
    cost: u32,
    attack_strength: f64,
    defense_strength: f64,
    required_hits: u32,
    #[serde(default)]
    current_hits: u32,
}

impl TryFrom<UnitRecord> for Unit {
    type Error = UnitError;

    fn try_from(record: UnitRecord) -> Result<Self, Self::Error> {
        let unit = Unit::new(
            record.name,
            record.cost,
            record.attack_strength,
            record.defense_strength,
            record.required_hits,
        )?;
        if record.current_hits == 0 {
            return Ok(unit);
        }
        unit.take_hits(record.current_hits)?
            .ok_or_else(|| UnitError::TooManyHits {
                name: unit.name.clone(),
                hits: record.current_hits,
                current: 0,
                required: unit.required_hits,
            })
    }
}

impl Unit {
    /// Creates an undamaged unit, validating its stats.
    pub fn new(
        name: impl Into<String>,
        cost: u32,
        attack_strength: f64,
        defense_strength: f64,
        required_hits: u32,
    ) -> Result<Self, UnitError> {
        let name = name.into();
        if !(0.0..=1.0).contains(&attack_strength) {
            return Err(UnitError::InvalidAttackStrength {
                name,
                strength: attack_strength,
            });
        }
        if !(0.0..=1.0).contains(&defense_strength) {
            return Err(UnitError::InvalidDefenseStrength {
                name,
                strength: defense_strength,
            });
        }
        if required_hits == 0 {
            return Err(UnitError::InvalidRequiredHits(name));
        }
        if cost == 0 {
            return Err(UnitError::InvalidCost(name));
        }
        Ok(Unit {
            name,
            cost,
            attack_strength: OrderedFloat(attack_strength),
            defense_strength: OrderedFloat(defense_strength),
            required_hits,
            current_hits: 0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Probability of scoring a hit in one attacking roll.
    pub fn attack_strength(&self) -> f64 {
        self.attack_strength.0
    }

    /// Probability of scoring a hit in one defending roll.
    pub fn defense_strength(&self) -> f64 {
        self.defense_strength.0
    }

    pub fn required_hits(&self) -> u32 {
        self.required_hits
    }

    pub fn current_hits(&self) -> u32 {
        self.current_hits
    }

    /// Hits this unit can still absorb before it is destroyed.
    pub fn remaining_hits(&self) -> u32 {
        self.required_hits - self.current_hits
    }

    /// The result of taking `n` hits: the damaged unit, or `None` if destroyed.
    pub fn take_hits(&self, n: u32) -> Result<Option<Unit>, UnitError> {
        let new_hits = self.current_hits + n;
        if new_hits == self.required_hits {
            return Ok(None);
        }
        if new_hits > self.required_hits {
            return Err(UnitError::TooManyHits {
                name: self.name.clone(),
                hits: n,
                current: self.current_hits,
                required: self.required_hits,
            });
        }
        Ok(Some(Unit {
            current_hits: new_hits,
            ..self.clone()
        }))
    }

    /// Cost of losing this unit if it sustained `n` more hits; zero if it survives.
    pub fn hits_cost(&self, n: u32) -> u32 {
        if self.current_hits + n >= self.required_hits {
            self.cost
        } else {
            0
        }
    }
}
