//! Unit catalog.
//!
//! The standard unit table plus loading of custom tables from JSON. Units
//! are looked up by key: the lowercase name with spaces replaced by `_`
//! (`"Aircraft Carrier"` becomes `aircraft_carrier`).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::unit::Unit;

/// Stats for one entry of the built-in table.
struct UnitStats {
    name: &'static str,
    cost: u32,
    attack: f64,
    defense: f64,
    required_hits: u32,
}

const STANDARD_UNITS: [UnitStats; 9] = [
    UnitStats { name: "Infantry", cost: 3, attack: 1.0 / 6.0, defense: 1.0 / 3.0, required_hits: 1 },
    UnitStats { name: "Tank", cost: 6, attack: 0.5, defense: 0.5, required_hits: 1 },
    UnitStats { name: "Fighter", cost: 10, attack: 0.5, defense: 2.0 / 3.0, required_hits: 1 },
    UnitStats { name: "Bomber", cost: 12, attack: 2.0 / 3.0, defense: 1.0 / 6.0, required_hits: 1 },
    UnitStats { name: "Destroyer", cost: 8, attack: 1.0 / 3.0, defense: 1.0 / 3.0, required_hits: 1 },
    UnitStats { name: "Transport", cost: 7, attack: 0.0, defense: 0.0, required_hits: 1 },
    UnitStats { name: "Submarine", cost: 6, attack: 1.0 / 3.0, defense: 1.0 / 6.0, required_hits: 1 },
    UnitStats { name: "Aircraft Carrier", cost: 12, attack: 1.0 / 6.0, defense: 1.0 / 3.0, required_hits: 1 },
    UnitStats { name: "Battleship", cost: 16, attack: 2.0 / 3.0, defense: 2.0 / 3.0, required_hits: 2 },
];

/// Errors that can occur while loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate unit key '{0}'")]
    DuplicateKey(String),
}

/// Returns the lookup key for a unit name.
pub fn unit_key(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Named undamaged units available for building battles.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    units: BTreeMap<String, Unit>,
}

impl Catalog {
    /// The nine standard units.
    pub fn standard() -> Self {
        let mut catalog = Catalog::default();
        for stats in &STANDARD_UNITS {
            match Unit::new(stats.name, stats.cost, stats.attack, stats.defense, stats.required_hits) {
                Ok(unit) => {
                    catalog.units.insert(unit_key(stats.name), unit);
                }
                Err(e) => unreachable!("standard unit table is invalid: {e}"),
            }
        }
        catalog
    }

    /// Builds a catalog from a list of units, rejecting duplicate keys.
    pub fn from_units(units: impl IntoIterator<Item = Unit>) -> Result<Self, CatalogError> {
        let mut catalog = Catalog::default();
        for unit in units {
            let key = unit_key(unit.name());
            if catalog.units.contains_key(&key) {
                return Err(CatalogError::DuplicateKey(key));
            }
            catalog.units.insert(key, unit);
        }
        Ok(catalog)
    }

    /// Parses a JSON array of unit records.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let units: Vec<Unit> = serde_json::from_str(json)?;
        Catalog::from_units(units)
    }

    /// Loads a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let data = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Catalog::from_json(&data)
    }

    /// Serializes the catalog as a pretty-printed JSON array.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let units: Vec<&Unit> = self.units.values().collect();
        Ok(serde_json::to_string_pretty(&units)?)
    }

    /// Looks up a unit by key or display name.
    pub fn get(&self, name: &str) -> Option<&Unit> {
        self.units.get(&unit_key(name))
    }

    /// Iterates `(key, unit)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Unit)> {
        self.units.iter().map(|(k, u)| (k.as_str(), u))
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_has_all_units() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.len(), 9);
        let infantry = catalog.get("infantry").unwrap();
        assert_eq!(infantry.cost(), 3);
        assert!((infantry.attack_strength() - 1.0 / 6.0).abs() < 1e-12);
        assert_eq!(catalog.get("Battleship").unwrap().required_hits(), 2);
        assert!(catalog.get("aircraft_carrier").is_some());
        assert!(catalog.get("Aircraft Carrier").is_some());
        assert!(catalog.get("zeppelin").is_none());
    }

    #[test]
    fn unit_keys_are_normalized() {
        assert_eq!(unit_key("Aircraft Carrier"), "aircraft_carrier");
        assert_eq!(unit_key(" Tank "), "tank");
    }

    #[test]
    fn json_roundtrip_preserves_units() {
        let catalog = Catalog::standard();
        let json = catalog.to_json().unwrap();
        let reloaded = Catalog::from_json(&json).unwrap();
        assert_eq!(reloaded.len(), catalog.len());
        for (key, unit) in catalog.iter() {
            assert_eq!(reloaded.get(key), Some(unit));
        }
    }

    #[test]
    fn json_rejects_bad_units_and_duplicates() {
        let bad = r#"[{"name":"Tank","cost":6,"attack_strength":1.5,"defense_strength":0.5,"required_hits":1}]"#;
        assert!(matches!(Catalog::from_json(bad), Err(CatalogError::Json(_))));

        let dup = r#"[
            {"name":"Tank","cost":6,"attack_strength":0.5,"defense_strength":0.5,"required_hits":1},
            {"name":"tank","cost":5,"attack_strength":0.5,"defense_strength":0.5,"required_hits":1}
        ]"#;
        assert!(matches!(Catalog::from_json(dup), Err(CatalogError::DuplicateKey(_))));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Catalog::load(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
