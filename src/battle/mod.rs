//! Battle representation.
//!
//! Contains the unit value type, the normalized battle setup used as the
//! resolver's cache key, and the unit catalog.

pub mod catalog;
pub mod setup;
pub mod unit;

pub use catalog::{unit_key, Catalog, CatalogError};
pub use setup::BattleSetup;
pub use unit::{Unit, UnitError};
