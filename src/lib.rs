//! attrition engine library.
//!
//! Exposes the battle representation, the memoized resolver, reporting,
//! simulation, and protocol modules for use by integration tests and the
//! binary entry points.

pub mod battle;
pub mod engine;
pub mod protocol;
pub mod report;
pub mod resolve;
pub mod simulate;
pub mod sweep;
