//! Text protocol support.
//!
//! Battle notation and the line-oriented command parser used by the
//! engine binary.

pub mod notation;
pub mod parser;

pub use notation::{format_setup, format_units, parse_mode, parse_setup, parse_units, NotationError};
pub use parser::{parse_command, Command};
