//! Data models for the Bhansa food discovery backend.
//!
//! Wire shapes use snake_case field names matching the table columns, so
//! rows serialize to the client without renaming.

mod food;
mod restaurant;
mod stats;
mod vlogger;
mod vote;

pub use food::*;
pub use restaurant::*;
pub use stats::*;
pub use vlogger::*;
pub use vote::*;
