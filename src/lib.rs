//! Life Calendar Library
//!
//! This library provides core functionality for the Life Calendar
//! application: loading a person's life config from YAML, listing the
//! configs in a data directory, and mapping life periods and yearly events
//! onto calendar grids. The terminal UI lives behind the `ratatui` feature.

// Module declarations
pub mod catalog;
pub mod config;
pub mod constants;
pub mod logging;
pub mod models;
pub mod parser;
pub mod services;
#[cfg(feature = "ratatui")]
pub mod tui;
