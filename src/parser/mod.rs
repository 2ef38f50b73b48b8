//! Parsing for life config files.
//!
//! This module reads the YAML life config format into the data model.

pub mod life_yaml;

// Re-export commonly used functions
pub use life_yaml::{load_life_config, parse_date, parse_life_config_str};
