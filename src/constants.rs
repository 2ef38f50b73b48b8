//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the fixed grid geometry.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Life Calendar";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "lifecal";

/// Directory name used under the platform config directory.
pub const APP_DIR_NAME: &str = "LifeCalendar";

/// Environment variable that overrides the settings directory.
pub const CONFIG_DIR_ENV: &str = "LIFECAL_CONFIG_DIR";

/// Default data directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Substrings that mark a file as a candidate life config.
pub const CATALOG_PATTERNS: [&str; 2] = [".yaml", ".yml"];

/// Grid columns: four years of twelve months per row.
pub const GRID_COLUMNS: usize = 48;

/// Years covered by one grid row.
pub const YEARS_PER_ROW: u32 = 4;

/// Length of one grid cell in days (fixed month approximation).
pub const DAYS_PER_CELL: i64 = 30;

/// Life expectancy used when the file or the input gives nothing usable.
pub const DEFAULT_LIFE_EXPECTANCY: u32 = 80;

/// Maximum number of digits accepted by the life expectancy input.
pub const MAX_EXPECTANCY_DIGITS: usize = 3;

/// Largest life expectancy accepted anywhere (what three digits can hold).
pub const MAX_LIFE_EXPECTANCY: u32 = 999;

/// File name of the log written while the terminal UI is active.
pub const LOG_FILE_NAME: &str = "lifecal.log";

/// Rows of the yearly day grid.
pub const YEAR_GRID_ROWS: usize = 13;

/// Columns of the yearly day grid (four weeks).
pub const YEAR_GRID_COLUMNS: usize = 28;

/// Default target frame rate for the UI loop.
pub const DEFAULT_TARGET_FPS: u32 = 60;

/// Name shown when a config does not carry one.
pub const UNKNOWN_NAME: &str = "Unknown";
