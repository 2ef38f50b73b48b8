//! Shared test fixtures for integration tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Life config with two periods and an 8-year life expectancy.
pub const TWO_PERIODS_YAML: &str = r##"name: Ada
date_of_birth: 2000-01-01
life_expectancy: 8
life_periods:
  - name: Early
    start: 2000-01-01
    color: "#FF0000"
  - name: Later
    start: 2004-01-01
    color: "#00FF00"
"##;

/// Life config with a single red period and a 4-year life expectancy.
pub const ONE_PERIOD_YAML: &str = r##"name: Bo
date_of_birth: 2000-01-01
life_expectancy: 4
life_periods:
  - name: All
    start: 2000-01-01
    color: "#FF0000"
"##;

/// Life config with yearly events.
pub const YEARLY_YAML: &str = r##"name: Cy
date_of_birth: 1990-05-17
life_expectancy: 90
life_periods:
  - name: Childhood
    start: 1990-05-17
    color: "#FFFF00"
yearly_events:
  2023:
    - location: Berlin
      start: 2023-01-01
      color: "#0000FF"
    - location: Lisbon
      start: 2023-06-15
      color: "#00FFFF"
"##;

/// Not valid YAML.
pub const BROKEN_YAML: &str = "name: [unterminated\n";

/// Creates a temp data directory holding `files` (name, contents).
pub fn data_dir_with(files: &[(&str, &str)]) -> TempDir {
    let temp = TempDir::new().unwrap();
    for (name, contents) in files {
        fs::write(temp.path().join(name), contents).unwrap();
    }
    temp
}

/// Writes one file into `dir` and returns its path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Midnight of the given day.
pub fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(0, 0, 0).unwrap()
}

/// Calendar date shorthand.
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
