//! Integration tests for loading life configs from disk.

mod fixtures;

use fixtures::{data_dir_with, date, write_file, BROKEN_YAML, TWO_PERIODS_YAML, YEARLY_YAML};
use lifecal::models::RgbColor;
use lifecal::parser::{load_life_config, parse_life_config_str};

#[test]
fn test_load_two_periods() {
    let temp = data_dir_with(&[("ada.yaml", TWO_PERIODS_YAML)]);
    let life = load_life_config(&temp.path().join("ada.yaml")).unwrap();

    assert_eq!(life.name, "Ada");
    assert_eq!(life.date_of_birth, date(2000, 1, 1));
    assert_eq!(life.life_expectancy, 8);
    assert_eq!(life.period_count(), 2);
    assert_eq!(life.periods[1].name, "Later");
    assert_eq!(life.periods[1].start, date(2004, 1, 1));
    assert_eq!(life.periods[1].color, RgbColor::new(0, 255, 0));
}

#[test]
fn test_loading_twice_gives_equal_configs() {
    let temp = data_dir_with(&[("ada.yaml", TWO_PERIODS_YAML)]);
    let path = temp.path().join("ada.yaml");

    let first = load_life_config(&path).unwrap();
    let second = load_life_config(&path).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_file_and_string_parse_agree() {
    let temp = data_dir_with(&[("cy.yml", YEARLY_YAML)]);
    let from_file = load_life_config(&temp.path().join("cy.yml")).unwrap();
    let from_str = parse_life_config_str(YEARLY_YAML).unwrap();
    assert_eq!(from_file, from_str);
}

#[test]
fn test_yearly_events_loaded() {
    let life = parse_life_config_str(YEARLY_YAML).unwrap();

    let events = life.events_for_year(2023);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].display_location(), "Berlin");
    assert_eq!(events[1].start, date(2023, 6, 15));
    assert!(life.events_for_year(2022).is_empty());
    assert_eq!(life.event_years().collect::<Vec<_>>(), vec![2023]);
}

#[test]
fn test_missing_file_fails() {
    let temp = data_dir_with(&[]);
    let err = load_life_config(&temp.path().join("nobody.yaml")).unwrap_err();
    assert!(format!("{err:#}").contains("nobody.yaml"));
}

#[test]
fn test_broken_file_fails() {
    let temp = data_dir_with(&[]);
    let path = write_file(temp.path(), "broken.yaml", BROKEN_YAML);
    assert!(load_life_config(&path).is_err());
}

#[test]
fn test_empty_file_fails() {
    let temp = data_dir_with(&[]);
    let path = write_file(temp.path(), "empty.yaml", "");
    assert!(load_life_config(&path).is_err());
}

#[test]
fn test_invalid_period_date_fails() {
    let yaml = "date_of_birth: 2000-01-01\nlife_periods:\n  - name: X\n    start: someday\n    color: \"#000000\"\n";
    assert!(parse_life_config_str(yaml).is_err());
}

#[test]
fn test_defaults_for_missing_fields() {
    let life = parse_life_config_str("date_of_birth: 1990-05-17\n").unwrap();
    assert_eq!(life.name, "Unknown");
    assert_eq!(life.life_expectancy, 80);
    assert!(life.periods.is_empty());
    assert!(life.yearly_events.is_empty());
}
