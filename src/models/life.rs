//! Life config data model: periods, yearly events and the owning config.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::BTreeMap;

use super::RgbColor;
use crate::constants::UNKNOWN_NAME;

/// A named, colored phase of life.
///
/// A period starts at `start` and lasts until the next period starts,
/// or until "now" if it is the last one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifePeriod {
    /// Display name (e.g., "School")
    pub name: String,
    /// First day of the period
    pub start: NaiveDate,
    /// Fill color for grid cells and legend rows
    pub color: RgbColor,
}

impl LifePeriod {
    /// Creates a new life period.
    #[must_use]
    pub fn new(name: impl Into<String>, start: NaiveDate, color: RgbColor) -> Self {
        Self {
            name: name.into(),
            start,
            color,
        }
    }

    /// Start of the period as midnight of its start date.
    #[must_use]
    pub fn start_time(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    /// Legend text, e.g. `School (from 2006-09-01)`.
    #[must_use]
    pub fn legend_label(&self) -> String {
        format!("{} (from {})", self.name, self.start.format("%Y-%m-%d"))
    }
}

/// A colored event inside a single year, shown by the yearly view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearlyEvent {
    /// Where the event happened; `None` displays as "Unknown"
    pub location: Option<String>,
    /// First day of the event
    pub start: NaiveDate,
    /// Fill color for day cells
    pub color: RgbColor,
}

impl YearlyEvent {
    /// Location name for display.
    #[must_use]
    pub fn display_location(&self) -> &str {
        self.location.as_deref().unwrap_or(UNKNOWN_NAME)
    }
}

/// A loaded life config.
///
/// Built in one piece by the loader and replaced as a whole, never patched
/// field by field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifeConfig {
    /// Person's name
    pub name: String,
    /// Date of birth, the origin of the lifetime grid
    pub date_of_birth: NaiveDate,
    /// Life expectancy in years (always >= 1 after loading)
    pub life_expectancy: u32,
    /// Periods sorted by start date ascending
    pub periods: Vec<LifePeriod>,
    /// Events per year, each list sorted by start date
    pub yearly_events: BTreeMap<i32, Vec<YearlyEvent>>,
}

impl LifeConfig {
    /// Number of life periods.
    #[must_use]
    pub fn period_count(&self) -> usize {
        self.periods.len()
    }

    /// Events recorded for `year`, empty if none.
    #[must_use]
    pub fn events_for_year(&self, year: i32) -> &[YearlyEvent] {
        self.yearly_events.get(&year).map_or(&[][..], Vec::as_slice)
    }

    /// Years that have events, ascending.
    pub fn event_years(&self) -> impl Iterator<Item = i32> + '_ {
        self.yearly_events.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_legend_label() {
        let period = LifePeriod::new("School", date(2006, 9, 1), RgbColor::new(0, 0, 255));
        assert_eq!(period.legend_label(), "School (from 2006-09-01)");
    }

    #[test]
    fn test_start_time_is_midnight() {
        let period = LifePeriod::new("All", date(2000, 1, 1), RgbColor::WHITE);
        assert_eq!(
            period.start_time(),
            date(2000, 1, 1).and_hms_opt(0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_events_for_year() {
        let mut yearly_events = BTreeMap::new();
        yearly_events.insert(
            2020,
            vec![YearlyEvent {
                location: None,
                start: date(2020, 3, 1),
                color: RgbColor::BLACK,
            }],
        );
        let config = LifeConfig {
            name: "Test".to_string(),
            date_of_birth: date(1990, 1, 1),
            life_expectancy: 80,
            periods: Vec::new(),
            yearly_events,
        };

        assert_eq!(config.events_for_year(2020).len(), 1);
        assert_eq!(config.events_for_year(2020)[0].display_location(), "Unknown");
        assert!(config.events_for_year(2021).is_empty());
        assert_eq!(config.event_years().collect::<Vec<_>>(), vec![2020]);
    }
}
