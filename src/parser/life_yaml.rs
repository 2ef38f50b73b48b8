//! YAML life config loader.
//!
//! The document is deserialized structurally, so each nesting level has its
//! own key scope: a `name` inside `life_periods` never clobbers the top-level
//! `name`. Unknown keys at every level are ignored. The raw document is then
//! validated into a fresh [`LifeConfig`]; a caller only ever sees a complete
//! value or an error.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::constants::{DEFAULT_LIFE_EXPECTANCY, MAX_LIFE_EXPECTANCY, UNKNOWN_NAME};
use crate::models::{LifeConfig, LifePeriod, RgbColor, YearlyEvent};

/// Integer that may arrive as a YAML number or as a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum LenientInt {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl LenientInt {
    #[allow(clippy::cast_possible_truncation)]
    fn value(&self) -> i64 {
        match self {
            Self::Integer(value) => *value,
            Self::Float(value) => value.trunc() as i64,
            Self::Text(text) => atoi(text),
        }
    }
}

/// Year key of the `yearly_events` map, written either as `2020:` or `"2020":`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(untagged)]
enum YearKey {
    Number(i64),
    Text(String),
}

impl YearKey {
    fn year(&self) -> Result<i32> {
        match self {
            Self::Number(value) => {
                i32::try_from(*value).context(format!("Year {value} is out of range"))
            }
            Self::Text(text) => text
                .trim()
                .parse::<i32>()
                .context(format!("Invalid year key '{text}'")),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLifeConfig {
    name: Option<String>,
    date_of_birth: Option<String>,
    life_expectancy: Option<LenientInt>,
    life_periods: Option<Vec<RawPeriod>>,
    yearly_events: Option<BTreeMap<YearKey, Option<Vec<RawEvent>>>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPeriod {
    name: Option<String>,
    start: Option<String>,
    color: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawEvent {
    location: Option<String>,
    start: Option<String>,
    color: Option<String>,
}

/// Loads a life config from a YAML file.
///
/// The file is read completely and closed before parsing begins.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the YAML is malformed,
/// `date_of_birth` is missing, or any date or color is invalid.
pub fn load_life_config(path: &Path) -> Result<LifeConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;

    let config = parse_life_config_str(&content)
        .with_context(|| format!("Failed to load life config: {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        periods = config.period_count(),
        "Loaded {} life periods",
        config.period_count()
    );

    Ok(config)
}

/// Parses a life config from YAML text.
///
/// # Errors
///
/// See [`load_life_config`].
pub fn parse_life_config_str(content: &str) -> Result<LifeConfig> {
    let raw: RawLifeConfig = if content.trim().is_empty() {
        RawLifeConfig::default()
    } else {
        serde_yml::from_str(content).context("Failed to parse YAML")?
    };

    let date_of_birth = raw
        .date_of_birth
        .as_deref()
        .context("Missing required field 'date_of_birth'")
        .and_then(|text| parse_date(text).context("Invalid 'date_of_birth'"))?;

    let life_expectancy = raw
        .life_expectancy
        .as_ref()
        .map(LenientInt::value)
        .filter(|years| *years > 0)
        .unwrap_or_else(|| i64::from(DEFAULT_LIFE_EXPECTANCY));

    let life_expectancy = match u32::try_from(life_expectancy) {
        Ok(years) if years <= MAX_LIFE_EXPECTANCY => years,
        _ => {
            tracing::warn!(
                "Life expectancy {life_expectancy} is above {MAX_LIFE_EXPECTANCY}; using {MAX_LIFE_EXPECTANCY}"
            );
            MAX_LIFE_EXPECTANCY
        }
    };

    let mut periods = raw
        .life_periods
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, period)| {
            convert_period(period).with_context(|| format!("Invalid life period #{}", index + 1))
        })
        .collect::<Result<Vec<_>>>()?;

    if !periods.windows(2).all(|pair| pair[0].start <= pair[1].start) {
        tracing::warn!("Life periods are not in start-date order; sorting them");
        periods.sort_by_key(|period| period.start);
    }

    let mut yearly_events = BTreeMap::new();
    for (key, events) in raw.yearly_events.unwrap_or_default() {
        let year = key.year()?;
        let mut events = events
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, event)| {
                convert_event(event)
                    .with_context(|| format!("Invalid event #{} in year {year}", index + 1))
            })
            .collect::<Result<Vec<_>>>()?;
        events.sort_by_key(|event| event.start);
        yearly_events.insert(year, events);
    }

    Ok(LifeConfig {
        name: raw.name.unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        date_of_birth,
        life_expectancy,
        periods,
        yearly_events,
    })
}

fn convert_period(raw: RawPeriod) -> Result<LifePeriod> {
    let start = raw.start.as_deref().context("Missing 'start'")?;
    let color = raw.color.as_deref().context("Missing 'color'")?;

    Ok(LifePeriod {
        name: raw.name.unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        start: parse_date(start)?,
        color: RgbColor::from_hex(color)?,
    })
}

fn convert_event(raw: RawEvent) -> Result<YearlyEvent> {
    let start = raw.start.as_deref().context("Missing 'start'")?;
    let color = raw.color.as_deref().context("Missing 'color'")?;

    Ok(YearlyEvent {
        location: raw.location,
        start: parse_date(start)?,
        color: RgbColor::from_hex(color)?,
    })
}

/// Parses a `YYYY-MM-DD` date. A bare `YYYY-MM` means the first of that month.
///
/// # Errors
///
/// Returns an error if the text matches neither form.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let text = text.trim();

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date);
    }

    NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{text}'. Expected YYYY-MM-DD"))
}

/// C-style `atoi`: optional whitespace and sign, then leading digits.
/// Text without leading digits yields 0.
fn atoi(text: &str) -> i64 {
    let text = text.trim_start();
    let (sign, digits) = match text.as_bytes().first() {
        Some(b'-') => (-1, &text[1..]),
        Some(b'+') => (1, &text[1..]),
        _ => (1, text),
    };

    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0_i64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
        });

    sign * magnitude
}
