//! Mapping of dates onto the lifetime and yearly grids.
//!
//! The lifetime grid has one cell per ~30-day "month" since birth, 48 cells
//! per row (four years). Cell `m` stands for `birth + m * 30 days`; this fixed
//! approximation is kept on purpose so grids line up with existing data.
//!
//! All functions here are pure. The open end of the last life period is the
//! caller-supplied `now`, which keeps tests deterministic.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::constants::{
    DAYS_PER_CELL, GRID_COLUMNS, YEARS_PER_ROW, YEAR_GRID_COLUMNS, YEAR_GRID_ROWS,
};
use crate::models::{LifePeriod, RgbColor, YearlyEvent};

/// One cell of the lifetime grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifetimeCell {
    /// Point in time the cell stands for; `None` past the representable dates
    pub time: Option<NaiveDateTime>,
    /// Index of the covering life period, if any
    pub period: Option<usize>,
    /// Color of the covering period; `None` means background
    pub color: Option<RgbColor>,
}

/// Lifetime grid: `rows() x 48` cells in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifetimeGrid {
    rows: usize,
    cells: Vec<LifetimeCell>,
}

impl LifetimeGrid {
    /// Number of rows (`ceil(life_expectancy / 4)`).
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns, always 48.
    #[must_use]
    pub fn columns(&self) -> usize {
        GRID_COLUMNS
    }

    /// Cell at `row`, `col`, or `None` when out of range.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&LifetimeCell> {
        if col >= GRID_COLUMNS {
            return None;
        }
        self.cells.get(row * GRID_COLUMNS + col)
    }

    /// All cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[LifetimeCell] {
        &self.cells
    }

    /// Iterates over the grid one row at a time.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[LifetimeCell]> {
        self.cells.chunks(GRID_COLUMNS)
    }
}

/// Number of grid rows needed for `life_expectancy` years.
#[must_use]
pub fn grid_rows(life_expectancy: u32) -> usize {
    life_expectancy.div_ceil(YEARS_PER_ROW) as usize
}

/// Time represented by the cell at linear index `index`, or `None` if it
/// falls outside the dates chrono can represent.
#[must_use]
pub fn cell_time(birth: NaiveDateTime, index: usize) -> Option<NaiveDateTime> {
    let days = i64::try_from(index).ok()?.checked_mul(DAYS_PER_CELL)?;
    birth.checked_add_signed(Duration::try_days(days)?)
}

/// Finds the life period covering `time`.
///
/// Period `k` covers `[start_k, start_{k+1})`; the last period covers
/// `[start_last, now)`. Periods are scanned in order and the first match wins.
#[must_use]
pub fn period_at(periods: &[LifePeriod], time: NaiveDateTime, now: NaiveDateTime) -> Option<usize> {
    periods.iter().enumerate().position(|(k, period)| {
        let end = periods.get(k + 1).map_or(now, LifePeriod::start_time);
        period.start_time() <= time && time < end
    })
}

/// Builds the lifetime grid.
#[must_use]
pub fn map_lifetime(
    date_of_birth: NaiveDate,
    life_expectancy: u32,
    periods: &[LifePeriod],
    now: NaiveDateTime,
) -> LifetimeGrid {
    let rows = grid_rows(life_expectancy);
    let birth = date_of_birth.and_time(NaiveTime::MIN);

    let cells = (0..rows * GRID_COLUMNS)
        .map(|index| {
            let time = cell_time(birth, index);
            let period = time.and_then(|time| period_at(periods, time, now));
            LifetimeCell {
                time,
                period,
                color: period.map(|k| periods[k].color),
            }
        })
        .collect();

    LifetimeGrid { rows, cells }
}

/// One day cell of the yearly grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearCell {
    /// Slot with no calendar day behind it
    OutOfYear,
    /// A day not covered by any event
    Empty(NaiveDate),
    /// A day covered by the event at this index
    Event(NaiveDate, usize),
}

impl YearCell {
    /// The day this cell stands for, if it is inside the year.
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::OutOfYear => None,
            Self::Empty(date) | Self::Event(date, _) => Some(*date),
        }
    }
}

/// Yearly grid: 13 rows of 28 days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearGrid {
    /// Calendar year shown
    pub year: i32,
    cells: Vec<YearCell>,
}

impl YearGrid {
    /// Number of rows, always 13.
    #[must_use]
    pub fn rows(&self) -> usize {
        YEAR_GRID_ROWS
    }

    /// Number of columns, always 28.
    #[must_use]
    pub fn columns(&self) -> usize {
        YEAR_GRID_COLUMNS
    }

    /// Cell at `row`, `col`.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&YearCell> {
        if col >= YEAR_GRID_COLUMNS {
            return None;
        }
        self.cells.get(row * YEAR_GRID_COLUMNS + col)
    }

    /// Iterates over the grid one row at a time.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[YearCell]> {
        self.cells.chunks(YEAR_GRID_COLUMNS)
    }
}

/// Number of days in `year`, or 0 if chrono cannot represent it.
#[must_use]
pub fn days_in_year(year: i32) -> u32 {
    NaiveDate::from_ymd_opt(year, 12, 31).map_or(0, |date| date.ordinal())
}

/// Builds the yearly grid for `year`.
///
/// `events` must be sorted by start date (the loader guarantees this).
/// Event `i` covers `[start_i, start_{i+1})`, the last one runs to the end of
/// the year.
#[must_use]
pub fn map_year(year: i32, events: &[YearlyEvent]) -> YearGrid {
    let days = days_in_year(year);
    let next_year_start = year
        .checked_add(1)
        .and_then(|next| NaiveDate::from_ymd_opt(next, 1, 1));

    let cells = (0..YEAR_GRID_ROWS * YEAR_GRID_COLUMNS)
        .map(|slot| {
            let ordinal = u32::try_from(slot + 1).unwrap_or(u32::MAX);
            if ordinal > days {
                return YearCell::OutOfYear;
            }
            let Some(date) = NaiveDate::from_yo_opt(year, ordinal) else {
                return YearCell::OutOfYear;
            };

            let covering = events.iter().enumerate().position(|(i, event)| {
                let end = events.get(i + 1).map(|next| next.start).or(next_year_start);
                event.start <= date && end.map_or(true, |end| date < end)
            });

            match covering {
                Some(index) => YearCell::Event(date, index),
                None => YearCell::Empty(date),
            }
        })
        .collect();

    YearGrid { year, cells }
}
