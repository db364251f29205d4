//! Simulated calendar date

use crate::error::{HeadlinerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Supported calendar years
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// A (month, year) period of the simulated season
///
/// Field order matters: the derived `Ord` compares year first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSeasonDate")]
pub struct SeasonDate {
    year: i32,
    month: u8,
}

#[derive(Deserialize)]
struct RawSeasonDate {
    year: i32,
    month: u8,
}

impl TryFrom<RawSeasonDate> for SeasonDate {
    type Error = HeadlinerError;

    fn try_from(raw: RawSeasonDate) -> Result<Self> {
        Self::new(raw.month, raw.year)
    }
}

impl SeasonDate {
    /// Create a date, rejecting months outside 1..=12 and years outside
    /// [`MIN_YEAR`]..=[`MAX_YEAR`]
    pub fn new(month: u8, year: i32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(HeadlinerError::invalid_input(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(HeadlinerError::invalid_input(format!(
                "year must be between {MIN_YEAR} and {MAX_YEAR}, got {year}"
            )));
        }
        Ok(Self { year, month })
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// English month name
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[usize::from(self.month - 1)]
    }

    /// The following month, rolling the year over after December
    ///
    /// December of [`MAX_YEAR`] is the last date; it does not advance.
    #[must_use]
    pub fn next(&self) -> Self {
        match (self.month, self.year) {
            (12, MAX_YEAR) => *self,
            (12, year) => Self {
                year: year + 1,
                month: 1,
            },
            (month, year) => Self {
                year,
                month: month + 1,
            },
        }
    }
}

impl fmt::Display for SeasonDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}
