//! Reporting period.

use chrono::{Datelike, Local, NaiveDate};
use std::fmt;

use crate::error::{SyncError, SyncResult};

/// A calendar year and quarter (1 to 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPeriod {
    pub year: i32,
    pub quarter: i32,
}

impl ReportPeriod {
    pub fn new(year: i32, quarter: i32) -> SyncResult<Self> {
        if !(1..=4).contains(&quarter) {
            return Err(SyncError::invalid_period(format!(
                "quarter must be between 1 and 4, got {quarter}"
            )));
        }
        if year < 1 {
            return Err(SyncError::invalid_period(format!(
                "year must be positive, got {year}"
            )));
        }
        Ok(Self { year, quarter })
    }

    /// The calendar quarter `date` falls in: `(month - 1) / 3 + 1`. July is
    /// Q3 and November is Q4, unlike a `month / 4 + 1` grouping.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        // month0() is 0..=11.
        let quarter = (date.month0() / 3 + 1) as i32;
        Self {
            year: date.year(),
            quarter,
        }
    }

    /// The quarter of today's date on the local clock.
    #[must_use]
    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-Q{}", self.year, self.quarter)
    }
}
