//! Resampling frequencies and their calendar arithmetic

use crate::error::{PipelineError, Result};
use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use std::fmt;
use std::str::FromStr;

/// Resampling frequency for the feature pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    /// One bar per UTC calendar day
    Daily,
    /// One bar per ISO week, labeled by the Monday
    Weekly,
    /// One bar per calendar month, labeled by the first of the month
    Monthly,
}

impl Frequency {
    /// Lowercase name used for prompts and output file names
    pub fn name(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        }
    }

    /// Map a date to the start of the bucket containing it.
    ///
    /// Weekly buckets are fixed 7-day windows starting on Monday; monthly
    /// buckets align to calendar month boundaries, not fixed 30-day windows.
    pub fn bucket_start(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Frequency::Daily => date,
            Frequency::Weekly => date.week(Weekday::Mon).first_day(),
            Frequency::Monthly => {
                // Day 1 exists in every month
                date.with_day(1).expect("first of month is a valid date")
            }
        }
    }

    /// Advance a bucket start by one period length.
    ///
    /// Monthly advancement is calendar-correct: adding one month to a
    /// month-start label always lands on the next month's start.
    pub fn advance(&self, date: NaiveDate) -> Result<NaiveDate> {
        let next = match self {
            Frequency::Daily => date.checked_add_days(Days::new(1)),
            Frequency::Weekly => date.checked_add_days(Days::new(7)),
            Frequency::Monthly => date.checked_add_months(Months::new(1)),
        };
        next.ok_or_else(|| {
            PipelineError::DataError(format!("Date overflow advancing {} past {}", self, date))
        })
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Frequency {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            other => Err(PipelineError::InvalidFrequency(other.to_string())),
        }
    }
}
