use chrono::{Datelike, Days, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecurrencePattern {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RecurrencePattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl Display for RecurrencePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidRecurrenceError {
    #[error("Unknown recurrence pattern: {0}")]
    UnknownPattern(String),
    #[error("Recurrence interval must be at least 1")]
    InvalidInterval,
    #[error("Invalid weekday index: {0}, expected a value between 0 (monday) and 6 (sunday)")]
    InvalidWeekday(u8),
}

impl FromStr for RecurrencePattern {
    type Err = InvalidRecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(InvalidRecurrenceError::UnknownPattern(s.to_string())),
        }
    }
}

fn default_interval() -> u32 {
    1
}

/// Describes whether and when a successor `Reminder` is generated
/// after a `Reminder` has been triggered.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Recurrence {
    pub pattern: RecurrencePattern,
    #[serde(default = "default_interval")]
    pub interval: u32,
    /// No occurrences are generated after this timestamp (inclusive bound)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<i64>,
    /// Weekday indices, 0 is monday and 6 is sunday.
    /// Carried along with the rule but not used when computing occurrences.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_of_week: Option<Vec<u8>>,
}

impl Recurrence {
    pub fn new(pattern: RecurrencePattern, interval: u32) -> Self {
        Self {
            pattern,
            interval,
            end_date: None,
            days_of_week: None,
        }
    }

    pub fn validate(&self) -> Result<(), InvalidRecurrenceError> {
        if self.interval < 1 {
            return Err(InvalidRecurrenceError::InvalidInterval);
        }
        if let Some(days) = &self.days_of_week {
            if let Some(day) = days.iter().find(|d| **d > 6) {
                return Err(InvalidRecurrenceError::InvalidWeekday(*day));
            }
        }
        Ok(())
    }

    /// Computes the occurrence following `reference_ts`.
    ///
    /// Returns `None` when the rule has ended, i.e. the computed time is
    /// strictly after `end_date`, or when the computed time cannot be represented.
    pub fn next_occurrence(&self, reference_ts: i64) -> Option<i64> {
        let interval = i64::from(self.interval);
        let next = match self.pattern {
            RecurrencePattern::Daily => add_date(reference_ts, 0, 0, interval),
            RecurrencePattern::Weekly => add_date(reference_ts, 0, 0, 7 * interval),
            RecurrencePattern::Monthly => add_date(reference_ts, 0, interval, 0),
            RecurrencePattern::Yearly => add_date(reference_ts, interval, 0, 0),
        }?;

        match self.end_date {
            Some(end_date) if next > end_date => None,
            _ => Some(next),
        }
    }
}

/// Calendar addition in UTC. The day of month is never clamped, overflowing
/// days roll into the following month (Jan 31 + 1 month is Mar 3 or Mar 2).
fn add_date(ts: i64, years: i64, months: i64, days: i64) -> Option<i64> {
    let datetime = Utc.timestamp_millis_opt(ts).single()?;

    let total_months =
        i64::from(datetime.year()) * 12 + i64::from(datetime.month0()) + years * 12 + months;
    let year = i32::try_from(total_months.div_euclid(12)).ok()?;
    let month = total_months.rem_euclid(12) as u32 + 1;

    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)?;
    let day_offset = u64::from(datetime.day0()) + u64::try_from(days).ok()?;
    let date = first_of_month.checked_add_days(Days::new(day_offset))?;

    Some(Utc.from_utc_datetime(&date.and_time(datetime.time())).timestamp_millis())
}
