//! Daytime filter
//!
//! Restricts a forecast to the hours worth sending: future points whose
//! local time of day falls between the configured start and end hours.

use crate::series::Series;
use chrono::{DateTime, NaiveTime, TimeZone};

/// Default first hour of the day kept (06:00)
pub const DEFAULT_DAY_START: u32 = 6;

/// Default last hour of the day kept (20:00, inclusive)
pub const DEFAULT_DAY_END: u32 = 20;

/// Time-of-day and after-now filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaytimeFilter {
    start: NaiveTime,
    end: NaiveTime,
}

impl DaytimeFilter {
    /// Create a filter keeping `[start_hour:00, end_hour:00]`
    ///
    /// Returns `None` if either hour is out of range or `start_hour > end_hour`.
    pub fn new(start_hour: u32, end_hour: u32) -> Option<Self> {
        if start_hour > end_hour {
            return None;
        }
        Some(Self {
            start: NaiveTime::from_hms_opt(start_hour, 0, 0)?,
            end: NaiveTime::from_hms_opt(end_hour, 0, 0)?,
        })
    }

    /// Check whether a local time of day is kept
    pub fn contains(&self, time: NaiveTime) -> bool {
        time >= self.start && time <= self.end
    }

    /// Keep points strictly after `now` and within daytime hours
    pub fn apply<Tz: TimeZone>(&self, series: &Series, now: &DateTime<Tz>) -> Series {
        series.retain(|p| p.timestamp > *now && self.contains(p.timestamp.time()))
    }
}

impl Default for DaytimeFilter {
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(DEFAULT_DAY_START, 0, 0).unwrap_or(NaiveTime::MIN),
            end: NaiveTime::from_hms_opt(DEFAULT_DAY_END, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}
