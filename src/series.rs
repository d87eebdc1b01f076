// Windcast - Compact wind forecasts for satellite text links
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Hourly forecast series
//!
//! A [`Series`] is the forecast for one location: points ordered by time,
//! each carrying one integer [`WindSample`]. Raw forecast rows come in as
//! [`RawPoint`]s with optional floating point values and are rounded on the
//! way in.

use crate::error::ShapeError;
use crate::metric::Metric;
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Timelike};

/// Spacing of rows within one day, in seconds
pub const ROW_INTERVAL_SECS: i64 = 3600;

/// Largest magnitude accepted for any metric
///
/// Keeps window deltas far from `i32` overflow.
pub const MAX_VALUE: i32 = 100_000;

/// Express an instant in a named zone, keeping the offset in force at that
/// instant
pub fn localize<Src: TimeZone, Tz: TimeZone>(
    instant: &DateTime<Src>,
    zone: &Tz,
) -> DateTime<FixedOffset> {
    instant.with_timezone(zone).fixed_offset()
}

/// Wind values at one instant, rounded to integers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindSample {
    /// Knots
    pub speed: i32,
    /// Knots
    pub gusts: i32,
    /// Degrees
    pub direction: i32,
}

impl WindSample {
    /// Create a new sample
    pub fn new(speed: i32, gusts: i32, direction: i32) -> Self {
        Self {
            speed,
            gusts,
            direction,
        }
    }

    /// Value of one metric
    pub fn get(&self, metric: Metric) -> i32 {
        match metric {
            Metric::Speed => self.speed,
            Metric::Gusts => self.gusts,
            Metric::Direction => self.direction,
        }
    }

    /// Per-metric maximum of two samples
    pub fn max(self, other: WindSample) -> WindSample {
        WindSample {
            speed: self.speed.max(other.speed),
            gusts: self.gusts.max(other.gusts),
            direction: self.direction.max(other.direction),
        }
    }
}

/// One forecast row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSeriesPoint {
    /// Forecast time in the forecast's local zone
    pub timestamp: DateTime<FixedOffset>,
    /// Wind values
    pub sample: WindSample,
}

impl TimeSeriesPoint {
    /// Create a new point
    pub fn new(timestamp: DateTime<FixedOffset>, sample: WindSample) -> Self {
        Self { timestamp, sample }
    }

    /// Local calendar day of this point
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    /// Local hour of day (0-23)
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }
}

/// A forecast row as delivered by the weather source
///
/// Values are floats and may be missing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPoint {
    pub timestamp: DateTime<FixedOffset>,
    pub speed: Option<f64>,
    pub gusts: Option<f64>,
    pub direction: Option<f64>,
}

impl RawPoint {
    /// Round to a [`TimeSeriesPoint`], or `None` if any value is missing
    ///
    /// Rounding is half-to-even.
    pub fn to_point(&self) -> Option<TimeSeriesPoint> {
        let speed = round_value(self.speed?)?;
        let gusts = round_value(self.gusts?)?;
        let direction = round_value(self.direction?)?;
        Some(TimeSeriesPoint::new(
            self.timestamp,
            WindSample::new(speed, gusts, direction),
        ))
    }
}

fn round_value(value: f64) -> Option<i32> {
    if !value.is_finite() {
        return None;
    }
    let rounded = value.round_ties_even();
    if rounded < i32::MIN as f64 || rounded > i32::MAX as f64 {
        return None;
    }
    Some(rounded as i32)
}

/// Forecast for one location
///
/// Invariants (checked by [`Series::new`]): timestamps strictly increase,
/// rows within one local calendar day are exactly one hour apart, and every
/// value lies within ±[`MAX_VALUE`]. Gaps between days are allowed so that a
/// daytime-filtered series stays a valid `Series`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    location: String,
    points: Vec<TimeSeriesPoint>,
}

impl Series {
    /// Create a validated series
    pub fn new(
        location: impl Into<String>,
        points: Vec<TimeSeriesPoint>,
    ) -> Result<Self, ShapeError> {
        let series = Self {
            location: location.into(),
            points,
        };
        series.validate()?;
        Ok(series)
    }

    /// Build a series from raw rows, dropping rows with missing values
    pub fn from_raw(location: impl Into<String>, rows: &[RawPoint]) -> Result<Self, ShapeError> {
        let location = location.into();
        let points: Vec<TimeSeriesPoint> = rows.iter().filter_map(RawPoint::to_point).collect();

        let dropped = rows.len() - points.len();
        if dropped > 0 {
            log::debug!("{}: dropped {} incomplete rows", location, dropped);
        }

        Self::new(location, points)
    }

    /// Location identifier
    pub fn location(&self) -> &str {
        &self.location
    }

    /// All points, ordered by time
    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the series has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First point, if any
    pub fn first(&self) -> Option<&TimeSeriesPoint> {
        self.points.first()
    }

    /// Keep only points matching the predicate
    ///
    /// A subset of a valid series is still valid as long as whole days are
    /// only trimmed at their ends, which holds for time-of-day and
    /// after-now filters.
    pub fn retain<F>(&self, mut keep: F) -> Series
    where
        F: FnMut(&TimeSeriesPoint) -> bool,
    {
        Series {
            location: self.location.clone(),
            points: self.points.iter().copied().filter(|p| keep(p)).collect(),
        }
    }

    /// Points grouped by local calendar day, in chronological order
    pub fn days(&self) -> impl Iterator<Item = (NaiveDate, &[TimeSeriesPoint])> {
        self.points
            .chunk_by(|a, b| a.date() == b.date())
            .map(|day| (day[0].date(), day))
    }

    fn validate(&self) -> Result<(), ShapeError> {
        for (row, pair) in self.points.windows(2).enumerate() {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(ShapeError::NotIncreasing {
                    location: self.location.clone(),
                    row: row + 1,
                });
            }
        }

        let mut row = 0;
        for (_, day) in self.days() {
            for (offset, pair) in day.windows(2).enumerate() {
                let actual = (pair[1].timestamp - pair[0].timestamp).num_seconds();
                if actual != ROW_INTERVAL_SECS {
                    return Err(ShapeError::NonUniformInterval {
                        location: self.location.clone(),
                        row: row + offset + 1,
                        expected_secs: ROW_INTERVAL_SECS,
                        actual_secs: actual,
                    });
                }
            }
            row += day.len();
        }

        for (row, point) in self.points.iter().enumerate() {
            for metric in Metric::ALL {
                let value = point.sample.get(metric);
                if value.unsigned_abs() > MAX_VALUE.unsigned_abs() {
                    return Err(ShapeError::OutOfRange {
                        location: self.location.clone(),
                        row,
                        metric,
                        value,
                        limit: MAX_VALUE,
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<FixedOffset> {
        FixedOffset::west_opt(7 * 3600)
            .unwrap()
            .with_ymd_and_hms(2025, 7, 14, 6, 0, 0)
            .unwrap()
    }

    fn hourly(hours: &[i64]) -> Vec<TimeSeriesPoint> {
        hours
            .iter()
            .map(|h| TimeSeriesPoint::new(start() + Duration::hours(*h), WindSample::new(5, 9, 180)))
            .collect()
    }

    #[test]
    fn test_sample_max() {
        let a = WindSample::new(10, 20, 350);
        let b = WindSample::new(12, 15, 10);
        assert_eq!(a.max(b), WindSample::new(12, 20, 350));
        assert_eq!(a.get(Metric::Direction), 350);
    }

    #[test]
    fn test_raw_rounding_half_even() {
        let raw = RawPoint {
            timestamp: start(),
            speed: Some(12.5),
            gusts: Some(13.5),
            direction: Some(271.49),
        };
        let point = raw.to_point().unwrap();
        assert_eq!(point.sample, WindSample::new(12, 14, 271));
    }

    #[test]
    fn test_raw_missing_value_dropped() {
        let complete = RawPoint {
            timestamp: start(),
            speed: Some(4.0),
            gusts: Some(8.0),
            direction: Some(90.0),
        };
        let missing = RawPoint {
            timestamp: start() + Duration::hours(1),
            gusts: None,
            ..complete
        };
        let nan = RawPoint {
            timestamp: start() + Duration::hours(2),
            speed: Some(f64::NAN),
            ..complete
        };

        let series = Series::from_raw("a", &[complete, missing, nan]).unwrap();
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_rejects_duplicate_timestamp() {
        let result = Series::new("a", hourly(&[0, 1, 1, 2]));
        assert!(matches!(
            result,
            Err(ShapeError::NotIncreasing { row: 2, .. })
        ));
    }

    #[test]
    fn test_rejects_irregular_interval() {
        let result = Series::new("a", hourly(&[0, 1, 2, 4]));
        assert!(matches!(
            result,
            Err(ShapeError::NonUniformInterval {
                row: 3,
                expected_secs: 3600,
                actual_secs: 7200,
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_sub_hourly_rows() {
        let half_hourly: Vec<TimeSeriesPoint> = (0..4)
            .map(|i| {
                TimeSeriesPoint::new(
                    start() + Duration::minutes(30 * i),
                    WindSample::new(5, 9, 180),
                )
            })
            .collect();
        assert!(matches!(
            Series::new("a", half_hourly),
            Err(ShapeError::NonUniformInterval {
                row: 1,
                expected_secs: 3600,
                actual_secs: 1800,
                ..
            })
        ));

        let three_hourly = hourly(&[0, 3, 6]);
        assert!(Series::new("a", three_hourly).is_err());
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let huge = RawPoint {
            timestamp: start(),
            speed: Some(2e9),
            gusts: Some(1.0),
            direction: Some(90.0),
        };
        let negative = RawPoint {
            timestamp: start() + Duration::hours(1),
            speed: Some(-2e9),
            ..huge
        };
        assert!(matches!(
            Series::from_raw("a", &[huge, negative]),
            Err(ShapeError::OutOfRange {
                row: 0,
                metric: Metric::Speed,
                ..
            })
        ));

        let edge = vec![TimeSeriesPoint::new(
            start(),
            WindSample::new(MAX_VALUE, -MAX_VALUE, 0),
        )];
        assert!(Series::new("a", edge).is_ok());
    }

    #[test]
    fn test_localize_follows_daylight_saving() {
        let zone = chrono_tz::America::Los_Angeles;
        let winter = DateTime::parse_from_rfc3339("2025-01-14T14:00:00Z").unwrap();
        let summer = DateTime::parse_from_rfc3339("2025-07-14T13:00:00Z").unwrap();

        assert_eq!(localize(&winter, &zone).hour(), 6);
        assert_eq!(localize(&winter, &zone).offset().local_minus_utc(), -8 * 3600);
        assert_eq!(localize(&summer, &zone).hour(), 6);
        assert_eq!(localize(&summer, &zone).offset().local_minus_utc(), -7 * 3600);
    }

    #[test]
    fn test_gap_between_days_allowed() {
        // 06:00-08:00 today, 06:00-08:00 tomorrow
        let series = Series::new("a", hourly(&[0, 1, 2, 24, 25, 26])).unwrap();
        let days: Vec<_> = series.days().map(|(d, pts)| (d, pts.len())).collect();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].1, 3);
        assert_eq!(days[1].0, start().date_naive().succ_opt().unwrap());
    }

    #[test]
    fn test_retain() {
        let series = Series::new("a", hourly(&[0, 1, 2, 3])).unwrap();
        let later = series.retain(|p| p.hour() >= 8);
        assert_eq!(later.len(), 2);
        assert_eq!(later.location(), "a");
        assert_eq!(later.first().unwrap().hour(), 8);
    }
}
