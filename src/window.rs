// Windcast - Compact wind forecasts for satellite text links
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Windowed max reduction
//!
//! Collapses consecutive rows into fixed-width, non-overlapping windows. Each
//! window reports the worst (maximum) value seen for every metric.
//!
//! Direction is a circular quantity but is reduced by max like speed and
//! gusts. This is an approximation: the result can differ from a circular
//! mean by a few degrees, which is within what readers of the message use.

use crate::error::{Result, WindcastError};
use crate::series::{TimeSeriesPoint, WindSample};
use chrono::{DateTime, FixedOffset};

/// One reduced window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Timestamp of the first row in the window
    pub start: DateTime<FixedOffset>,
    /// Timestamp of the last row in the window (the reported timestamp)
    pub end: DateTime<FixedOffset>,
    /// Per-metric maximum over the window
    pub sample: WindSample,
}

impl Window {
    /// Midpoint of the span covered by the window
    pub fn center(&self) -> DateTime<FixedOffset> {
        self.start + (self.end - self.start) / 2
    }
}

/// Bucket state while walking the rows
#[derive(Debug)]
struct Bucket {
    start: DateTime<FixedOffset>,
    max: WindSample,
    rows: usize,
}

/// Reduce rows into windows of `window_hours` rows each
///
/// Rows of a [`Series`](crate::Series) are one hour apart, so a window of
/// `window_hours` rows spans that many hours. Only full windows are
/// emitted: the result has `rows / window_hours` entries and a trailing
/// partial window is dropped.
pub fn reduce(points: &[TimeSeriesPoint], window_hours: usize) -> Result<Vec<Window>> {
    if window_hours == 0 {
        return Err(WindcastError::InvalidConfig(
            "window_hours must be at least 1".to_string(),
        ));
    }

    let mut windows = Vec::with_capacity(points.len() / window_hours);
    let mut bucket: Option<Bucket> = None;

    for point in points {
        let current = bucket.get_or_insert(Bucket {
            start: point.timestamp,
            max: point.sample,
            rows: 0,
        });
        current.max = current.max.max(point.sample);
        current.rows += 1;

        if current.rows == window_hours {
            windows.push(Window {
                start: current.start,
                end: point.timestamp,
                sample: current.max,
            });
            bucket = None;
        }
    }

    Ok(windows)
}
