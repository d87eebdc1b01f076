// Windcast - Compact wind forecasts for satellite text links
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Message composition
//!
//! Builds the single string sent for one invocation:
//!
//! ```text
//! [location abbreviation] [start hour] [today fragments] T [tomorrow fragments]
//! ```
//!
//! Today is reduced with 2-hour windows and tomorrow with 4-hour windows by
//! default. Fragments are concatenated without delimiters; their fields are
//! self-delimiting (see [`crate::codec`]).

use crate::codec;
use crate::delta;
use crate::error::{Result, ShapeError, WindcastError};
use crate::metric::DAY_SEPARATOR;
use crate::series::{Series, TimeSeriesPoint};
use crate::window;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::fmt;

/// Number of calendar days a message covers
pub const MESSAGE_DAYS: usize = 2;

/// Composer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposerConfig {
    /// Window width for the first day, in rows
    pub today_window_hours: usize,
    /// Window width for the second day, in rows
    pub tomorrow_window_hours: usize,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            today_window_hours: 2,
            tomorrow_window_hours: 4,
        }
    }
}

impl ComposerConfig {
    /// Check the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.today_window_hours == 0 || self.tomorrow_window_hours == 0 {
            return Err(WindcastError::InvalidConfig(
                "window hours must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// A composed message
///
/// Immutable once built. Length is in characters, which for the ASCII
/// output equals bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    text: String,
    header_len: usize,
    separator: usize,
}

impl Message {
    /// Full message text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if the message is empty (never true for a composed message)
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Location abbreviation and start hour
    pub fn header(&self) -> &str {
        &self.text[..self.header_len]
    }

    /// Fragments for the first day
    pub fn today(&self) -> &str {
        &self.text[self.header_len..self.separator]
    }

    /// Fragments for the second day
    pub fn tomorrow(&self) -> &str {
        &self.text[self.separator + DAY_SEPARATOR.len_utf8()..]
    }

    /// Consume the message, returning its text
    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// First letter of each `_`-separated word of a location key
///
/// Letters are lowercased so they can never be mistaken for field tags.
pub fn location_abbreviation(key: &str) -> String {
    key.split('_')
        .filter_map(|word| word.chars().next())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Check that a location key abbreviates to ASCII letters
///
/// Every non-empty `_`-separated word must start with an ASCII letter, and
/// there must be at least one word.
pub fn validate_location_key(key: &str) -> Result<()> {
    let mut words = key.split('_').filter(|word| !word.is_empty()).peekable();
    let valid = words.peek().is_some()
        && words.all(|word| word.starts_with(|c: char| c.is_ascii_alphabetic()));
    if valid {
        Ok(())
    } else {
        Err(WindcastError::InvalidConfig(format!(
            "location key {:?}: every word must start with an ASCII letter",
            key
        )))
    }
}

/// Hour of day of a point, without zero padding
pub fn start_hour_token(point: &TimeSeriesPoint) -> String {
    point.hour().to_string()
}

/// Composes messages from per-location series
#[derive(Debug, Clone, Default)]
pub struct Composer {
    config: ComposerConfig,
}

impl Composer {
    /// Create a composer with default window widths
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a composer with a custom configuration
    pub fn with_config(config: ComposerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the configuration
    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    /// Compose the message for `series`, which should already be filtered
    /// to daytime hours after now
    pub fn compose(&self, series: &[Series], location_key: &str) -> Result<Message> {
        validate_location_key(location_key)?;

        let first = series
            .iter()
            .filter_map(Series::first)
            .min_by_key(|p| p.timestamp)
            .ok_or(ShapeError::Empty)?;

        let days: BTreeSet<NaiveDate> = series
            .iter()
            .flat_map(|s| s.days().map(|(date, _)| date))
            .collect();
        let mut days = days.into_iter();
        let (today, tomorrow) = match (days.next(), days.next()) {
            (Some(today), Some(tomorrow)) => (today, tomorrow),
            (today, _) => {
                return Err(ShapeError::MissingDay {
                    needed: MESSAGE_DAYS,
                    found: usize::from(today.is_some()),
                }
                .into())
            }
        };

        let mut locations: Vec<&Series> = series.iter().collect();
        locations.sort_by(|a, b| a.location().cmp(b.location()));

        let mut text = location_abbreviation(location_key);
        text.push_str(&start_hour_token(first));
        let header_len = text.len();

        self.append_day(&mut text, &locations, today, self.config.today_window_hours)?;
        let separator = text.len();
        text.push(DAY_SEPARATOR);
        self.append_day(
            &mut text,
            &locations,
            tomorrow,
            self.config.tomorrow_window_hours,
        )?;

        log::debug!(
            "composed {} message: {} chars ({} today, {} tomorrow)",
            location_key,
            text.len(),
            separator - header_len,
            text.len() - separator - 1
        );

        Ok(Message {
            text,
            header_len,
            separator,
        })
    }

    fn append_day(
        &self,
        out: &mut String,
        locations: &[&Series],
        date: NaiveDate,
        window_hours: usize,
    ) -> Result<()> {
        for series in locations {
            let points = series
                .days()
                .find(|(d, _)| *d == date)
                .map(|(_, points)| points)
                .unwrap_or(&[]);

            let windows = window::reduce(points, window_hours)?;
            if windows.is_empty() {
                log::debug!(
                    "{} on {}: {} rows, no {}-hour window, skipping",
                    series.location(),
                    date,
                    points.len(),
                    window_hours
                );
                continue;
            }

            out.push_str(&codec::encode_fragment(&delta::encode_all(&windows)));
        }
        Ok(())
    }
}

/// Compose with the default configuration
pub fn compose(series: &[Series], location_key: &str) -> Result<Message> {
    Composer::new().compose(series, location_key)
}
