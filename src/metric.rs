//! Wind metrics carried by a forecast message
//!
//! Each metric has a forecast column name (as delivered by the weather
//! source) and a one-letter tag used in the compact text format.

use std::fmt;

/// Tag separating the today fragments from the tomorrow fragments
pub const DAY_SEPARATOR: char = 'T';

/// A wind metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    /// Sustained wind speed, knots
    Speed,
    /// Wind gusts, knots
    Gusts,
    /// Wind direction, degrees
    Direction,
}

impl Metric {
    /// All metrics in fragment order
    pub const ALL: [Metric; 3] = [Metric::Speed, Metric::Gusts, Metric::Direction];

    /// One-letter tag used in the compact text format
    pub fn tag(&self) -> char {
        match self {
            Metric::Speed => 'W',
            Metric::Gusts => 'G',
            Metric::Direction => 'D',
        }
    }

    /// Convert from a tag letter
    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'W' => Some(Metric::Speed),
            'G' => Some(Metric::Gusts),
            'D' => Some(Metric::Direction),
            _ => None,
        }
    }

    /// Column name in forecast input
    pub fn column(&self) -> &'static str {
        match self {
            Metric::Speed => "wind_speed_10m",
            Metric::Gusts => "wind_gusts_10m",
            Metric::Direction => "wind_direction_10m",
        }
    }

    /// Convert from a forecast column name
    pub fn from_column(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.column() == name)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}
