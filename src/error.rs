// Windcast - Compact wind forecasts for satellite text links
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Error types for Windcast
//!
//! This module defines all error types used throughout the library.

use crate::metric::Metric;
use thiserror::Error;

/// Result type alias for Windcast operations
pub type Result<T> = std::result::Result<T, WindcastError>;

/// Main error type for Windcast operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WindcastError {
    /// Input series do not have the shape a message needs
    #[error("Input shape error: {0}")]
    Shape(#[from] ShapeError),

    /// Region lookup failed
    #[error("Region error: {0}")]
    Region(#[from] RegionError),

    /// Tracker position could not be determined
    #[error("Position error: {0}")]
    Position(#[from] PositionError),

    /// Delivery channel error
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors about the shape of the input series
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// No data points at all
    #[error("Input contains no data points")]
    Empty,

    /// Fewer calendar days than a message needs
    #[error("Missing day group: need {needed} days, found {found}")]
    MissingDay { needed: usize, found: usize },

    /// A metric column is absent from the input
    #[error("Missing metric column: {0}")]
    MissingMetric(Metric),

    /// Timestamps are not strictly increasing
    #[error("Series {location}: timestamps not strictly increasing at row {row}")]
    NotIncreasing { location: String, row: usize },

    /// Rows within one day are not one hour apart
    #[error("Series {location}: interval at row {row} is {actual_secs}s, expected {expected_secs}s")]
    NonUniformInterval {
        location: String,
        row: usize,
        expected_secs: i64,
        actual_secs: i64,
    },

    /// A value is outside the range a forecast can carry
    #[error("Series {location}: {metric} {value} at row {row} exceeds ±{limit}")]
    OutOfRange {
        location: String,
        row: usize,
        metric: Metric,
        value: i32,
        limit: i32,
    },
}

/// Errors while mapping a position to a configured region
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegionError {
    /// Position lies outside every configured region
    #[error("No region contains position ({latitude}, {longitude})")]
    NoMatch { latitude: f64, longitude: f64 },

    /// Region key is not configured
    #[error("Unknown region: {0}")]
    UnknownRegion(String),
}

/// Errors while reading the tracker feed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PositionError {
    /// Feed is not valid JSON of the expected shape
    #[error("Malformed tracker feed: {0}")]
    Malformed(String),

    /// No message in the feed carries coordinates
    #[error("No message in the tracker feed has a position")]
    NoFix,
}

/// Errors related to the delivery channel
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChannelError {
    /// Disconnected
    #[error("Disconnected: {reason}")]
    Disconnected { reason: String },

    /// Remote side refused the message
    #[error("Rejected: {reason}")]
    Rejected { reason: String },

    /// Transmission error
    #[error("Transmission error after {retries} retries")]
    TransmissionError { retries: u32 },
}
