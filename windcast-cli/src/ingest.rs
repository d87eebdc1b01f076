// Windcast CLI - Forecast message composer
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Forecast CSV ingestion.
//!
//! Reads an hourly forecast exported from the weather source:
//!
//! ```text
//! timestamp,location,wind_speed_10m,wind_gusts_10m,wind_direction_10m
//! 2025-07-14T06:00:00-07:00,"(46.85, -121.76)",4.2,7.6,181
//! ```
//!
//! Rows are grouped by location in order of first appearance. Timestamps
//! are converted to the configured zone with the offset in force at each
//! instant, so daylight saving changes are honoured. Blank values drop the
//! row.

use chrono::DateTime;
use chrono_tz::Tz;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;
use windcast::series::localize;
use windcast::{Metric, RawPoint, Series, ShapeError, WindcastError};

const TIMESTAMP_COLUMN: &str = "timestamp";
const LOCATION_COLUMN: &str = "location";

/// Ingestion errors.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing column: {0}")]
    MissingColumn(&'static str),

    #[error("Row {row}: invalid {column} {value:?}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error(transparent)]
    Windcast(#[from] WindcastError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ShapeError> for IngestError {
    fn from(err: ShapeError) -> Self {
        IngestError::Windcast(err.into())
    }
}

/// Column positions in the header row.
#[derive(Debug)]
struct Columns {
    timestamp: usize,
    location: usize,
    metrics: [usize; 3],
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, IngestError> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let timestamp = find(TIMESTAMP_COLUMN).ok_or(IngestError::MissingColumn(TIMESTAMP_COLUMN))?;
        let location = find(LOCATION_COLUMN).ok_or(IngestError::MissingColumn(LOCATION_COLUMN))?;

        let mut metrics = [0; 3];
        for (slot, metric) in metrics.iter_mut().zip(Metric::ALL) {
            *slot = find(metric.column()).ok_or(ShapeError::MissingMetric(metric))?;
        }

        Ok(Self {
            timestamp,
            location,
            metrics,
        })
    }
}

/// Read a forecast CSV file into one series per location.
pub fn read_forecast(path: &Path, zone: Tz) -> Result<Vec<Series>, IngestError> {
    if !path.exists() {
        return Err(IngestError::FileNotFound(path.display().to_string()));
    }
    let reader = csv::Reader::from_path(path)?;
    parse_forecast(reader, zone)
}

/// Parse forecast CSV from any reader.
pub fn parse_forecast<R: std::io::Read>(
    mut reader: csv::Reader<R>,
    zone: Tz,
) -> Result<Vec<Series>, IngestError> {
    let columns = Columns::from_headers(reader.headers()?)?;

    let mut order: Vec<String> = Vec::new();
    let mut rows: HashMap<String, Vec<RawPoint>> = HashMap::new();

    for (index, result) in reader.records().enumerate() {
        let record = result?;
        // Header is row 1
        let row = index + 2;

        let field = |i: usize| record.get(i).map(str::trim).unwrap_or("");

        let raw_timestamp = field(columns.timestamp);
        let instant = DateTime::parse_from_rfc3339(raw_timestamp).map_err(|_| {
            IngestError::InvalidValue {
                row,
                column: TIMESTAMP_COLUMN,
                value: raw_timestamp.to_string(),
            }
        })?;
        let timestamp = localize(&instant, &zone);

        let mut values = [None; 3];
        for ((value, metric), column) in values.iter_mut().zip(Metric::ALL).zip(columns.metrics) {
            let text = field(column);
            if text.is_empty() {
                continue;
            }
            *value = Some(text.parse::<f64>().map_err(|_| IngestError::InvalidValue {
                row,
                column: metric.column(),
                value: text.to_string(),
            })?);
        }

        let location = field(columns.location).to_string();
        if !rows.contains_key(&location) {
            order.push(location.clone());
        }
        rows.entry(location).or_default().push(RawPoint {
            timestamp,
            speed: values[0],
            gusts: values[1],
            direction: values[2],
        });
    }

    let mut series = Vec::with_capacity(order.len());
    for location in order {
        let points = rows.remove(&location).unwrap_or_default();
        debug!("{}: {} rows", location, points.len());
        series.push(Series::from_raw(location, &points)?);
    }

    Ok(series)
}
