// Windcast CLI - Forecast message composer
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # Windcast CLI
//!
//! Composes the satellite forecast message for one region from a forecast
//! CSV and prints what fits the transport budget, followed by the
//! truncated remainder if there is one.
//!
//! ## Usage
//!
//! ```bash
//! # Compose for a named region
//! windcast mount_rainier --csv forecast.csv --config regions.json
//!
//! # Resolve the region from the tracker's last reported position
//! windcast --csv forecast.csv --config regions.json --position feed.json
//!
//! # Email gateway budget
//! windcast mt_hood --csv forecast.csv --budget 160
//! ```

mod ingest;

use chrono::{DateTime, Utc};
use clap::Parser;
use ingest::{read_forecast, IngestError};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info, warn, Level};
use tracing_subscriber::EnvFilter;
use windcast::series::localize;
use windcast::{
    deliver, latest_position, Budget, Channel, ChannelMetrics, Composer, RetryStrategy, Series,
    Transmission, WindcastConfig, WindcastError,
};

/// Windcast forecast message composer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Region key (e.g. mount_rainier); resolved from --position if omitted
    location: Option<String>,

    /// Hourly forecast CSV
    #[arg(short, long)]
    csv: PathBuf,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tracker feed JSON used to find the current region
    #[arg(short, long)]
    position: Option<PathBuf>,

    /// Override the transport budget, in characters
    #[arg(short, long)]
    budget: Option<usize>,

    /// Treat this RFC 3339 time as now
    #[arg(long)]
    now: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// CLI errors.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Windcast(#[from] WindcastError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("Cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Cannot write report: {0}")]
    Report(#[from] std::io::Error),

    #[error("Invalid --now {0:?}: expected RFC 3339")]
    InvalidNow(String),

    #[error("No location given: pass a region key or --position")]
    NoLocation,
}

/// Writes the transmitted part to stdout.
#[derive(Debug, Default)]
struct StdoutChannel {
    metrics: ChannelMetrics,
}

impl Channel for StdoutChannel {
    fn send(&mut self, text: &str) -> windcast::Result<()> {
        println!("{}", text);
        self.metrics.chars_sent += text.chars().count() as u64;
        self.metrics.messages_sent += 1;
        Ok(())
    }

    fn is_available(&self) -> bool {
        true
    }

    fn metrics(&self) -> ChannelMetrics {
        self.metrics.clone()
    }

    fn close(&mut self) {}
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match args.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };
        EnvFilter::from_default_env().add_directive(level.into())
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!("Windcast v{}", env!("CARGO_PKG_VERSION"));

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let config = match &args.config {
        Some(path) => WindcastConfig::load(path)?,
        None => WindcastConfig::default(),
    };
    let zone = config.timezone()?;

    let location = resolve_location(args, &config)?;
    info!("Composing forecast for {}", location);

    let now = match &args.now {
        Some(text) => DateTime::parse_from_rfc3339(text)
            .map_err(|_| CliError::InvalidNow(text.clone()))?,
        None => localize(&Utc::now(), &zone),
    };

    let series = read_forecast(&args.csv, zone)?;
    let series = select_region_points(series, &config, &location);

    let filter = config.daytime_filter()?;
    let daytime: Vec<Series> = series.iter().map(|s| filter.apply(s, &now)).collect();

    let composer = Composer::with_config(config.composer_config())?;
    let message = composer.compose(&daytime, &location)?;

    let budget = match args.budget {
        Some(chars) => Budget::new(chars).ok_or_else(|| {
            WindcastError::InvalidConfig("budget must be at least 1".to_string())
        })?,
        None => config.budget()?,
    };

    let mut stdout = StdoutChannel::default();
    let transmission = deliver(&mut stdout, &message, budget, &RetryStrategy::None)?;
    report(&mut std::io::stdout().lock(), &transmission)?;

    Ok(())
}

/// Region key from the arguments or the tracker position.
fn resolve_location(args: &Args, config: &WindcastConfig) -> Result<String, CliError> {
    if let Some(path) = &args.position {
        let feed = std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let position = latest_position(&feed).map_err(WindcastError::from)?;
        let region = config
            .regions
            .locate(position)
            .map_err(WindcastError::from)?;
        info!(
            "Tracker at ({}, {}) is in {}",
            position.latitude, position.longitude, region.name
        );

        if let Some(named) = &args.location {
            if *named != region.name {
                warn!("Ignoring {}: tracker is in {}", named, region.name);
            }
        }
        return Ok(region.name.clone());
    }

    args.location.clone().ok_or(CliError::NoLocation)
}

/// Keep the configured forecast points of the region, if it lists any.
fn select_region_points(
    series: Vec<Series>,
    config: &WindcastConfig,
    location: &str,
) -> Vec<Series> {
    let labels: Vec<String> = match config.regions.get(location) {
        Ok(region) if !region.points.is_empty() => {
            region.points.iter().map(|p| p.label()).collect()
        }
        _ => return series,
    };

    let total = series.len();
    let selected: Vec<Series> = series
        .into_iter()
        .filter(|s| labels.iter().any(|l| l == s.location()))
        .collect();
    debug!("{} of {} locations belong to {}", selected.len(), total, location);
    selected
}

/// Tell the operator what did not fit.
fn report(out: &mut impl Write, transmission: &Transmission) -> std::io::Result<()> {
    if transmission.is_truncated() {
        writeln!(out, "\n Truncated {}", transmission.overflow)
    } else {
        writeln!(out, "Message length: {}", transmission.total_len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use windcast::{Coordinate, Region, RegionMap, TimeSeriesPoint, WindSample};

    fn args(location: Option<&str>) -> Args {
        Args {
            location: location.map(str::to_string),
            csv: PathBuf::from("forecast.csv"),
            config: None,
            position: None,
            budget: None,
            now: None,
            log_level: "info".to_string(),
        }
    }

    fn config_with_point() -> WindcastConfig {
        WindcastConfig {
            regions: RegionMap::new(vec![Region {
                name: "mt_hood".to_string(),
                southeast: Coordinate::new(45.2, -121.5),
                northwest: Coordinate::new(45.5, -121.9),
                points: vec![Coordinate::new(45.37, -121.69)],
            }]),
            ..Default::default()
        }
    }

    fn series(location: &str) -> Series {
        let t: DateTime<FixedOffset> =
            DateTime::parse_from_rfc3339("2025-07-14T06:00:00-07:00").unwrap();
        Series::new(location, vec![TimeSeriesPoint::new(t, WindSample::default())]).unwrap()
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from([
            "windcast",
            "mt_hood",
            "--csv",
            "f.csv",
            "--budget",
            "160",
        ]);
        assert_eq!(args.location.as_deref(), Some("mt_hood"));
        assert_eq!(args.budget, Some(160));
    }

    #[test]
    fn test_resolve_named_location() {
        let config = WindcastConfig::default();
        assert_eq!(
            resolve_location(&args(Some("mt_hood")), &config).unwrap(),
            "mt_hood"
        );
        assert!(matches!(
            resolve_location(&args(None), &config),
            Err(CliError::NoLocation)
        ));
    }

    #[test]
    fn test_resolve_from_position() {
        let mut feed = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut feed,
            br#"{"Messages": [{"Latitude": 45.37, "Longitude": -121.69}]}"#,
        )
        .unwrap();

        let mut a = args(Some("mount_rainier"));
        a.position = Some(feed.path().to_path_buf());
        assert_eq!(
            resolve_location(&a, &config_with_point()).unwrap(),
            "mt_hood"
        );
    }

    #[test]
    fn test_report_truncated() {
        let transmission = Budget::new(5).unwrap().split("mr6W10222TW8");
        let mut out = Vec::new();
        report(&mut out, &transmission).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\n Truncated 0222TW8\n");
    }

    #[test]
    fn test_report_fits() {
        let transmission = Budget::SHORT.split("mr6W10222TW8");
        let mut out = Vec::new();
        report(&mut out, &transmission).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Message length: 12\n");
    }

    #[test]
    fn test_select_region_points() {
        let config = config_with_point();
        let all = vec![series("(45.37, -121.69)"), series("(46.85, -121.76)")];

        let selected = select_region_points(all.clone(), &config, "mt_hood");
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].location(), "(45.37, -121.69)");

        let unfiltered = select_region_points(all, &config, "mount_rainier");
        assert_eq!(unfiltered.len(), 2);
    }
}
