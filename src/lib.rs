//! # Windcast - Compact wind forecasts for satellite text links
//!
//! Turns a multi-day, multi-location hourly wind forecast into one short
//! text message that fits a satellite messenger's character limit.
//!
//! ## Pipeline
//!
//! 1. **Daytime filter**: keep future points between 06:00 and 20:00
//! 2. **Windowed reducer**: worst-case (max) value per 2- or 4-hour window
//! 3. **Delta encoder**: first value, then window-to-window changes
//! 4. **Compact text codec**: tag letters and non-zero integers, no separators
//! 5. **Composer**: location abbreviation, start hour, today, `T`, tomorrow
//!
//! ## Quick Start
//!
//! ```rust
//! use windcast::{compose, Series, TimeSeriesPoint, WindSample};
//! use chrono::{Duration, FixedOffset, TimeZone};
//!
//! let start = FixedOffset::west_opt(7 * 3600)
//!     .unwrap()
//!     .with_ymd_and_hms(2025, 7, 14, 6, 0, 0)
//!     .unwrap();
//! let speeds = [10, 10, 12, 12, 14, 14, 16, 16];
//! let mut points: Vec<TimeSeriesPoint> = speeds
//!     .iter()
//!     .enumerate()
//!     .map(|(i, s)| {
//!         TimeSeriesPoint::new(start + Duration::hours(i as i64), WindSample::new(*s, 0, 0))
//!     })
//!     .collect();
//! points.extend((0..4).map(|i| {
//!     TimeSeriesPoint::new(start + Duration::hours(24 + i), WindSample::new(8, 0, 0))
//! }));
//!
//! let series = Series::new("(46.85, -121.76)", points).unwrap();
//! let message = compose(&[series], "mount_rainier").unwrap();
//! assert_eq!(message.as_str(), "mr6W10222GDTW8GD");
//! ```
//!
//! ## Modules
//!
//! - [`series`]: Forecast rows and per-location series
//! - [`daytime`]: Time-of-day and after-now filter
//! - [`window`]: Windowed max reduction
//! - [`delta`]: Delta encoding and direction quantization
//! - [`codec`]: Compact text format
//! - [`composer`]: Message composition
//! - [`region`]: Named regions and position lookup
//! - [`position`]: Tracker feed parsing
//! - [`transport`]: Character budget and delivery
//! - [`channel`]: Delivery channel abstraction
//! - [`config`]: JSON configuration

// Modules
pub mod channel;
pub mod codec;
pub mod composer;
pub mod config;
pub mod daytime;
pub mod delta;
pub mod error;
pub mod metric;
pub mod position;
pub mod recovery;
pub mod region;
pub mod series;
pub mod transport;
pub mod window;

// Re-exports for convenient access
pub use channel::{Channel, ChannelMetrics, MemoryChannel};
pub use codec::{encode, encode_fragment, split_fields, Field};
pub use composer::{
    compose, location_abbreviation, validate_location_key, Composer, ComposerConfig, Message,
};
pub use config::WindcastConfig;
pub use daytime::DaytimeFilter;
pub use delta::{encode_all, encode_deltas, quantize_direction, DeltaSequence, DeltaSet};
pub use error::{
    ChannelError, PositionError, RegionError, Result, ShapeError, WindcastError,
};
pub use metric::{Metric, DAY_SEPARATOR};
pub use position::latest_position;
pub use recovery::{with_retry, RetryStrategy};
pub use region::{Coordinate, Region, RegionMap};
pub use series::{localize, RawPoint, Series, TimeSeriesPoint, WindSample};
pub use transport::{deliver, Budget, Transmission};
pub use window::{reduce, Window};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
