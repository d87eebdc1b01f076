// Windcast - Compact wind forecasts for satellite text links
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Windcast configuration.
//!
//! Loaded from JSON. Every section has defaults matching the deployed
//! setup, so a config file only needs the regions.

use crate::composer::ComposerConfig;
use crate::daytime::{DaytimeFilter, DEFAULT_DAY_END, DEFAULT_DAY_START};
use crate::error::{Result, WindcastError};
use crate::region::RegionMap;
use crate::transport::Budget;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Zone of the forecast areas.
pub const DEFAULT_TIMEZONE: &str = "America/Los_Angeles";

/// Master configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindcastConfig {
    /// Forecast local zone.
    pub timezone: TimezoneConfig,

    /// Hours of the day worth sending.
    pub daytime: DaytimeConfig,

    /// Window widths per day.
    pub windows: WindowConfig,

    /// Outbound transport limits.
    pub transport: TransportConfig,

    /// Known regions, in lookup order.
    pub regions: RegionMap,
}

/// Local zone of the forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimezoneConfig {
    /// IANA zone name. Daylight saving follows the zone's rules.
    pub name: String,
}

impl Default for TimezoneConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

/// Daytime hours, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaytimeConfig {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for DaytimeConfig {
    fn default() -> Self {
        Self {
            start_hour: DEFAULT_DAY_START,
            end_hour: DEFAULT_DAY_END,
        }
    }
}

/// Window widths, in hourly rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub today_hours: usize,
    pub tomorrow_hours: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        let composer = ComposerConfig::default();
        Self {
            today_hours: composer.today_window_hours,
            tomorrow_hours: composer.tomorrow_window_hours,
        }
    }
}

/// Outbound transport settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Maximum characters per outbound message.
    pub budget: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            budget: Budget::SHORT.chars(),
        }
    }
}

impl WindcastConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| WindcastError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            WindcastError::InvalidConfig(format!("{}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.timezone()?;
        self.daytime_filter()?;
        self.composer_config().validate()?;
        self.budget()?;
        self.regions.validate()?;
        Ok(())
    }

    /// Forecast local zone.
    pub fn timezone(&self) -> Result<Tz> {
        self.timezone.name.parse::<Tz>().map_err(|_| {
            WindcastError::InvalidConfig(format!("unknown timezone: {}", self.timezone.name))
        })
    }

    /// Daytime filter for the configured hours.
    pub fn daytime_filter(&self) -> Result<DaytimeFilter> {
        DaytimeFilter::new(self.daytime.start_hour, self.daytime.end_hour).ok_or_else(|| {
            WindcastError::InvalidConfig(format!(
                "invalid daytime hours: {}..={}",
                self.daytime.start_hour, self.daytime.end_hour
            ))
        })
    }

    /// Composer settings.
    pub fn composer_config(&self) -> ComposerConfig {
        ComposerConfig {
            today_window_hours: self.windows.today_hours,
            tomorrow_window_hours: self.windows.tomorrow_hours,
        }
    }

    /// Transport budget.
    pub fn budget(&self) -> Result<Budget> {
        Budget::new(self.transport.budget).ok_or_else(|| {
            WindcastError::InvalidConfig("transport budget must be at least 1".to_string())
        })
    }
}
