//! Run configuration, loaded from JSON.

use crate::error::ConfigError;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// PaySim CSV to read
    pub input_path: PathBuf,
    /// Transformed CSV to write
    pub output_path: PathBuf,
    /// Rolling feature parameters
    pub features: FeaturesConfig,
    /// PaySim column mapping constants
    pub paysim: PaySimConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    /// Reference instant for step-based feeds (`epoch + step days`)
    pub epoch: DateTime<Utc>,
    /// Frequency window length (seconds)
    pub frequency_window_secs: i64,
    /// Mean / standard deviation window length (seconds)
    pub stats_window_secs: i64,
    /// Process account groups on the rayon pool
    pub parallel: bool,
    pub output_order: OutputOrder,
}

/// Order of the enriched output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputOrder {
    /// Feed order (ascending id)
    #[default]
    Arrival,
    /// By account, then time, then id
    Grouped,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaySimConfig {
    pub account_type: String,
    pub currency_code: String,
    /// Seed for office id assignment; fresh entropy when unset
    pub office_seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("fraud_detection.csv"),
            output_path: PathBuf::from("paysim_transformed.csv"),
            features: FeaturesConfig {
                output_order: OutputOrder::Grouped,
                ..FeaturesConfig::default()
            },
            paysim: PaySimConfig::default(),
            log: LogConfig::default(),
        }
    }
}

const DEFAULT_FREQUENCY_WINDOW_SECS: i64 = 24 * 60 * 60;
const DEFAULT_STATS_WINDOW_SECS: i64 = 30 * 24 * 60 * 60;

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            epoch: default_epoch(),
            frequency_window_secs: DEFAULT_FREQUENCY_WINDOW_SECS,
            stats_window_secs: DEFAULT_STATS_WINDOW_SECS,
            parallel: false,
            output_order: OutputOrder::Arrival,
        }
    }
}

impl FeaturesConfig {
    /// Both windows must be positive and representable as a `Duration`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        window("frequency_window_secs", self.frequency_window_secs)?;
        window("stats_window_secs", self.stats_window_secs)?;
        Ok(())
    }

    /// Configured frequency window, or the 24h default if it is invalid.
    pub fn frequency_window(&self) -> Duration {
        window_or_default(
            "frequency_window_secs",
            self.frequency_window_secs,
            DEFAULT_FREQUENCY_WINDOW_SECS,
        )
    }

    /// Configured stats window, or the 30d default if it is invalid.
    pub fn stats_window(&self) -> Duration {
        window_or_default("stats_window_secs", self.stats_window_secs, DEFAULT_STATS_WINDOW_SECS)
    }
}

fn window(name: &'static str, secs: i64) -> Result<Duration, ConfigError> {
    Duration::try_seconds(secs)
        .filter(|d| *d > Duration::zero())
        .ok_or(ConfigError::InvalidWindow { name, secs })
}

fn window_or_default(name: &'static str, secs: i64, default_secs: i64) -> Duration {
    window(name, secs).unwrap_or_else(|e| {
        tracing::warn!(error = %e, default_secs, "using default window");
        Duration::try_seconds(default_secs).unwrap_or_else(Duration::zero)
    })
}

impl Default for PaySimConfig {
    fn default() -> Self {
        Self {
            account_type: "checking".to_string(),
            currency_code: "USD".to_string(),
            office_seed: None,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// 2020-01-01T00:00:00Z
fn default_epoch() -> DateTime<Utc> {
    Utc.timestamp_opt(1_577_836_800, 0).single().unwrap_or_default()
}

impl Config {
    /// Load from JSON file if present; otherwise return default
    pub fn load(path: &std::path::Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(data) => match serde_json::from_str::<Config>(&data) {
                    Ok(c) => match c.features.validate() {
                        Ok(()) => return c,
                        Err(e) => tracing::warn!(path = %path.display(), error = %e, "invalid config; using defaults"),
                    },
                    Err(e) => tracing::warn!(path = %path.display(), error = %e, "invalid config; using defaults"),
                },
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "unreadable config; using defaults"),
            }
        }
        Self::default()
    }
}
