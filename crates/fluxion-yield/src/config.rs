// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

use anyhow::{Context, Result, bail};
use chrono_tz::Tz;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::info;

use fluxion_yield_core::{ComparisonWindows, RateLimitConfig};

pub const DEFAULT_CONFIG_PATH: &str = "yield_config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct YieldConfig {
    pub storage: StorageSettings,
    pub location: LocationSettings,
    pub sampling: SamplingSettings,
    pub comparison: ComparisonWindows,
    pub device: DeviceSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    #[serde(default = "default_db_path")]
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationSettings {
    /// IANA timezone name defining the calendar day
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SamplingSettings {
    #[serde(default = "default_interval_secs")]
    pub min_interval_secs: u64,
    #[serde(default = "default_interval_secs")]
    pub collect_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeviceSettings {
    /// Bridge program printing one JSON reading on stdout
    #[serde(default = "default_device_command")]
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default = "default_device_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_db_path() -> String {
    "./data/fluxion-yield.db".to_owned()
}

fn default_timezone() -> String {
    "UTC".to_owned()
}

fn default_interval_secs() -> u64 {
    300
}

fn default_device_command() -> String {
    "python3".to_owned()
}

fn default_device_timeout_secs() -> u64 {
    30
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

impl Default for LocationSettings {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
        }
    }
}

impl Default for SamplingSettings {
    fn default() -> Self {
        Self {
            min_interval_secs: default_interval_secs(),
            collect_interval_secs: default_interval_secs(),
        }
    }
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            command: default_device_command(),
            args: vec!["kostal_python_bridge.py".to_owned()],
            timeout_secs: default_device_timeout_secs(),
        }
    }
}

impl DeviceSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl SamplingSettings {
    pub fn rate_limit(&self) -> RateLimitConfig {
        RateLimitConfig {
            min_interval_secs: self.min_interval_secs,
        }
    }

    pub fn collect_interval(&self) -> Duration {
        Duration::from_secs(self.collect_interval_secs)
    }
}

impl YieldConfig {
    /// Load the config file, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn timezone(&self) -> Result<Tz> {
        self.location
            .timezone
            .parse::<Tz>()
            .map_err(|e| anyhow::anyhow!("location.timezone '{}': {e}", self.location.timezone))
    }

    fn validate(&self) -> Result<()> {
        self.comparison.validate()?;
        self.sampling.rate_limit().min_interval()?;
        self.timezone()?;
        if self.sampling.collect_interval_secs == 0 {
            bail!("sampling.collect_interval_secs must be at least 1");
        }
        if self.device.timeout_secs == 0 {
            bail!("device.timeout_secs must be at least 1");
        }
        if self.device.command.trim().is_empty() {
            bail!("device.command must be set");
        }
        if self.storage.path.is_empty() {
            bail!("storage.path must be set");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = YieldConfig::from_toml("").unwrap();
        assert_eq!(config.storage.path, "./data/fluxion-yield.db");
        assert_eq!(config.timezone().unwrap(), Tz::UTC);
        assert_eq!(config.sampling.min_interval_secs, 300);
        assert_eq!(config.sampling.collect_interval(), Duration::from_secs(300));
        assert_eq!(config.comparison, ComparisonWindows::default());
        assert_eq!(config.device.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_sections() {
        let config = YieldConfig::from_toml(
            r#"
            [location]
            timezone = "Europe/Berlin"

            [comparison]
            month_window_days = 14

            [device]
            command = "/usr/local/bin/inverter-bridge"
            args = ["--host", "192.168.1.50"]
            "#,
        )
        .unwrap();

        assert_eq!(config.timezone().unwrap(), chrono_tz::Europe::Berlin);
        assert_eq!(config.comparison.month_window_days, 14);
        assert_eq!(config.comparison.week_window_days, 6);
        assert_eq!(config.device.args, vec!["--host", "192.168.1.50"]);
        assert_eq!(config.device.timeout_secs, 30);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(YieldConfig::from_toml("[location]\ntimezone = \"Mars/Olympus\"").is_err());
        assert!(YieldConfig::from_toml("[comparison]\nprevious_day_days = 0").is_err());
        assert!(YieldConfig::from_toml("[sampling]\nmin_interval_secs = 0").is_err());
        assert!(YieldConfig::from_toml("[sampling]\ncollect_interval_secs = 0").is_err());
        assert!(YieldConfig::from_toml("[device]\ncommand = \"  \"").is_err());
        assert!(YieldConfig::from_toml("[storage]\npath = 42").is_err());
    }

    #[test]
    fn test_example_config_parses() {
        let config = YieldConfig::from_toml(include_str!("../../../yield_config.example.toml"))
            .unwrap();
        assert_eq!(config.timezone().unwrap(), chrono_tz::Europe::Prague);
        assert_eq!(config.comparison, ComparisonWindows::default());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = YieldConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.sampling.collect_interval_secs, 300);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("yield_config.toml");
        std::fs::write(&path, "[storage\npath = ").unwrap();
        let err = YieldConfig::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("yield_config.toml"));
    }
}
