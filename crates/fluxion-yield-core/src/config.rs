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

//! Tunable constants of the engine.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Lookback offsets and trailing windows used for comparisons, in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonWindows {
    #[serde(default = "default_previous_day_days")]
    pub previous_day_days: u32,
    #[serde(default = "default_previous_week_days")]
    pub previous_week_days: u32,
    #[serde(default = "default_previous_month_days")]
    pub previous_month_days: u32,
    /// Days before the target covered by the weekly average
    #[serde(default = "default_week_window_days")]
    pub week_window_days: u32,
    /// Days before the target covered by the monthly average
    #[serde(default = "default_month_window_days")]
    pub month_window_days: u32,
}

fn default_previous_day_days() -> u32 {
    1
}

fn default_previous_week_days() -> u32 {
    7
}

fn default_previous_month_days() -> u32 {
    30
}

fn default_week_window_days() -> u32 {
    6
}

fn default_month_window_days() -> u32 {
    29
}

impl Default for ComparisonWindows {
    fn default() -> Self {
        Self {
            previous_day_days: default_previous_day_days(),
            previous_week_days: default_previous_week_days(),
            previous_month_days: default_previous_month_days(),
            week_window_days: default_week_window_days(),
            month_window_days: default_month_window_days(),
        }
    }
}

impl ComparisonWindows {
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("previous_day_days", self.previous_day_days),
            ("previous_week_days", self.previous_week_days),
            ("previous_month_days", self.previous_month_days),
            ("week_window_days", self.week_window_days),
            ("month_window_days", self.month_window_days),
        ];
        for (name, value) in fields {
            if value == 0 {
                return Err(EngineError::InvalidConfig(format!(
                    "comparison.{name} must be at least 1"
                )));
            }
        }
        Ok(())
    }
}

/// Minimum spacing between two stored samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_min_interval_secs")]
    pub min_interval_secs: u64,
}

fn default_min_interval_secs() -> u64 {
    300
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            min_interval_secs: default_min_interval_secs(),
        }
    }
}

impl RateLimitConfig {
    pub fn min_interval(&self) -> Result<TimeDelta> {
        if self.min_interval_secs == 0 {
            return Err(EngineError::InvalidConfig(
                "sampling.min_interval_secs must be at least 1".to_owned(),
            ));
        }
        i64::try_from(self.min_interval_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .ok_or_else(|| {
                EngineError::InvalidConfig(format!(
                    "sampling.min_interval_secs {} is out of range",
                    self.min_interval_secs
                ))
            })
    }
}
