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

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::comparison::ComparisonMetrics;
use crate::summary::SummaryStatus;

/// Presentation record of one day, ready for text or JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub total_energy_kwh: f64,
    pub max_power_watts: f64,
    pub avg_temperature_celsius: f64,
    pub production_hours: f64,
    pub production_start: Option<DateTime<Utc>>,
    pub production_end: Option<DateTime<Utc>>,
    pub data_points: u32,
    pub status: SummaryStatus,
    /// Absent for days without data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparisons: Option<ComparisonMetrics>,
}
