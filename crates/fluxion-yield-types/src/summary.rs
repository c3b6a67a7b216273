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

/// Classification of a computed day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SummaryStatus {
    /// No samples were recorded for the date
    NoData,
    /// Samples exist but the integrated energy is not positive
    NoProduction,
    Success,
}

impl SummaryStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoData => "NO_DATA",
            Self::NoProduction => "NO_PRODUCTION",
            Self::Success => "SUCCESS",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "NO_DATA" => Some(Self::NoData),
            "NO_PRODUCTION" => Some(Self::NoProduction),
            "SUCCESS" => Some(Self::Success),
            _ => None,
        }
    }
}

impl std::fmt::Display for SummaryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregated result of one calendar day of samples.
///
/// Numeric fields are only meaningful when `status` is not [`SummaryStatus::NoData`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    /// Trapezoidal integral of power over the day (kWh)
    pub total_energy_kwh: f64,
    pub max_power_w: f64,
    pub avg_temperature_c: f64,
    pub production_hours: f64,
    pub production_start: Option<DateTime<Utc>>,
    pub production_end: Option<DateTime<Utc>>,
    pub period_count: u32,
    pub sample_count: u32,
    pub status: SummaryStatus,
}

impl DailySummary {
    /// Summary for a date without any recorded samples.
    #[must_use]
    pub fn no_data(date: NaiveDate) -> Self {
        Self {
            date,
            total_energy_kwh: 0.0,
            max_power_w: 0.0,
            avg_temperature_c: 0.0,
            production_hours: 0.0,
            production_start: None,
            production_end: None,
            period_count: 0,
            sample_count: 0,
            status: SummaryStatus::NoData,
        }
    }

    #[must_use]
    pub fn has_data(&self) -> bool {
        self.status != SummaryStatus::NoData
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_mapping() {
        for status in [
            SummaryStatus::NoData,
            SummaryStatus::NoProduction,
            SummaryStatus::Success,
        ] {
            assert_eq!(SummaryStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(SummaryStatus::parse("running"), None);
    }

    #[test]
    fn test_status_serializes_like_report_field() {
        let json = serde_json::to_string(&SummaryStatus::NoProduction).unwrap();
        assert_eq!(json, "\"NO_PRODUCTION\"");
    }

    #[test]
    fn test_no_data_summary() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let summary = DailySummary::no_data(date);

        assert!(!summary.has_data());
        assert_eq!(summary.sample_count, 0);
        assert!(summary.production_start.is_none());
    }
}
