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

//! Comparison of a day against earlier stored summaries.
//!
//! Missing data is carried explicitly (`available`, `days_count`) so that a
//! reported `0.0` can always be told apart from a genuine zero-yield day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Energy of a single earlier day, looked up by exact date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointComparison {
    pub date: NaiveDate,
    /// Stored total energy, or `0.0` when `available` is false
    pub energy_kwh: f64,
    pub available: bool,
}

impl PointComparison {
    #[must_use]
    pub fn found(date: NaiveDate, energy_kwh: f64) -> Self {
        Self {
            date,
            energy_kwh,
            available: true,
        }
    }

    #[must_use]
    pub fn unavailable(date: NaiveDate) -> Self {
        Self {
            date,
            energy_kwh: 0.0,
            available: false,
        }
    }

    #[must_use]
    pub fn energy(&self) -> Option<f64> {
        self.available.then_some(self.energy_kwh)
    }

    /// Difference `today - reference`, if there is a reference.
    #[must_use]
    pub fn delta_from(&self, today_kwh: f64) -> Option<f64> {
        self.energy().map(|reference| today_kwh - reference)
    }
}

/// Mean energy over the stored days of a trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowAverage {
    /// First day of the window (inclusive)
    pub from: NaiveDate,
    /// Last day of the window (inclusive)
    pub to: NaiveDate,
    /// Mean over the days present, `0.0` when `days_count` is zero
    pub avg_energy_kwh: f64,
    pub days_count: u32,
}

impl WindowAverage {
    #[must_use]
    pub fn average(&self) -> Option<f64> {
        (self.days_count > 0).then_some(self.avg_energy_kwh)
    }

    #[must_use]
    pub fn delta_from(&self, today_kwh: f64) -> Option<f64> {
        self.average().map(|reference| today_kwh - reference)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonMetrics {
    pub previous_day: PointComparison,
    pub previous_week: PointComparison,
    pub previous_month: PointComparison,
    pub week_average: WindowAverage,
    pub month_average: WindowAverage,
}

/// Direction of today's yield relative to a reference value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    #[must_use]
    pub fn of_delta(delta: f64) -> Self {
        if delta > 0.0 {
            Self::Up
        } else if delta < 0.0 {
            Self::Down
        } else {
            Self::Flat
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    #[test]
    fn test_unavailable_point_has_no_delta() {
        let missing = PointComparison::unavailable(date(1));
        assert!((missing.energy_kwh - 0.0).abs() < f64::EPSILON);
        assert_eq!(missing.energy(), None);
        assert_eq!(missing.delta_from(12.0), None);
    }

    #[test]
    fn test_zero_yield_point_is_still_available() {
        let dark_day = PointComparison::found(date(1), 0.0);
        assert_eq!(dark_day.energy(), Some(0.0));
        assert_eq!(dark_day.delta_from(3.5), Some(3.5));
    }

    #[test]
    fn test_empty_window_has_no_average() {
        let window = WindowAverage {
            from: date(1),
            to: date(6),
            avg_energy_kwh: 0.0,
            days_count: 0,
        };
        assert_eq!(window.average(), None);
    }

    #[test]
    fn test_trend_direction() {
        assert_eq!(Trend::of_delta(0.4), Trend::Up);
        assert_eq!(Trend::of_delta(-0.4), Trend::Down);
        assert_eq!(Trend::of_delta(0.0), Trend::Flat);
    }
}
