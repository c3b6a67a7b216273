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

//! Turns a summary and its comparisons into a presentation record.
//!
//! Rounding happens here and only here; stored summaries stay exact.

use fluxion_yield_types::{
    ComparisonMetrics, DailyReport, DailySummary, PointComparison, WindowAverage,
};

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

fn round_point(point: PointComparison) -> PointComparison {
    PointComparison {
        energy_kwh: round_to(point.energy_kwh, 3),
        ..point
    }
}

fn round_window(window: WindowAverage) -> WindowAverage {
    WindowAverage {
        avg_energy_kwh: round_to(window.avg_energy_kwh, 3),
        ..window
    }
}

/// Assemble the report for one day.
///
/// Comparisons are dropped for days without data.
#[must_use]
pub fn assemble_report(
    summary: &DailySummary,
    comparisons: Option<ComparisonMetrics>,
) -> DailyReport {
    let comparisons = comparisons
        .filter(|_| summary.has_data())
        .map(|c| ComparisonMetrics {
            previous_day: round_point(c.previous_day),
            previous_week: round_point(c.previous_week),
            previous_month: round_point(c.previous_month),
            week_average: round_window(c.week_average),
            month_average: round_window(c.month_average),
        });

    DailyReport {
        date: summary.date,
        total_energy_kwh: round_to(summary.total_energy_kwh, 3),
        max_power_watts: round_to(summary.max_power_w, 1),
        avg_temperature_celsius: round_to(summary.avg_temperature_c, 1),
        production_hours: round_to(summary.production_hours, 2),
        production_start: summary.production_start,
        production_end: summary.production_end,
        data_points: summary.sample_count,
        status: summary.status,
        comparisons,
    }
}
