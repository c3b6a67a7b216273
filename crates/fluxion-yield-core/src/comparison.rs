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

//! Comparison of a target day against the summary store.
//!
//! Works on stored summaries only, never on raw samples. The target day is
//! always excluded from the averages.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use tracing::debug;

use fluxion_yield_types::{ComparisonMetrics, PointComparison, WindowAverage};

use crate::config::ComparisonWindows;
use crate::error::{EngineError, Result};
use crate::store::SummaryStore;

fn days_before(target: NaiveDate, days: u32) -> Result<NaiveDate> {
    target
        .checked_sub_days(Days::new(u64::from(days)))
        .ok_or(EngineError::DateOutOfRange { target })
}

fn point_lookup<Y: SummaryStore + ?Sized>(
    store: &Y,
    target: NaiveDate,
    offset_days: u32,
) -> Result<PointComparison> {
    let date = days_before(target, offset_days)?;
    let stored = store.get(date).map_err(EngineError::SummaryStore)?;

    let point = match stored {
        Some(summary) if summary.has_data() => {
            PointComparison::found(date, summary.total_energy_kwh)
        }
        Some(_) | None => PointComparison::unavailable(date),
    };
    debug!(%date, available = point.available, "Point comparison");
    Ok(point)
}

#[expect(clippy::cast_precision_loss)]
fn window_average<Y: SummaryStore + ?Sized>(
    store: &Y,
    target: NaiveDate,
    window_days: u32,
) -> Result<WindowAverage> {
    let from = days_before(target, window_days)?;
    let to = days_before(target, 1)?;

    // Keyed by date so a backend returning duplicates cannot skew the mean
    let by_date: BTreeMap<NaiveDate, f64> = store
        .get_range(from, to)
        .map_err(EngineError::SummaryStore)?
        .into_iter()
        .filter(|s| s.has_data() && s.date >= from && s.date <= to)
        .map(|s| (s.date, s.total_energy_kwh))
        .collect();

    let days_count = u32::try_from(by_date.len()).unwrap_or(u32::MAX);
    let avg_energy_kwh = if by_date.is_empty() {
        0.0
    } else {
        by_date.values().sum::<f64>() / by_date.len() as f64
    };

    debug!(%from, %to, days_count, "Window average");
    Ok(WindowAverage {
        from,
        to,
        avg_energy_kwh,
        days_count,
    })
}

/// Compute all comparison metrics for `target`.
pub fn compute_comparisons<Y: SummaryStore + ?Sized>(
    store: &Y,
    target: NaiveDate,
    windows: &ComparisonWindows,
) -> Result<ComparisonMetrics> {
    Ok(ComparisonMetrics {
        previous_day: point_lookup(store, target, windows.previous_day_days)?,
        previous_week: point_lookup(store, target, windows.previous_week_days)?,
        previous_month: point_lookup(store, target, windows.previous_month_days)?,
        week_average: window_average(store, target, windows.week_window_days)?,
        month_average: window_average(store, target, windows.month_window_days)?,
    })
}
