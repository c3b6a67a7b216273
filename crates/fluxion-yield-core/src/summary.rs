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

use chrono::NaiveDate;

use fluxion_yield_types::{DailySummary, Sample, SummaryStatus};

use crate::energy::{chronological, integrate_sorted};
use crate::production::detect_sorted;

/// Build the summary of `date` from that day's samples.
///
/// Pure function of its input: the same samples give the same summary,
/// whatever their order, including samples that share a timestamp.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn build_summary(date: NaiveDate, samples: &[Sample]) -> DailySummary {
    if samples.is_empty() {
        return DailySummary::no_data(date);
    }

    let samples = chronological(samples);
    let total_energy_kwh = integrate_sorted(&samples);
    let periods = detect_sorted(&samples);

    let max_power_w = samples
        .iter()
        .map(|s| s.power_w)
        .fold(f64::NEG_INFINITY, f64::max);
    let avg_temperature_c =
        samples.iter().map(|s| s.temperature_c).sum::<f64>() / samples.len() as f64;

    let status = if total_energy_kwh > 0.0 {
        SummaryStatus::Success
    } else {
        SummaryStatus::NoProduction
    };

    DailySummary {
        date,
        total_energy_kwh,
        max_power_w,
        avg_temperature_c,
        production_hours: periods.total_hours(),
        production_start: periods.start(),
        production_end: periods.end(),
        period_count: periods.period_count(),
        sample_count: u32::try_from(samples.len()).unwrap_or(u32::MAX),
        status,
    }
}
