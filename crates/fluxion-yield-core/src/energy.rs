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

//! Energy integration of power samples.
//!
//! Energy is derived from the instantaneous `power_w` readings with the
//! trapezoidal rule; the device's own energy counter is not used.

use std::borrow::Cow;
use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use fluxion_yield_types::Sample;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;
const WATTS_PER_KILOWATT: f64 = 1000.0;

/// Total order on samples: timestamp first, then the readings themselves,
/// so samples sharing a timestamp always line up the same way.
fn sample_order(a: &Sample, b: &Sample) -> Ordering {
    a.timestamp
        .cmp(&b.timestamp)
        .then_with(|| a.power_w.total_cmp(&b.power_w))
        .then_with(|| a.producing.cmp(&b.producing))
        .then_with(|| a.temperature_c.total_cmp(&b.temperature_c))
        .then_with(|| a.energy_kwh.total_cmp(&b.energy_kwh))
}

/// Samples in a canonical chronological order, borrowing when the input
/// already is.
pub(crate) fn chronological(samples: &[Sample]) -> Cow<'_, [Sample]> {
    if samples.is_sorted_by(|a, b| sample_order(a, b).is_le()) {
        Cow::Borrowed(samples)
    } else {
        let mut sorted = samples.to_vec();
        sorted.sort_by(sample_order);
        Cow::Owned(sorted)
    }
}

/// Length of `[start, end]` in fractional hours.
#[expect(clippy::cast_precision_loss)]
pub(crate) fn hours_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / MILLIS_PER_HOUR
}

/// Integrate a day's power readings into kWh.
///
/// Input order does not matter. Fewer than two samples yield `0.0`.
/// Intervals with net negative power reduce the total; nothing is clamped.
#[must_use]
pub fn integrate_energy(samples: &[Sample]) -> f64 {
    integrate_sorted(&chronological(samples))
}

pub(crate) fn integrate_sorted(samples: &[Sample]) -> f64 {
    samples
        .windows(2)
        .map(|pair| {
            let dt_hours = hours_between(pair[0].timestamp, pair[1].timestamp);
            let avg_power_w = (pair[0].power_w + pair[1].power_w) / 2.0;
            avg_power_w * dt_hours / WATTS_PER_KILOWATT
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    const EPS: f64 = 1e-9;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_two_samples_one_hour_apart() {
        let samples = [
            Sample::new(at(10, 0), 1000.0, true),
            Sample::new(at(11, 0), 3000.0, true),
        ];
        assert!((integrate_energy(&samples) - 2.0).abs() < EPS);
    }

    #[test]
    fn test_empty_and_single_sample_yield_zero() {
        assert!(integrate_energy(&[]).abs() < EPS);
        assert!(integrate_energy(&[Sample::new(at(12, 0), 4200.0, true)]).abs() < EPS);
    }

    #[test]
    fn test_unsorted_input_is_sorted_before_integration() {
        let samples = [
            Sample::new(at(12, 0), 2000.0, true),
            Sample::new(at(10, 0), 0.0, false),
            Sample::new(at(11, 0), 2000.0, true),
        ];
        // 1000 W avg for 1 h + 2000 W for 1 h
        assert!((integrate_energy(&samples) - 3.0).abs() < EPS);
    }

    #[test]
    fn test_duplicate_timestamps_contribute_nothing() {
        let samples = [
            Sample::new(at(10, 0), 1000.0, true),
            Sample::new(at(10, 0), 5000.0, true),
            Sample::new(at(11, 0), 5000.0, true),
        ];
        assert!((integrate_energy(&samples) - 5.0).abs() < EPS);

        // Same readings, tied pair swapped
        let swapped = [samples[1], samples[0], samples[2]];
        assert!((integrate_energy(&swapped) - 5.0).abs() < EPS);
    }

    #[test]
    fn test_negative_power_reduces_total() {
        let samples = [
            Sample::new(at(6, 0), -200.0, false),
            Sample::new(at(7, 0), -200.0, false),
            Sample::new(at(8, 0), 600.0, true),
        ];
        // -0.2 kWh then +0.2 kWh
        assert!(integrate_energy(&samples).abs() < EPS);

        let night = [
            Sample::new(at(1, 0), -50.0, false),
            Sample::new(at(3, 0), -50.0, false),
        ];
        assert!((integrate_energy(&night) + 0.1).abs() < EPS);
    }

    #[test]
    fn test_five_minute_grid() {
        let start = at(9, 0);
        let samples: Vec<Sample> = (0..=12)
            .map(|i| Sample::new(start + TimeDelta::minutes(5 * i), 1200.0, true))
            .collect();
        assert!((integrate_energy(&samples) - 1.2).abs() < EPS);
    }

    #[test]
    fn test_hours_between() {
        assert!((hours_between(at(8, 0), at(9, 30)) - 1.5).abs() < EPS);
        assert!(hours_between(at(8, 0), at(8, 0)).abs() < EPS);
    }
}
