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

//! Descriptive statistics over raw samples, used to sanity-check collection.

use serde::Serialize;

use fluxion_yield_types::Sample;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl Range {
    #[expect(clippy::cast_precision_loss)]
    fn of(values: impl Iterator<Item = f64> + Clone) -> Option<Self> {
        let count = values.clone().count();
        if count == 0 {
            return None;
        }
        let (min, max, sum) = values.fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, sum), v| (min.min(v), max.max(v), sum + v),
        );
        Some(Self {
            min,
            max,
            mean: sum / count as f64,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleStats {
    pub count: usize,
    pub power_w: Range,
    pub temperature_c: Range,
    /// Samples whose values all look like device defaults
    pub fallback_count: usize,
    pub producing_count: usize,
}

impl SampleStats {
    /// `None` for an empty slice.
    pub fn from_samples(samples: &[Sample]) -> Option<Self> {
        Some(Self {
            count: samples.len(),
            power_w: Range::of(samples.iter().map(|s| s.power_w))?,
            temperature_c: Range::of(samples.iter().map(|s| s.temperature_c))?,
            fallback_count: samples.iter().filter(|s| s.is_fallback()).count(),
            producing_count: samples.iter().filter(|s| s.producing).count(),
        })
    }

    pub fn real_count(&self) -> usize {
        self.count - self.fallback_count
    }

    /// True when not a single sample carried a real measurement.
    pub fn all_fallback(&self) -> bool {
        self.real_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_empty_has_no_stats() {
        assert!(SampleStats::from_samples(&[]).is_none());
    }

    #[test]
    fn test_ranges_and_counts() {
        let ts = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let samples = [
            Sample::new(ts, 0.0, false),
            Sample::new(ts, 1500.0, true).with_temperature(35.0),
            Sample::new(ts, 2500.0, true).with_temperature(41.0),
        ];
        let stats = SampleStats::from_samples(&samples).unwrap();

        assert_eq!(stats.count, 3);
        assert!((stats.power_w.min - 0.0).abs() < 1e-9);
        assert!((stats.power_w.max - 2500.0).abs() < 1e-9);
        assert!((stats.power_w.mean - 4000.0 / 3.0).abs() < 1e-9);
        assert!((stats.temperature_c.min - 20.0).abs() < 1e-9);
        assert!((stats.temperature_c.mean - 32.0).abs() < 1e-9);
        assert_eq!(stats.fallback_count, 1);
        assert_eq!(stats.real_count(), 2);
        assert_eq!(stats.producing_count, 2);
        assert!(!stats.all_fallback());
    }

    #[test]
    fn test_all_fallback_detected() {
        let ts = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let samples = [Sample::new(ts, 0.0, false), Sample::new(ts, 0.0, false)];
        assert!(SampleStats::from_samples(&samples).unwrap().all_fallback());
    }
}
