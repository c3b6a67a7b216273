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

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Temperature the device reports when it has no real reading.
pub const FALLBACK_TEMPERATURE_C: f64 = 20.0;

/// One telemetry observation from the inverter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    /// Net AC power in watts; negative when house load exceeds generation
    pub power_w: f64,
    /// Cumulative energy counter as reported by the device (informational)
    pub energy_kwh: f64,
    pub temperature_c: f64,
    /// True while the inverter reports an active generation state
    pub producing: bool,
}

impl Sample {
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, power_w: f64, producing: bool) -> Self {
        Self {
            timestamp,
            power_w,
            energy_kwh: 0.0,
            temperature_c: FALLBACK_TEMPERATURE_C,
            producing,
        }
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature_c: f64) -> Self {
        self.temperature_c = temperature_c;
        self
    }

    #[must_use]
    pub fn with_energy(mut self, energy_kwh: f64) -> Self {
        self.energy_kwh = energy_kwh;
        self
    }

    /// Whether every value looks like a device default rather than a measurement.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.power_w <= 0.001 && (self.temperature_c - FALLBACK_TEMPERATURE_C).abs() < f64::EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fallback_detection() {
        let ts = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();

        assert!(Sample::new(ts, 0.0, false).is_fallback());
        assert!(!Sample::new(ts, 850.0, true).is_fallback());
        assert!(!Sample::new(ts, 0.0, false).with_temperature(31.5).is_fallback());
    }
}
