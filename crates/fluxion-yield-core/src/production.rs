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

//! Detection of contiguous production intervals from the `producing` flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fluxion_yield_types::Sample;

use crate::energy::{chronological, hours_between};

/// `[start, end)` span during which the inverter reported generation.
///
/// An interval still open at the last sample ends at that sample, so
/// `start == end` is possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ProductionInterval {
    pub fn hours(&self) -> f64 {
        hours_between(self.start, self.end)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductionPeriods {
    pub intervals: Vec<ProductionInterval>,
}

impl ProductionPeriods {
    pub fn period_count(&self) -> u32 {
        u32::try_from(self.intervals.len()).unwrap_or(u32::MAX)
    }

    pub fn total_hours(&self) -> f64 {
        self.intervals.iter().map(ProductionInterval::hours).sum()
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.intervals.first().map(|i| i.start)
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.intervals.last().map(|i| i.end)
    }
}

/// Scan samples in timestamp order and collect production intervals.
#[must_use]
pub fn detect_production(samples: &[Sample]) -> ProductionPeriods {
    detect_sorted(&chronological(samples))
}

pub(crate) fn detect_sorted(samples: &[Sample]) -> ProductionPeriods {
    let mut intervals = Vec::new();
    let mut open: Option<DateTime<Utc>> = None;

    for sample in samples {
        match (sample.producing, open) {
            (true, None) => open = Some(sample.timestamp),
            (false, Some(start)) => {
                intervals.push(ProductionInterval {
                    start,
                    end: sample.timestamp,
                });
                open = None;
            }
            _ => {}
        }
    }

    if let (Some(start), Some(last)) = (open, samples.last()) {
        intervals.push(ProductionInterval {
            start,
            end: last.timestamp,
        });
    }

    ProductionPeriods { intervals }
}
