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

//! Daily yield aggregation for a single PV inverter.
//!
//! Samples are ingested through a [`SampleRecorder`] that debounces writes,
//! then reduced per calendar day into a [`DailySummary`] by the
//! [`AggregationEngine`], which also compares the day against stored history.
//! Storage is pluggable through [`SampleStore`] and [`SummaryStore`].

pub mod clock;
pub mod comparison;
pub mod config;
pub mod energy;
pub mod engine;
pub mod error;
pub mod production;
pub mod rate_limit;
pub mod recorder;
pub mod report;
pub mod stats;
pub mod store;
pub mod summary;

pub use clock::{Clock, ManualClock, SystemClock};
pub use comparison::compute_comparisons;
pub use config::{ComparisonWindows, RateLimitConfig};
pub use energy::integrate_energy;
pub use engine::AggregationEngine;
pub use error::{EngineError, Result};
pub use production::{ProductionInterval, ProductionPeriods, detect_production};
pub use rate_limit::{Admission, RateLimiter};
pub use recorder::{RecordOutcome, SampleRecorder};
pub use report::assemble_report;
pub use stats::SampleStats;
pub use store::{MemoryStore, SampleStore, SummaryStore};
pub use summary::build_summary;

pub use fluxion_yield_types::{DailyReport, DailySummary, Sample, SummaryStatus};
