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

//! Value types shared by the FluxION Yield engine, its stores and the CLI.

pub mod comparison;
pub mod report;
pub mod sample;
pub mod summary;

pub use comparison::{ComparisonMetrics, PointComparison, Trend, WindowAverage};
pub use report::DailyReport;
pub use sample::{FALLBACK_TEMPERATURE_C, Sample};
pub use summary::{DailySummary, SummaryStatus};
