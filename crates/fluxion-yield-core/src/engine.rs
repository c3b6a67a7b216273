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

//! Aggregation engine: day summaries, comparisons and reports over the stores.

use chrono::NaiveDate;
use tracing::info;

use fluxion_yield_types::{ComparisonMetrics, DailyReport, DailySummary};

use crate::comparison::compute_comparisons;
use crate::config::ComparisonWindows;
use crate::error::{EngineError, Result};
use crate::report::assemble_report;
use crate::store::{SampleStore, SummaryStore};
use crate::summary::build_summary;

#[derive(Debug)]
pub struct AggregationEngine<'a, S: SampleStore + ?Sized, Y: SummaryStore + ?Sized> {
    samples: &'a S,
    summaries: &'a Y,
    windows: ComparisonWindows,
}

impl<'a, S: SampleStore + ?Sized, Y: SummaryStore + ?Sized> AggregationEngine<'a, S, Y> {
    pub fn new(samples: &'a S, summaries: &'a Y, windows: ComparisonWindows) -> Result<Self> {
        windows.validate()?;
        Ok(Self {
            samples,
            summaries,
            windows,
        })
    }

    /// Compute the summary of `date` and store it, replacing any earlier one.
    ///
    /// Days without samples produce a `NO_DATA` summary that is returned but
    /// not stored, so it never shows up as a zero-yield day in comparisons.
    pub fn summarize_day(&self, date: NaiveDate) -> Result<DailySummary> {
        let samples = self
            .samples
            .read_all(date)
            .map_err(EngineError::SampleStore)?;
        let summary = build_summary(date, &samples);

        if summary.has_data() {
            self.summaries
                .upsert(&summary)
                .map_err(EngineError::SummaryStore)?;
        }

        info!(
            %date,
            status = %summary.status,
            energy_kwh = summary.total_energy_kwh,
            samples = summary.sample_count,
            persisted = summary.has_data(),
            "Daily summary computed"
        );
        Ok(summary)
    }

    pub fn compare(&self, date: NaiveDate) -> Result<ComparisonMetrics> {
        compute_comparisons(self.summaries, date, &self.windows)
    }

    /// Summarize `date` and attach comparisons when the day has data.
    pub fn daily_report(&self, date: NaiveDate) -> Result<DailyReport> {
        let summary = self.summarize_day(date)?;
        let comparisons = if summary.has_data() {
            Some(self.compare(date)?)
        } else {
            None
        };
        Ok(assemble_report(&summary, comparisons))
    }
}
