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

//! Storage contracts the engine depends on.
//!
//! Backends report their own failures through `anyhow`; the engine wraps
//! them into [`crate::EngineError`].

use std::collections::BTreeMap;

use anyhow::Result;
use chrono::NaiveDate;
use parking_lot::Mutex;

use fluxion_yield_types::{DailySummary, Sample};

/// Append-only samples, grouped by calendar day.
pub trait SampleStore: Send + Sync {
    /// Add one sample to the given day without rewriting earlier ones.
    fn append(&self, date: NaiveDate, sample: &Sample) -> Result<()>;

    /// All samples of a day in timestamp order; empty for unknown days.
    fn read_all(&self, date: NaiveDate) -> Result<Vec<Sample>>;
}

/// One summary per calendar day.
pub trait SummaryStore: Send + Sync {
    /// Insert or replace the summary stored under `summary.date`.
    fn upsert(&self, summary: &DailySummary) -> Result<()>;

    fn get(&self, date: NaiveDate) -> Result<Option<DailySummary>>;

    /// Summaries with `from <= date <= to`, in no particular order.
    fn get_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<DailySummary>>;
}

/// Process-local store implementing both contracts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    samples: Mutex<BTreeMap<NaiveDate, Vec<Sample>>>,
    summaries: Mutex<BTreeMap<NaiveDate, DailySummary>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SampleStore for MemoryStore {
    fn append(&self, date: NaiveDate, sample: &Sample) -> Result<()> {
        self.samples.lock().entry(date).or_default().push(*sample);
        Ok(())
    }

    fn read_all(&self, date: NaiveDate) -> Result<Vec<Sample>> {
        let mut samples = self.samples.lock().get(&date).cloned().unwrap_or_default();
        samples.sort_by_key(|s| s.timestamp);
        Ok(samples)
    }
}

impl SummaryStore for MemoryStore {
    fn upsert(&self, summary: &DailySummary) -> Result<()> {
        self.summaries.lock().insert(summary.date, summary.clone());
        Ok(())
    }

    fn get(&self, date: NaiveDate) -> Result<Option<DailySummary>> {
        Ok(self.summaries.lock().get(&date).cloned())
    }

    fn get_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<DailySummary>> {
        if from > to {
            return Ok(Vec::new());
        }
        Ok(self
            .summaries
            .lock()
            .range(from..=to)
            .map(|(_, s)| s.clone())
            .collect())
    }
}
