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

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::{info, warn};

use fluxion_yield_core::{
    AggregationEngine, RateLimiter, RecordOutcome, SampleRecorder, SampleStats, SampleStore,
    SystemClock,
};
use fluxion_yield_store::SqliteStore;
use fluxion_yield_types::DailyReport;

use crate::collector::{ReadingSource, collect_once};
use crate::config::YieldConfig;
use crate::format::TextFormatter;

/// Opened configuration and storage shared by all commands.
#[derive(Debug)]
pub struct App {
    config: YieldConfig,
    timezone: Tz,
    store: SqliteStore,
}

impl App {
    pub fn open(config: YieldConfig) -> Result<Self> {
        let store = SqliteStore::open(&config.storage.path)
            .with_context(|| format!("Failed to open storage at {}", config.storage.path))?;
        Self::with_store(config, store)
    }

    pub fn with_store(config: YieldConfig, store: SqliteStore) -> Result<Self> {
        let timezone = config.timezone()?;
        info!(timezone = %timezone, database = %config.storage.path, "Yield tracker ready");
        Ok(Self {
            config,
            timezone,
            store,
        })
    }

    pub fn config(&self) -> &YieldConfig {
        &self.config
    }

    /// Current calendar day in the configured timezone.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.timezone).date_naive()
    }

    pub fn formatter(&self) -> TextFormatter {
        TextFormatter::new(self.timezone)
    }

    pub fn recorder(&self) -> Result<SampleRecorder<'_, SqliteStore, SystemClock>> {
        let limiter = RateLimiter::new(&self.config.sampling.rate_limit(), SystemClock)?;
        Ok(SampleRecorder::new(&self.store, limiter, self.timezone))
    }

    pub fn engine(&self) -> Result<AggregationEngine<'_, SqliteStore, SqliteStore>> {
        Ok(AggregationEngine::new(
            &self.store,
            &self.store,
            self.config.comparison,
        )?)
    }

    /// Recompute the summary of `date` and build its report.
    pub fn report(&self, date: NaiveDate) -> Result<DailyReport> {
        let report = self
            .engine()?
            .daily_report(date)
            .with_context(|| format!("Failed to build report for {date}"))?;
        Ok(report)
    }

    /// Take one reading and render today's report.
    ///
    /// A failed reading is logged and the report is printed from what is
    /// already stored. Storing a sample also refreshes the summary of the
    /// day before it, so a day left by scheduled collection is finalized.
    pub async fn collect<R: ReadingSource + ?Sized>(&self, source: &R) -> Result<String> {
        let mut recorder = self.recorder()?;
        match collect_once(source, &mut recorder).await {
            Ok(RecordOutcome::Stored { date }) => {
                info!(%date, "Sample stored");
                if let Some(previous) = date.pred_opt() {
                    self.engine()?.summarize_day(previous)?;
                }
            }
            Ok(RecordOutcome::Throttled { retry_in }) => {
                info!(retry_in_secs = retry_in.num_seconds(), "Sample dropped by rate limiter");
            }
            Err(e) => warn!(error = %format!("{e:#}"), "Collection attempt failed"),
        }
        self.render_report(self.today(), false)
    }

    pub fn stats(&self, date: NaiveDate) -> Result<Option<SampleStats>> {
        let samples = self.store.read_all(date)?;
        Ok(SampleStats::from_samples(&samples))
    }

    pub fn render_report(&self, date: NaiveDate, json: bool) -> Result<String> {
        let report = self.report(date)?;
        if json {
            serde_json::to_string_pretty(&report).context("Failed to serialize report")
        } else {
            Ok(self.formatter().format_report(&report))
        }
    }
}
