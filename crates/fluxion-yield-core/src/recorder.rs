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

//! Rate-limited ingestion of samples into the sample store.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use chrono_tz::Tz;
use tracing::debug;

use fluxion_yield_types::Sample;

use crate::clock::Clock;
use crate::error::{EngineError, Result};
use crate::rate_limit::{Admission, RateLimiter};
use crate::store::SampleStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Stored { date: NaiveDate },
    /// Dropped by the rate limiter
    Throttled { retry_in: TimeDelta },
}

#[derive(Debug)]
pub struct SampleRecorder<'a, S: SampleStore + ?Sized, C: Clock> {
    store: &'a S,
    limiter: RateLimiter<C>,
    timezone: Tz,
}

impl<'a, S: SampleStore + ?Sized, C: Clock> SampleRecorder<'a, S, C> {
    pub fn new(store: &'a S, limiter: RateLimiter<C>, timezone: Tz) -> Self {
        Self {
            store,
            limiter,
            timezone,
        }
    }

    /// Current time on the limiter's clock, used to timestamp new readings.
    pub fn now(&self) -> DateTime<Utc> {
        self.limiter.clock().now()
    }

    /// Calendar day a sample belongs to in the configured timezone.
    pub fn day_of(&self, sample: &Sample) -> NaiveDate {
        sample.timestamp.with_timezone(&self.timezone).date_naive()
    }

    /// Offer a sample to the rate limiter and persist it when admitted.
    ///
    /// A store failure after admission is returned as-is; the admission is
    /// not rolled back.
    pub fn record(&mut self, sample: Sample) -> Result<RecordOutcome> {
        match self.limiter.try_acquire() {
            Admission::Throttled { retry_in } => Ok(RecordOutcome::Throttled { retry_in }),
            Admission::Accepted => {
                let date = self.day_of(&sample);
                self.store
                    .append(date, &sample)
                    .map_err(EngineError::SampleStore)?;
                debug!(%date, power_w = sample.power_w, producing = sample.producing, "Sample stored");
                Ok(RecordOutcome::Stored { date })
            }
        }
    }
}
