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

//! Debounce gate in front of the sample store.
//!
//! Only the time of the last accepted sample is kept, in memory. Rejected
//! samples are dropped, never queued.

use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

use crate::clock::Clock;
use crate::config::RateLimitConfig;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Accepted,
    Throttled { retry_in: TimeDelta },
}

impl Admission {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

#[derive(Debug)]
pub struct RateLimiter<C: Clock> {
    clock: C,
    min_interval: TimeDelta,
    last_accepted: Option<DateTime<Utc>>,
}

impl<C: Clock> RateLimiter<C> {
    pub fn new(config: &RateLimitConfig, clock: C) -> Result<Self> {
        Ok(Self {
            clock,
            min_interval: config.min_interval()?,
            last_accepted: None,
        })
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Admit the caller if at least `min_interval` passed since the last admission.
    ///
    /// A clock that went backwards counts as enough spacing and re-arms the gate.
    pub fn try_acquire(&mut self) -> Admission {
        let now = self.clock.now();

        if let Some(last) = self.last_accepted {
            let elapsed = now - last;
            if elapsed >= TimeDelta::zero() && elapsed < self.min_interval {
                let retry_in = self.min_interval - elapsed;
                debug!(
                    elapsed_secs = elapsed.num_seconds(),
                    retry_in_secs = retry_in.num_seconds(),
                    "Sample throttled"
                );
                return Admission::Throttled { retry_in };
            }
        }

        self.last_accepted = Some(now);
        Admission::Accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::TimeZone;
    use std::sync::Arc;

    fn limiter() -> (Arc<ManualClock>, RateLimiter<Arc<ManualClock>>) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap(),
        ));
        let limiter = RateLimiter::new(&RateLimitConfig::default(), Arc::clone(&clock)).unwrap();
        (clock, limiter)
    }

    #[test]
    fn test_first_sample_always_accepted() {
        let (_clock, mut limiter) = limiter();
        assert!(limiter.try_acquire().is_accepted());
    }

    #[test]
    fn test_sample_within_interval_throttled() {
        let (clock, mut limiter) = limiter();
        assert!(limiter.try_acquire().is_accepted());

        clock.advance(TimeDelta::seconds(60));
        assert_eq!(
            limiter.try_acquire(),
            Admission::Throttled {
                retry_in: TimeDelta::seconds(240)
            }
        );
    }

    #[test]
    fn test_interval_measured_from_last_accepted() {
        let (clock, mut limiter) = limiter();
        let first = limiter.try_acquire();
        assert!(first.is_accepted());

        clock.advance(TimeDelta::seconds(60));
        assert!(!limiter.try_acquire().is_accepted());

        // 5 minutes after the first, not after the throttled one
        clock.advance(TimeDelta::seconds(240));
        assert!(limiter.try_acquire().is_accepted());
    }

    #[test]
    fn test_backwards_clock_rearms() {
        let (clock, mut limiter) = limiter();
        assert!(limiter.try_acquire().is_accepted());

        clock.advance(TimeDelta::hours(-1));
        assert_eq!(limiter.try_acquire(), Admission::Accepted);

        // Spacing now counts from the rewound time
        clock.advance(TimeDelta::seconds(60));
        assert!(!limiter.try_acquire().is_accepted());
    }
}
