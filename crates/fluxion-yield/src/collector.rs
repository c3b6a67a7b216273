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

//! Device readings: fetching them from the bridge program and feeding them
//! into the sample recorder, once or continuously.

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tokio::process::Command;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use fluxion_yield_core::{
    AggregationEngine, Clock, RecordOutcome, SampleRecorder, SampleStore, SummaryStore,
};
use fluxion_yield_types::{FALLBACK_TEMPERATURE_C, Sample};

use crate::config::DeviceSettings;

/// One JSON document printed by the bridge program.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DeviceReading {
    #[serde(default)]
    pub process: ProcessData,
    #[serde(default)]
    pub system: SystemData,
    /// Set by the bridge when it could not talk to the inverter
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProcessData {
    #[serde(default)]
    pub power: f64,
    #[serde(default)]
    pub energy: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SystemData {
    #[serde(default = "fallback_temperature")]
    pub temperature: f64,
    #[serde(default = "fallback_status")]
    pub status: String,
}

fn fallback_temperature() -> f64 {
    FALLBACK_TEMPERATURE_C
}

fn fallback_status() -> String {
    "off".to_owned()
}

impl Default for SystemData {
    fn default() -> Self {
        Self {
            temperature: fallback_temperature(),
            status: fallback_status(),
        }
    }
}

impl DeviceReading {
    pub fn parse(json: &str) -> Result<Self> {
        let reading: Self =
            serde_json::from_str(json.trim()).context("Failed to parse device reading")?;
        if let Some(error) = &reading.error {
            bail!("device bridge reported an error: {error}");
        }
        Ok(reading)
    }

    pub fn is_producing(&self) -> bool {
        self.system.status == "running"
    }

    pub fn to_sample(&self, timestamp: DateTime<Utc>) -> Sample {
        Sample::new(timestamp, self.process.power, self.is_producing())
            .with_energy(self.process.energy)
            .with_temperature(self.system.temperature)
    }
}

#[async_trait]
pub trait ReadingSource: Send + Sync {
    async fn fetch(&self) -> Result<DeviceReading>;
}

/// Runs an external command and parses its stdout as a [`DeviceReading`].
#[derive(Debug, Clone)]
pub struct CommandSource {
    command: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandSource {
    pub fn new(settings: &DeviceSettings) -> Self {
        Self {
            command: settings.command.clone(),
            args: settings.args.clone(),
            timeout: settings.timeout(),
        }
    }
}

#[async_trait]
impl ReadingSource for CommandSource {
    async fn fetch(&self) -> Result<DeviceReading> {
        let output = tokio::time::timeout(
            self.timeout,
            Command::new(&self.command)
                .args(&self.args)
                .kill_on_drop(true)
                .output(),
        )
        .await
        .with_context(|| {
            format!(
                "Device command '{}' timed out after {}s",
                self.command,
                self.timeout.as_secs()
            )
        })?
        .with_context(|| format!("Failed to run device command '{}'", self.command))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "Device command '{}' exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            );
        }

        let stdout = String::from_utf8(output.stdout).context("Device output is not UTF-8")?;
        DeviceReading::parse(&stdout)
    }
}

/// Fetch one reading and offer it to the recorder.
pub async fn collect_once<R, S, C>(
    source: &R,
    recorder: &mut SampleRecorder<'_, S, C>,
) -> Result<RecordOutcome>
where
    R: ReadingSource + ?Sized,
    S: SampleStore + ?Sized,
    C: Clock,
{
    let reading = source.fetch().await?;
    let sample = reading.to_sample(recorder.now());
    debug!(
        power_w = sample.power_w,
        temperature_c = sample.temperature_c,
        producing = sample.producing,
        "Device reading"
    );
    Ok(recorder.record(sample)?)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchStats {
    pub stored: u32,
    pub throttled: u32,
    pub failed: u32,
    /// Days whose summary was written during the run
    pub summarized: u32,
}

fn close_day<S, Y>(
    engine: &AggregationEngine<'_, S, Y>,
    date: NaiveDate,
    stats: &mut WatchStats,
) where
    S: SampleStore + ?Sized,
    Y: SummaryStore + ?Sized,
{
    match engine.summarize_day(date) {
        Ok(_) => stats.summarized += 1,
        Err(e) => warn!(%date, error = %format!("{e:#}"), "Failed to summarize day"),
    }
}

/// Collect every `interval` until `shutdown` resolves.
///
/// A failed attempt is logged and the loop carries on with the next tick.
/// When stored samples move on to a new calendar day the previous day is
/// summarized, and the last collected day is summarized on shutdown.
pub async fn watch<R, S, C, ES, EY, F>(
    source: &R,
    recorder: &mut SampleRecorder<'_, S, C>,
    engine: &AggregationEngine<'_, ES, EY>,
    interval: Duration,
    shutdown: F,
) -> WatchStats
where
    R: ReadingSource + ?Sized,
    S: SampleStore + ?Sized,
    C: Clock,
    ES: SampleStore + ?Sized,
    EY: SummaryStore + ?Sized,
    F: Future<Output = ()>,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    let mut stats = WatchStats::default();
    let mut current_day: Option<NaiveDate> = None;
    info!(interval_secs = interval.as_secs(), "Collecting until interrupted");

    loop {
        tokio::select! {
            () = &mut shutdown => break,
            _ = ticker.tick() => {
                match collect_once(source, recorder).await {
                    Ok(RecordOutcome::Stored { date }) => {
                        stats.stored += 1;
                        info!(%date, "Sample stored");
                        if let Some(previous) = current_day.filter(|d| *d != date) {
                            info!(%previous, %date, "Day rolled over");
                            close_day(engine, previous, &mut stats);
                        }
                        current_day = Some(date);
                    }
                    Ok(RecordOutcome::Throttled { retry_in }) => {
                        stats.throttled += 1;
                        debug!(retry_in_secs = retry_in.num_seconds(), "Sample dropped by rate limiter");
                    }
                    Err(e) => {
                        stats.failed += 1;
                        warn!(error = %format!("{e:#}"), "Collection attempt failed");
                    }
                }
            }
        }
    }

    if let Some(date) = current_day {
        close_day(engine, date, &mut stats);
    }

    info!(
        stored = stats.stored,
        throttled = stats.throttled,
        failed = stats.failed,
        summarized = stats.summarized,
        "Collection stopped"
    );
    stats
}
