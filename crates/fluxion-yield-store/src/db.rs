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

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::Mutex;
use rusqlite::types::Type;
use rusqlite::{OptionalExtension, Row, params};
use tracing::{debug, info};

use fluxion_yield_core::{SampleStore, SummaryStore};
use fluxion_yield_types::{DailySummary, Sample, SummaryStatus};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS samples (
        id             INTEGER PRIMARY KEY AUTOINCREMENT,
        day            TEXT NOT NULL,
        timestamp      TEXT NOT NULL,
        power_w        REAL NOT NULL,
        energy_kwh     REAL NOT NULL,
        temperature_c  REAL NOT NULL,
        producing      INTEGER NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_samples_day_time
        ON samples(day, timestamp);

    CREATE TABLE IF NOT EXISTS daily_summaries (
        date               TEXT PRIMARY KEY,
        total_energy_kwh   REAL NOT NULL,
        max_power_w        REAL NOT NULL,
        avg_temperature_c  REAL NOT NULL,
        production_hours   REAL NOT NULL,
        production_start   TEXT,
        production_end     TEXT,
        period_count       INTEGER NOT NULL,
        sample_count       INTEGER NOT NULL,
        status             TEXT NOT NULL,
        updated_at         TEXT NOT NULL
    );";

const SUMMARY_COLUMNS: &str = "date, total_energy_kwh, max_power_w, avg_temperature_c, production_hours,
    production_start, production_end, period_count, sample_count, status";

/// SQLite-backed sample and summary store.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<rusqlite::Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at `path`, creating parent directories.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }

        let conn = rusqlite::Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        info!(path = %path.display(), "Opened yield database");
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = rusqlite::Connection::open_in_memory()
            .context("Failed to open in-memory database")?;
        Self::init(conn)
    }

    fn init(conn: rusqlite::Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)
            .context("Failed to initialize database schema")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

fn summary_from_row(row: &Row<'_>) -> rusqlite::Result<DailySummary> {
    let status: String = row.get(9)?;
    let status = SummaryStatus::parse(&status).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            9,
            Type::Text,
            format!("unknown summary status: {status}").into(),
        )
    })?;

    Ok(DailySummary {
        date: row.get(0)?,
        total_energy_kwh: row.get(1)?,
        max_power_w: row.get(2)?,
        avg_temperature_c: row.get(3)?,
        production_hours: row.get(4)?,
        production_start: row.get(5)?,
        production_end: row.get(6)?,
        period_count: row.get(7)?,
        sample_count: row.get(8)?,
        status,
    })
}

impl SampleStore for SqliteStore {
    fn append(&self, date: NaiveDate, sample: &Sample) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO samples (day, timestamp, power_w, energy_kwh, temperature_c, producing)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                date,
                sample.timestamp,
                sample.power_w,
                sample.energy_kwh,
                sample.temperature_c,
                sample.producing,
            ],
        )
        .with_context(|| format!("Failed to append sample for {date}"))?;
        Ok(())
    }

    fn read_all(&self, date: NaiveDate) -> Result<Vec<Sample>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT timestamp, power_w, energy_kwh, temperature_c, producing
             FROM samples WHERE day = ?1 ORDER BY timestamp, id",
        )?;

        let mut samples = stmt
            .query_map(params![date], |row| {
                Ok(Sample {
                    timestamp: row.get::<_, DateTime<Utc>>(0)?,
                    power_w: row.get(1)?,
                    energy_kwh: row.get(2)?,
                    temperature_c: row.get(3)?,
                    producing: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Failed to read samples for {date}"))?;

        // Text ordering of timestamps is not guaranteed across fractional precisions
        samples.sort_by_key(|s| s.timestamp);
        debug!(%date, count = samples.len(), "Loaded samples");
        Ok(samples)
    }
}

impl SummaryStore for SqliteStore {
    fn upsert(&self, summary: &DailySummary) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO daily_summaries (date, total_energy_kwh, max_power_w, avg_temperature_c,
                production_hours, production_start, production_end, period_count, sample_count,
                status, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
             ON CONFLICT(date) DO UPDATE SET
                total_energy_kwh = ?2,
                max_power_w = ?3,
                avg_temperature_c = ?4,
                production_hours = ?5,
                production_start = ?6,
                production_end = ?7,
                period_count = ?8,
                sample_count = ?9,
                status = ?10,
                updated_at = ?11",
            params![
                summary.date,
                summary.total_energy_kwh,
                summary.max_power_w,
                summary.avg_temperature_c,
                summary.production_hours,
                summary.production_start,
                summary.production_end,
                summary.period_count,
                summary.sample_count,
                summary.status.as_str(),
                Utc::now().to_rfc3339(),
            ],
        )
        .with_context(|| format!("Failed to store summary for {}", summary.date))?;
        Ok(())
    }

    fn get(&self, date: NaiveDate) -> Result<Option<DailySummary>> {
        let conn = self.conn.lock();
        let summary = conn
            .query_row(
                &format!("SELECT {SUMMARY_COLUMNS} FROM daily_summaries WHERE date = ?1"),
                params![date],
                summary_from_row,
            )
            .optional()
            .with_context(|| format!("Failed to load summary for {date}"))?;
        Ok(summary)
    }

    fn get_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<DailySummary>> {
        if from > to {
            return Ok(Vec::new());
        }
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&format!(
            "SELECT {SUMMARY_COLUMNS} FROM daily_summaries
             WHERE date BETWEEN ?1 AND ?2 ORDER BY date"
        ))?;

        let rows = stmt
            .query_map(params![from, to], summary_from_row)?
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Failed to load summaries {from}..={to}"))?;
        Ok(rows)
    }
}
