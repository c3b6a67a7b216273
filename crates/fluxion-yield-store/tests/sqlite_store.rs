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

use chrono::{DateTime, Days, NaiveDate, TimeDelta, TimeZone, Utc};

use fluxion_yield_core::{
    AggregationEngine, ComparisonWindows, SampleStore, SummaryStatus, SummaryStore,
    build_summary,
};
use fluxion_yield_store::SqliteStore;
use fluxion_yield_types::{DailySummary, Sample};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, d).unwrap()
}

fn at(date: NaiveDate, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(hour, minute, 0).unwrap())
}

/// Bell-shaped production on a five minute grid between 05:00 and 21:00.
fn record_day(store: &SqliteStore, date: NaiveDate, peak_w: f64) {
    let mut ts = at(date, 5, 0);
    let end = at(date, 21, 0);
    let noon = at(date, 13, 0);
    while ts <= end {
        let offset_h = (ts - noon).num_minutes().abs() as f64 / 60.0;
        let power = (peak_w * (1.0 - offset_h / 7.0)).max(0.0);
        let sample = Sample::new(ts, power, power > 50.0).with_temperature(18.0 + power / 200.0);
        store.append(date, &sample).unwrap();
        ts += TimeDelta::minutes(5);
    }
}

#[test]
fn test_samples_round_trip_exactly_and_in_order() {
    let store = SqliteStore::open_in_memory().unwrap();
    let date = day(1);
    let precise = at(date, 12, 0) + TimeDelta::nanoseconds(123_456_789);
    let late = Sample::new(at(date, 14, 0), 1234.567_891_234, true)
        .with_temperature(37.25)
        .with_energy(4.2);
    let early = Sample::new(precise, 0.1 + 0.2, false);

    store.append(date, &late).unwrap();
    store.append(date, &early).unwrap();

    assert_eq!(store.read_all(date).unwrap(), vec![early, late]);
    assert!(store.read_all(day(2)).unwrap().is_empty());
}

#[test]
fn test_summary_upsert_replaces_previous_row() {
    let store = SqliteStore::open_in_memory().unwrap();
    let date = day(3);
    let samples = [
        Sample::new(at(date, 10, 0), 1000.0, true),
        Sample::new(at(date, 11, 0), 3000.0, true),
        Sample::new(at(date, 12, 0), 0.0, false),
    ];

    let first = build_summary(date, &samples[..2]);
    store.upsert(&first).unwrap();
    let second = build_summary(date, &samples);
    store.upsert(&second).unwrap();

    let loaded = store.get(date).unwrap().unwrap();
    assert_eq!(loaded, second);
    assert_eq!(loaded.status, SummaryStatus::Success);
    assert_eq!(loaded.production_end, Some(at(date, 12, 0)));
    assert!(store.get(day(4)).unwrap().is_none());
}

#[test]
fn test_range_query_is_inclusive() {
    let store = SqliteStore::open_in_memory().unwrap();
    for d in 1..=10 {
        let summary = DailySummary {
            total_energy_kwh: f64::from(d),
            sample_count: 1,
            status: SummaryStatus::Success,
            ..DailySummary::no_data(day(d))
        };
        store.upsert(&summary).unwrap();
    }

    let range = store.get_range(day(3), day(6)).unwrap();
    let dates: Vec<_> = range.iter().map(|s| s.date).collect();
    assert_eq!(dates, vec![day(3), day(4), day(5), day(6)]);
    assert!(store.get_range(day(6), day(3)).unwrap().is_empty());
}

#[test]
fn test_engine_over_sqlite_end_to_end() {
    let store = SqliteStore::open_in_memory().unwrap();
    let engine = AggregationEngine::new(&store, &store, ComparisonWindows::default()).unwrap();

    let target = day(31);
    for back in 1..=8 {
        let date = target - Days::new(back);
        record_day(&store, date, 2000.0);
        engine.summarize_day(date).unwrap();
    }
    record_day(&store, target, 4000.0);

    let report = engine.daily_report(target).unwrap();
    assert_eq!(report.status, SummaryStatus::Success);
    assert_eq!(report.data_points, 193);
    assert!(report.max_power_watts > 3900.0);

    let comparisons = report.comparisons.unwrap();
    let yesterday = comparisons.previous_day.energy().unwrap();
    // Twice the peak on the same profile yields twice the energy
    assert!((report.total_energy_kwh - 2.0 * yesterday).abs() < 0.01);
    assert!(comparisons.previous_week.available);
    assert!(!comparisons.previous_month.available);
    assert_eq!(comparisons.week_average.days_count, 6);
    assert_eq!(comparisons.month_average.days_count, 8);

    // The target day is now persisted and recomputation is stable
    let stored = store.get(target).unwrap().unwrap();
    assert_eq!(engine.summarize_day(target).unwrap(), stored);
}

#[test]
fn test_file_database_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("yield.db");
    let date = day(15);

    {
        let store = SqliteStore::open(&path).unwrap();
        record_day(&store, date, 1500.0);
        let engine =
            AggregationEngine::new(&store, &store, ComparisonWindows::default()).unwrap();
        engine.summarize_day(date).unwrap();
    }

    let reopened = SqliteStore::open(&path).unwrap();
    assert_eq!(reopened.read_all(date).unwrap().len(), 193);
    let summary = reopened.get(date).unwrap().unwrap();
    assert_eq!(summary, build_summary(date, &reopened.read_all(date).unwrap()));
}

#[test]
fn test_no_data_day_is_not_written() {
    let store = SqliteStore::open_in_memory().unwrap();
    let engine = AggregationEngine::new(&store, &store, ComparisonWindows::default()).unwrap();

    let summary = engine.summarize_day(day(20)).unwrap();
    assert_eq!(summary.status, SummaryStatus::NoData);
    assert!(store.get(day(20)).unwrap().is_none());
}
