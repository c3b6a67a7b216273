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

use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use comfy_table::{Attribute, Cell, Color, Table, presets::UTF8_FULL};

use fluxion_yield_core::SampleStats;
use fluxion_yield_types::{DailyReport, SummaryStatus, Trend};

const NO_DATA: &str = "no data available";

/// Formatter for the human-readable terminal output
#[derive(Debug, Clone, Copy)]
pub struct TextFormatter {
    timezone: Tz,
}

fn trend_marker(trend: Trend) -> &'static str {
    match trend {
        Trend::Up => "▲",
        Trend::Down => "▼",
        Trend::Flat => "=",
    }
}

fn delta_cell(delta: Option<f64>) -> Cell {
    match delta {
        None => Cell::new("-"),
        Some(delta) => {
            let trend = Trend::of_delta(delta);
            let cell = Cell::new(format!("{} {delta:+.3} kWh", trend_marker(trend)));
            match trend {
                Trend::Up => cell.fg(Color::Green),
                Trend::Down => cell.fg(Color::Red),
                Trend::Flat => cell,
            }
        }
    }
}

fn bold(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

impl TextFormatter {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    fn local_time(&self, ts: Option<DateTime<Utc>>) -> String {
        ts.map_or_else(
            || "--:--".to_owned(),
            |ts| ts.with_timezone(&self.timezone).format("%H:%M").to_string(),
        )
    }

    pub fn format_report(&self, report: &DailyReport) -> String {
        let mut output = format!(
            "Daily yield report for {} ({})\n",
            report.date, self.timezone
        );

        match report.status {
            SummaryStatus::NoData => {
                output.push_str("No samples were recorded for this day.\n");
                return output;
            }
            SummaryStatus::NoProduction => {
                let _ = writeln!(
                    output,
                    "No energy produced ({} data points recorded).",
                    report.data_points
                );
                return output;
            }
            SummaryStatus::Success => {}
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec![bold("Metric"), bold("Value")]);
        table.add_row(vec![
            Cell::new("Energy"),
            Cell::new(format!("{:.3} kWh", report.total_energy_kwh)).add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new("Peak power"),
            Cell::new(format!("{:.1} W", report.max_power_watts)),
        ]);
        table.add_row(vec![
            Cell::new("Avg temperature"),
            Cell::new(format!("{:.1} °C", report.avg_temperature_celsius)),
        ]);
        table.add_row(vec![
            Cell::new("Production"),
            Cell::new(format!(
                "{:.2} h ({} - {})",
                report.production_hours,
                self.local_time(report.production_start),
                self.local_time(report.production_end)
            )),
        ]);
        table.add_row(vec![
            Cell::new("Data points"),
            Cell::new(report.data_points.to_string()),
        ]);
        output.push_str(&table.to_string());
        output.push('\n');

        if let Some(comparisons) = &report.comparisons {
            let today = report.total_energy_kwh;
            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec![
                bold("Compared with"),
                bold("Days"),
                bold("Energy"),
                bold("Today vs"),
            ]);

            let points = [
                ("Previous day", &comparisons.previous_day),
                ("Same day last week", &comparisons.previous_week),
                ("Same day last month", &comparisons.previous_month),
            ];
            for (label, point) in points {
                let energy = point
                    .energy()
                    .map_or_else(|| NO_DATA.to_owned(), |e| format!("{e:.3} kWh"));
                table.add_row(vec![
                    Cell::new(label),
                    Cell::new(point.date.to_string()),
                    Cell::new(energy),
                    delta_cell(point.delta_from(today)),
                ]);
            }

            let windows = [
                ("Weekly average", &comparisons.week_average),
                ("Monthly average", &comparisons.month_average),
            ];
            for (label, window) in windows {
                let energy = window.average().map_or_else(
                    || NO_DATA.to_owned(),
                    |e| format!("{e:.3} kWh ({} days)", window.days_count),
                );
                table.add_row(vec![
                    Cell::new(label),
                    Cell::new(format!("{} .. {}", window.from, window.to)),
                    Cell::new(energy),
                    delta_cell(window.delta_from(today)),
                ]);
            }

            output.push_str(&table.to_string());
            output.push('\n');
        }

        output
    }

    pub fn format_stats(&self, date: NaiveDate, stats: Option<&SampleStats>) -> String {
        let mut output = format!("Samples for {date} ({})\n", self.timezone);
        let Some(stats) = stats else {
            output.push_str("No samples stored.\n");
            return output;
        };

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec![bold(""), bold("Min"), bold("Max"), bold("Mean")]);
        table.add_row(vec![
            Cell::new("Power (W)"),
            Cell::new(format!("{:.1}", stats.power_w.min)),
            Cell::new(format!("{:.1}", stats.power_w.max)),
            Cell::new(format!("{:.1}", stats.power_w.mean)),
        ]);
        table.add_row(vec![
            Cell::new("Temperature (°C)"),
            Cell::new(format!("{:.1}", stats.temperature_c.min)),
            Cell::new(format!("{:.1}", stats.temperature_c.max)),
            Cell::new(format!("{:.1}", stats.temperature_c.mean)),
        ]);
        output.push_str(&table.to_string());
        output.push('\n');

        let _ = writeln!(
            output,
            "{} samples: {} real, {} fallback, {} producing",
            stats.count,
            stats.real_count(),
            stats.fallback_count,
            stats.producing_count
        );
        if stats.all_fallback() {
            output.push_str("Warning: no real readings, only device fallback values.\n");
        }
        output
    }
}
