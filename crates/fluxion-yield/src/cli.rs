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

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_PATH;

/// FluxION Yield - daily PV production tracking
#[derive(Debug, Parser)]
#[command(name = "fluxion-yield", version)]
#[command(
    long_about = "Collects inverter readings, aggregates them into daily yield summaries\n\
    and compares each day with the previous day, week and month.\n\
    \nExamples:\n  \
    fluxion-yield collect                    # One reading, then today's report\n  \
    fluxion-yield watch --interval-secs 60   # Collect until Ctrl-C\n  \
    fluxion-yield report --date 2025-06-10 --json"
)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch a single reading, store it and print today's report
    Collect,

    /// Collect readings continuously until interrupted
    Watch(WatchArgs),

    /// Summarize a day and print its report with comparisons
    Report(ReportArgs),

    /// Show raw sample statistics for a day
    Inspect(InspectArgs),
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Seconds between collection attempts (overrides sampling.collect_interval_secs)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_secs: Option<u64>,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Day to report (YYYY-MM-DD), defaults to today in the configured timezone
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Print the report as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Day to inspect (YYYY-MM-DD), defaults to today in the configured timezone
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_report_args() {
        let cli = Cli::parse_from([
            "fluxion-yield",
            "--config",
            "/etc/fluxion/yield.toml",
            "report",
            "--date",
            "2025-06-10",
            "--json",
        ]);
        assert_eq!(cli.config, PathBuf::from("/etc/fluxion/yield.toml"));
        let Commands::Report(args) = cli.command else {
            panic!("expected report command");
        };
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2025, 6, 10));
        assert!(args.json);
    }

    #[test]
    fn test_defaults_and_usage_errors() {
        let cli = Cli::parse_from(["fluxion-yield", "watch"]);
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert!(matches!(
            cli.command,
            Commands::Watch(WatchArgs { interval_secs: None })
        ));

        assert!(Cli::try_parse_from(["fluxion-yield", "report", "--date", "2025-13-40"]).is_err());
        assert!(Cli::try_parse_from(["fluxion-yield", "watch", "--interval-secs", "0"]).is_err());
    }
}
