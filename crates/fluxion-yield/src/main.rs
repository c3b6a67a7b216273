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

mod app;
mod cli;
mod collector;
mod config;
mod format;

use anyhow::Result;
use clap::Parser;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::cli::{Cli, Commands};
use crate::collector::{CommandSource, watch};
use crate::config::YieldConfig;

fn init_tracing() {
    // Logs go to stderr so that stdout stays clean for --json output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("fluxion_yield=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn wait_for_ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Unable to listen for Ctrl-C, collecting until killed");
        std::future::pending::<()>().await;
    }
    info!("Interrupted, writing final report");
}

async fn run(app: &App, command: Commands) -> Result<()> {
    match command {
        Commands::Collect => {
            let source = CommandSource::new(&app.config().device);
            print!("{}", app.collect(&source).await?);
        }
        Commands::Watch(args) => {
            let interval = args.interval_secs.map_or_else(
                || app.config().sampling.collect_interval(),
                Duration::from_secs,
            );
            let source = CommandSource::new(&app.config().device);
            let mut recorder = app.recorder()?;
            let engine = app.engine()?;
            watch(&source, &mut recorder, &engine, interval, wait_for_ctrl_c()).await;
            print!("{}", app.render_report(app.today(), false)?);
        }
        Commands::Report(args) => {
            let date = args.date.unwrap_or_else(|| app.today());
            let output = app.render_report(date, args.json)?;
            if args.json {
                println!("{output}");
            } else {
                print!("{output}");
            }
        }
        Commands::Inspect(args) => {
            let date = args.date.unwrap_or_else(|| app.today());
            let stats = app.stats(date)?;
            print!("{}", app.formatter().format_stats(date, stats.as_ref()));
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = YieldConfig::load(&cli.config)?;
    let app = App::open(config)?;

    run(&app, cli.command).await
}
