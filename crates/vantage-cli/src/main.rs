//! Vantage CLI - Command-line interface for equity portfolio analytics.
//!
//! # Usage
//!
//! ```bash
//! # Per-asset return, volatility and Sharpe ratio
//! vantage summary prices.csv --risk-free-rate 0.02
//!
//! # Sharpe-maximizing weights, capped at 40% per asset
//! vantage optimize prices.csv --max-weight 0.4
//!
//! # Latest 60-day rolling volatility
//! vantage volatility prices.csv --window 60
//!
//! # Full report as JSON
//! vantage --format json analyze prices.csv
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod input;
mod output;
mod settings;

use cli::{Cli, Commands};
use commands::Context;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = settings::resolve(&cli.settings)?;
    tracing::debug!(?config, "effective configuration");

    let ctx = Context {
        config,
        format: cli.format,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Summary(args) => commands::summary::execute(args, &ctx)?,
        Commands::Optimize(args) => commands::optimize::execute(args, &ctx)?,
        Commands::Volatility(args) => commands::volatility::execute(args, &ctx)?,
        Commands::Correlation(args) => commands::correlation::execute(args, &ctx)?,
        Commands::Analyze(args) => commands::analyze::execute(args, &ctx)?,
        Commands::Config(args) => commands::config::execute(args, &ctx, &cli.settings)?,
    }

    Ok(())
}

/// Logs go to stderr so that stdout carries only results.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
