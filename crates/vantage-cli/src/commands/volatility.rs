//! Volatility command implementation.
//!
//! Rolling standard deviation of daily returns.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use vantage_portfolio::{rolling_volatility, RollingVolatility};

use super::Context;
use crate::cli::OutputFormat;
use crate::output::{format_daily, format_percent, print_header, print_json_value, print_output};

/// Arguments for the volatility command.
#[derive(Args, Debug)]
pub struct VolatilityArgs {
    /// Price file (CSV: date column followed by one column per asset)
    pub prices: PathBuf,

    /// Window length in trading days. Defaults to the configured window.
    #[arg(short, long)]
    pub window: Option<usize>,

    /// Print every window instead of the latest one
    #[arg(long)]
    pub full: bool,
}

#[derive(Tabled, Serialize)]
pub(crate) struct VolatilityRow {
    #[tabled(rename = "Asset")]
    asset: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Vol (daily)")]
    daily: String,
    #[tabled(rename = "Vol (ann.)")]
    annualized: String,
}

/// Execute the volatility command.
pub fn execute(args: VolatilityArgs, ctx: &Context) -> Result<()> {
    let window = args.window.unwrap_or(ctx.config.rolling_window);
    let (_, returns) = ctx.load_returns(&args.prices)?;

    let rolling = returns
        .iter()
        .map(|series| rolling_volatility(series, window))
        .collect::<Result<Vec<_>, _>>()?;

    let rows = rows(&rolling, ctx.config.trading_days_per_year, args.full);

    match ctx.format {
        OutputFormat::Table => {
            let title = if args.full {
                format!("Rolling Volatility ({}-day window)", window)
            } else {
                format!("Latest Rolling Volatility ({}-day window)", window)
            };
            print_header(&title);
            print_output(&rows, ctx.format)?;
        }
        OutputFormat::Json => {
            if args.full {
                print_json_value(&rolling)?;
            } else {
                print_json_value(&rows)?;
            }
        }
        OutputFormat::Csv => print_output(&rows, ctx.format)?,
        OutputFormat::Minimal => {
            for row in &rows {
                println!("{} {} {}", row.asset, row.date, row.daily);
            }
        }
    }

    Ok(())
}

pub(crate) fn rows(rolling: &[RollingVolatility], trading_days: u32, full: bool) -> Vec<VolatilityRow> {
    let mut rows = Vec::new();
    for series in rolling {
        let annualized = series.annualized(trading_days);
        let points: Vec<_> = if full {
            series
                .dates
                .iter()
                .zip(&series.values)
                .zip(&annualized)
                .map(|((date, vol), annual)| (*date, *vol, *annual))
                .collect()
        } else {
            series
                .latest()
                .zip(annualized.last())
                .map(|((date, vol), annual)| (date, vol, *annual))
                .into_iter()
                .collect()
        };
        rows.extend(points.into_iter().map(|(date, vol, annual)| VolatilityRow {
            asset: series.asset.to_string(),
            date: date.to_string(),
            daily: format_daily(vol),
            annualized: format_percent(annual),
        }));
    }
    rows
}
