//! Summary command implementation.
//!
//! Per-asset daily and annualized return, volatility and Sharpe ratio.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use vantage_portfolio::{compute_summaries, try_compute_summaries, RiskReturnSummary};

use super::Context;
use crate::cli::OutputFormat;
use crate::output::{
    format_daily, format_percent, format_ratio, print_header, print_output, print_warning,
};

/// Arguments for the summary command.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Price file (CSV: date column followed by one column per asset)
    pub prices: PathBuf,

    /// Report assets that fail (e.g. constant prices) instead of aborting
    #[arg(long)]
    pub isolate: bool,
}

#[derive(Tabled, Serialize)]
struct SummaryRow {
    #[tabled(rename = "Asset")]
    asset: String,
    #[tabled(rename = "Obs")]
    observations: usize,
    #[tabled(rename = "Mean (daily)")]
    mean_daily: String,
    #[tabled(rename = "Median (daily)")]
    median_daily: String,
    #[tabled(rename = "Vol (daily)")]
    vol_daily: String,
    #[tabled(rename = "Return (ann.)")]
    annual_return: String,
    #[tabled(rename = "Vol (ann.)")]
    annual_vol: String,
    #[tabled(rename = "Sharpe")]
    sharpe: String,
}

impl From<&RiskReturnSummary> for SummaryRow {
    fn from(s: &RiskReturnSummary) -> Self {
        Self {
            asset: s.asset.to_string(),
            observations: s.observations,
            mean_daily: format_daily(s.mean_daily),
            median_daily: format_daily(s.median_daily),
            vol_daily: format_daily(s.vol_daily),
            annual_return: format_percent(s.annual_return),
            annual_vol: format_percent(s.annual_vol),
            sharpe: format_ratio(s.sharpe),
        }
    }
}

/// Execute the summary command.
pub fn execute(args: SummaryArgs, ctx: &Context) -> Result<()> {
    let (_, returns) = ctx.load_returns(&args.prices)?;

    let summaries = if args.isolate {
        let mut ok = Vec::new();
        for (asset, result) in try_compute_summaries(&returns, &ctx.config) {
            match result {
                Ok(summary) => ok.push(summary),
                Err(e) => {
                    tracing::warn!(%asset, error = %e, "summary failed");
                    if !ctx.quiet {
                        print_warning(&format!("{}: {}", asset, e));
                    }
                }
            }
        }
        ok
    } else {
        compute_summaries(&returns, &ctx.config)?
    };

    print_summaries(&summaries, ctx)
}

pub(crate) fn print_summaries(summaries: &[RiskReturnSummary], ctx: &Context) -> Result<()> {
    let rows: Vec<SummaryRow> = summaries.iter().map(SummaryRow::from).collect();

    match ctx.format {
        OutputFormat::Table => {
            print_header(&format!(
                "Risk/Return Summary (rf {}, {} days/yr)",
                format_percent(ctx.config.risk_free_rate),
                ctx.config.trading_days_per_year
            ));
            print_output(&rows, ctx.format)?;
        }
        OutputFormat::Json => crate::output::print_json_value(&summaries)?,
        OutputFormat::Csv => print_output(&rows, ctx.format)?,
        OutputFormat::Minimal => {
            for s in summaries {
                println!("{} {:.6}", s.asset, s.sharpe);
            }
        }
    }

    Ok(())
}
