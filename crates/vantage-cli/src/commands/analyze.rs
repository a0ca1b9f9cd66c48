//! Analyze command implementation.
//!
//! Runs the whole pipeline on one price file: summaries, correlation,
//! rolling volatility, equal-weight performance and the optimized portfolio.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use vantage_portfolio::{AnalysisReport, PortfolioAnalyzer};

use super::{correlation, optimize, summary, volatility, Context};
use crate::cli::OutputFormat;
use crate::output::{
    format_percent, format_ratio, print_header, print_json_value, print_output, KeyValue,
};

/// Arguments for the analyze command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Price file (CSV: date column followed by one column per asset)
    pub prices: PathBuf,
}

/// Execute the analyze command.
pub fn execute(args: AnalyzeArgs, ctx: &Context) -> Result<()> {
    let table = ctx.load_table(&args.prices)?;
    let analyzer = PortfolioAnalyzer::new(ctx.config.clone())?;
    let report = analyzer.analyze(&table)?;

    match ctx.format {
        OutputFormat::Table => print_report(&report, ctx)?,
        OutputFormat::Json => print_json_value(&report)?,
        OutputFormat::Csv => print_output(&headline(&report), ctx.format)?,
        OutputFormat::Minimal => {
            for kv in headline(&report) {
                println!("{}={}", kv.key, kv.value);
            }
        }
    }

    Ok(())
}

fn print_report(report: &AnalysisReport, ctx: &Context) -> Result<()> {
    print_header("Analysis");
    let overview = vec![
        KeyValue::new("Assets", report.assets.len().to_string()),
        KeyValue::new("Period", format!("{} to {}", report.start_date, report.end_date)),
        KeyValue::new("Daily Returns", report.observations.to_string()),
        KeyValue::new("Return Type", report.return_type.name()),
        KeyValue::from_percent("Risk-Free Rate", report.risk_free_rate),
        KeyValue::new("Trading Days/Year", report.trading_days_per_year.to_string()),
    ];
    print_output(&overview, ctx.format)?;

    summary::print_summaries(&report.summaries, ctx)?;
    correlation::print_matrix(&report.correlation, ctx.format)?;

    if !report.rolling_volatility.is_empty() {
        print_header(&format!(
            "Latest Rolling Volatility ({}-day window)",
            ctx.config.rolling_window
        ));
        let rows = volatility::rows(
            &report.rolling_volatility,
            report.trading_days_per_year,
            false,
        );
        print_output(&rows, ctx.format)?;
    }

    print_header("Equal-Weight Portfolio");
    let equal = &report.equal_weight;
    print_output(
        &[
            KeyValue::from_percent("Return (ann.)", equal.summary.annual_return),
            KeyValue::from_percent("Volatility (ann.)", equal.summary.annual_vol),
            KeyValue::from_ratio("Sharpe Ratio", equal.summary.sharpe),
            KeyValue::from_percent("Cumulative Return", equal.cumulative_return),
        ],
        ctx.format,
    )?;

    print_header("Optimal Portfolio (max Sharpe)");
    let weights: Vec<KeyValue> = report
        .optimized
        .weights
        .iter()
        .map(|(asset, w)| KeyValue::from_percent(asset.as_str(), w))
        .collect();
    print_output(&weights, ctx.format)?;
    print_output(
        &optimize::stats(&report.optimized, Some(equal.summary.sharpe)),
        ctx.format,
    )?;

    Ok(())
}

/// Key figures for the flat output formats.
fn headline(report: &AnalysisReport) -> Vec<KeyValue> {
    let mut results = vec![
        KeyValue::new("start_date", report.start_date.to_string()),
        KeyValue::new("end_date", report.end_date.to_string()),
        KeyValue::new("observations", report.observations.to_string()),
    ];
    for s in &report.summaries {
        results.push(KeyValue::new(format!("sharpe.{}", s.asset), format_ratio(s.sharpe)));
    }
    results.push(KeyValue::new(
        "equal_weight.sharpe",
        format_ratio(report.equal_weight.summary.sharpe),
    ));
    for (asset, w) in report.optimized.weights.iter() {
        results.push(KeyValue::new(format!("optimal.{}", asset), format_percent(w)));
    }
    results.push(KeyValue::new(
        "optimal.sharpe",
        format_ratio(report.optimized.sharpe),
    ));
    results
}
