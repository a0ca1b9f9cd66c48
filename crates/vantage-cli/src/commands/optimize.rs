//! Optimize command implementation.
//!
//! Finds the long-only weights with the highest Sharpe ratio.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use vantage_portfolio::{
    optimize_with_config, portfolio_sharpe, OptimizedPortfolio, PortfolioWeights,
};

use super::Context;
use crate::cli::OutputFormat;
use crate::output::{
    format_percent, format_ratio, print_header, print_json_value, print_output, print_warning,
    KeyValue,
};

/// Arguments for the optimize command.
#[derive(Args, Debug)]
pub struct OptimizeArgs {
    /// Price file (CSV: date column followed by one column per asset)
    pub prices: PathBuf,

    /// Maximum optimizer iterations per start
    #[arg(long)]
    pub max_iterations: Option<u32>,
}

#[derive(Tabled, Serialize)]
struct WeightRow {
    #[tabled(rename = "Asset")]
    asset: String,
    #[tabled(rename = "Weight")]
    weight: String,
}

#[derive(Serialize)]
struct OptimizeOutput<'a> {
    #[serde(flatten)]
    optimized: &'a OptimizedPortfolio,
    equal_weight_sharpe: Option<f64>,
}

/// Execute the optimize command.
pub fn execute(args: OptimizeArgs, ctx: &Context) -> Result<()> {
    let mut config = ctx.config.clone();
    if let Some(max_iterations) = args.max_iterations {
        config.optimizer = config.optimizer.with_max_iterations(max_iterations);
    }

    let (table, returns) = ctx.load_returns(&args.prices)?;
    let optimized = optimize_with_config(&returns, &config)?;

    // Equal weighting may be degenerate even when the optimum is not
    let equal = PortfolioWeights::equal(table.assets())?;
    let equal_weight_sharpe = portfolio_sharpe(&returns, &equal, &config).ok();

    if !optimized.converged && !ctx.quiet {
        print_warning(&format!(
            "optimizer stopped after {} iterations without converging",
            optimized.iterations
        ));
    }

    match ctx.format {
        OutputFormat::Table => {
            print_header("Optimal Weights (max Sharpe)");
            print_output(&weight_rows(&optimized.weights), ctx.format)?;

            print_header("Portfolio");
            print_output(&stats(&optimized, equal_weight_sharpe), ctx.format)?;
        }
        OutputFormat::Json => print_json_value(&OptimizeOutput {
            optimized: &optimized,
            equal_weight_sharpe,
        })?,
        OutputFormat::Csv => print_output(&weight_rows(&optimized.weights), ctx.format)?,
        OutputFormat::Minimal => {
            for (asset, weight) in optimized.weights.iter() {
                println!("{} {:.6}", asset, weight);
            }
        }
    }

    Ok(())
}

fn weight_rows(weights: &PortfolioWeights) -> Vec<WeightRow> {
    weights
        .iter()
        .map(|(asset, weight)| WeightRow {
            asset: asset.to_string(),
            weight: format_percent(weight),
        })
        .collect()
}

pub(crate) fn stats(optimized: &OptimizedPortfolio, equal_weight_sharpe: Option<f64>) -> Vec<KeyValue> {
    let mut results = vec![
        KeyValue::from_percent("Expected Return (ann.)", optimized.expected_return),
        KeyValue::from_percent("Volatility (ann.)", optimized.volatility),
        KeyValue::from_ratio("Sharpe Ratio", optimized.sharpe),
    ];
    if let Some(sharpe) = equal_weight_sharpe {
        results.push(KeyValue::new("Equal-Weight Sharpe", format_ratio(sharpe)));
    }
    results.push(KeyValue::new("Iterations", optimized.iterations.to_string()));
    results.push(KeyValue::new(
        "Converged",
        if optimized.converged { "yes" } else { "no" },
    ));
    results
}
