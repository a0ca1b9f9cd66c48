//! Correlation command implementation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use vantage_portfolio::{correlation_matrix, CorrelationMatrix};

use super::Context;
use crate::cli::OutputFormat;
use crate::output::{format_ratio, print_grid, print_header, print_json_value};

/// Arguments for the correlation command.
#[derive(Args, Debug)]
pub struct CorrelationArgs {
    /// Price file (CSV: date column followed by one column per asset)
    pub prices: PathBuf,
}

/// Execute the correlation command.
pub fn execute(args: CorrelationArgs, ctx: &Context) -> Result<()> {
    let (_, returns) = ctx.load_returns(&args.prices)?;
    let matrix = correlation_matrix(&returns)?;
    print_matrix(&matrix, ctx.format)
}

pub(crate) fn print_matrix(matrix: &CorrelationMatrix, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json_value(matrix);
    }
    if format == OutputFormat::Table {
        print_header("Correlation of Daily Returns");
    }

    let mut header = vec![String::new()];
    header.extend(matrix.assets.iter().map(ToString::to_string));

    let rows = matrix
        .assets
        .iter()
        .zip(&matrix.values)
        .map(|(asset, values)| {
            let mut row = vec![asset.to_string()];
            row.extend(values.iter().map(|v| format_ratio(*v)));
            row
        })
        .collect();

    print_grid(header, rows, format)
}
