//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;
use vantage_core::CoreError;
use vantage_portfolio::PortfolioError;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The price file has no usable header.
    #[error("Invalid header in {path}: {reason}")]
    InvalidHeader {
        /// File being read.
        path: PathBuf,
        /// What is wrong with the header.
        reason: String,
    },

    /// A price cell is empty.
    #[error("Missing price for {asset} on line {line}")]
    MissingValue {
        /// 1-based line number in the file.
        line: usize,
        /// Column asset.
        asset: String,
    },

    /// A cell could not be parsed.
    #[error("Invalid value '{value}' for {column} on line {line}")]
    InvalidValue {
        /// 1-based line number in the file.
        line: usize,
        /// Column name.
        column: String,
        /// Raw cell text.
        value: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Price data failed validation.
    #[error(transparent)]
    Data(#[from] CoreError),

    /// Analytics failed.
    #[error(transparent)]
    Analytics(#[from] PortfolioError),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
