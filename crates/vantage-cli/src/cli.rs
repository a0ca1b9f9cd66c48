//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use vantage_portfolio::ReturnType;

use crate::commands::{
    AnalyzeArgs, ConfigArgs, CorrelationArgs, OptimizeArgs, SummaryArgs, VolatilityArgs,
};

/// Vantage - Equity portfolio return, risk and Sharpe ratio analytics
#[derive(Parser)]
#[command(name = "vantage")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(flatten)]
    pub settings: SettingsArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Analytics settings that override the configuration file.
#[derive(Args, Debug, Default, Clone)]
pub struct SettingsArgs {
    /// Configuration file (TOML). Defaults to the user config file if present.
    #[arg(long, global = true, env = "VANTAGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Annualized risk-free rate as a decimal (e.g. 0.02 for 2%)
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub risk_free_rate: Option<f64>,

    /// Trading days per year used to annualize
    #[arg(long, global = true)]
    pub trading_days: Option<u32>,

    /// Daily return definition
    #[arg(long, value_enum, global = true)]
    pub return_type: Option<ReturnTypeArg>,

    /// Minimum weight per asset
    #[arg(long, global = true)]
    pub min_weight: Option<f64>,

    /// Maximum weight per asset
    #[arg(long, global = true)]
    pub max_weight: Option<f64>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Per-asset return, volatility and Sharpe ratio summary
    Summary(SummaryArgs),

    /// Sharpe-maximizing long-only portfolio weights
    Optimize(OptimizeArgs),

    /// Rolling volatility
    Volatility(VolatilityArgs),

    /// Correlation matrix of daily returns
    Correlation(CorrelationArgs),

    /// Full analysis report
    Analyze(AnalyzeArgs),

    /// Show the effective configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the values)
    Minimal,
}

/// Return definition options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReturnTypeArg {
    /// p_t / p_{t-1} - 1
    Simple,
    /// ln(p_t / p_{t-1})
    Log,
}

impl From<ReturnTypeArg> for ReturnType {
    fn from(arg: ReturnTypeArg) -> Self {
        match arg {
            ReturnTypeArg::Simple => ReturnType::Simple,
            ReturnTypeArg::Log => ReturnType::Log,
        }
    }
}
