//! CLI command implementations.

pub mod analyze;
pub mod config;
pub mod correlation;
pub mod optimize;
pub mod summary;
pub mod volatility;

// Re-export submodules for convenience
pub use analyze::AnalyzeArgs;
pub use config::ConfigArgs;
pub use correlation::CorrelationArgs;
pub use optimize::OptimizeArgs;
pub use summary::SummaryArgs;
pub use volatility::VolatilityArgs;

use std::path::Path;

use vantage_core::PriceTable;
use vantage_portfolio::{compute_all_returns, AnalyticsConfig, ReturnSeries};

use crate::cli::OutputFormat;
use crate::error::CliResult;
use crate::output::print_info;

/// State shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    /// Effective analytics configuration.
    pub config: AnalyticsConfig,
    /// Requested output format.
    pub format: OutputFormat,
    /// Suppress informational messages.
    pub quiet: bool,
}

impl Context {
    /// Loads the price file, announcing what was read unless quiet.
    pub fn load_table(&self, path: &Path) -> CliResult<PriceTable> {
        let table = crate::input::load_prices(path)?;
        if !self.quiet && self.format == OutputFormat::Table {
            if let Some((start, end)) = table.date_range() {
                print_info(&format!(
                    "{} assets, {} prices from {} to {}",
                    table.num_assets(),
                    table.num_observations(),
                    start,
                    end
                ));
            }
        }
        Ok(table)
    }

    /// Loads the price file and computes daily returns for every asset.
    pub fn load_returns(&self, path: &Path) -> CliResult<(PriceTable, Vec<ReturnSeries>)> {
        let table = self.load_table(path)?;
        let returns = compute_all_returns(&table, &self.config)?;
        Ok((table, returns))
    }
}
