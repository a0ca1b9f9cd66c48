//! Effective analytics configuration: defaults, then a TOML file, then flags.

use std::path::{Path, PathBuf};

use vantage_portfolio::{AnalyticsConfig, WeightBounds};

use crate::cli::SettingsArgs;
use crate::error::{CliError, CliResult};

/// The user configuration file, `<config dir>/vantage/config.toml`.
pub fn config_path() -> CliResult<PathBuf> {
    let base = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| CliError::Config("Could not determine config directory".to_string()))?;
    Ok(base.join("vantage").join("config.toml"))
}

/// Reads an `AnalyticsConfig` from a TOML file. Missing keys take their defaults.
pub fn load_file(path: &Path) -> CliResult<AnalyticsConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))?;
    toml::from_str(&content).map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))
}

/// The file named by `--config`, else the user file when it exists.
pub fn source_file(args: &SettingsArgs) -> Option<PathBuf> {
    if let Some(path) = &args.config {
        return Some(path.clone());
    }
    config_path().ok().filter(|path| path.exists())
}

/// Builds and validates the configuration for this invocation.
pub fn resolve(args: &SettingsArgs) -> CliResult<AnalyticsConfig> {
    let base = match source_file(args) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading configuration file");
            load_file(&path)?
        }
        None => AnalyticsConfig::default(),
    };

    let config = apply_overrides(base, args);
    config.validate()?;
    Ok(config)
}

/// Applies command-line flags on top of `config`.
pub fn apply_overrides(mut config: AnalyticsConfig, args: &SettingsArgs) -> AnalyticsConfig {
    if let Some(rate) = args.risk_free_rate {
        config.risk_free_rate = rate;
    }
    if let Some(days) = args.trading_days {
        config.trading_days_per_year = days;
    }
    if let Some(return_type) = args.return_type {
        config.return_type = return_type.into();
    }
    if args.min_weight.is_some() || args.max_weight.is_some() {
        // Uniform flags replace the uniform bounds; per-asset overrides from the file survive
        let current = &config.weight_bounds;
        let mut bounds = WeightBounds::uniform(
            args.min_weight.unwrap_or(current.min),
            args.max_weight.unwrap_or(current.max),
        );
        bounds.overrides = current.overrides.clone();
        config.weight_bounds = bounds;
    }
    config
}
