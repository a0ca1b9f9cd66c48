//! Config command implementation.
//!
//! Shows the effective analytics configuration and where it comes from.

use anyhow::Result;
use clap::{Args, Subcommand};

use vantage_portfolio::AnalyticsConfig;

use super::Context;
use crate::cli::{OutputFormat, SettingsArgs};
use crate::output::{
    format_percent, print_header, print_info, print_json_value, print_output, print_success,
    print_warning, KeyValue,
};
use crate::settings;

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration (file and flag overrides applied)
    Show(ShowArgs),

    /// Write the effective configuration to the user config file
    Init(InitArgs),

    /// Show configuration file location
    Path,
}

/// Arguments for show subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Print as TOML, ready to be saved as a config file
    #[arg(long)]
    pub toml: bool,
}

/// Arguments for init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &Context, settings_args: &SettingsArgs) -> Result<()> {
    match args.command {
        ConfigCommand::Show(show_args) => execute_show(&show_args, ctx, settings_args),
        ConfigCommand::Init(init_args) => execute_init(&init_args, ctx),
        ConfigCommand::Path => execute_path(),
    }
}

fn execute_show(args: &ShowArgs, ctx: &Context, settings_args: &SettingsArgs) -> Result<()> {
    let config = &ctx.config;

    if args.toml {
        print!("{}", toml::to_string_pretty(config)?);
        return Ok(());
    }

    match ctx.format {
        OutputFormat::Table => {
            print_header("Effective Configuration");
            match settings::source_file(settings_args) {
                Some(path) => println!("Source: {}", path.display()),
                None => println!("Source: built-in defaults"),
            }
            print_output(&entries(config), ctx.format)?;
        }
        OutputFormat::Json => print_json_value(config)?,
        OutputFormat::Csv => print_output(&entries(config), ctx.format)?,
        OutputFormat::Minimal => {
            for kv in entries(config) {
                println!("{}={}", kv.key, kv.value);
            }
        }
    }

    Ok(())
}

fn execute_init(args: &InitArgs, ctx: &Context) -> Result<()> {
    let path = settings::config_path()?;
    if path.exists() && !args.force {
        print_warning(&format!(
            "{} already exists; use --force to overwrite",
            path.display()
        ));
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, toml::to_string_pretty(&ctx.config)?)?;
    print_success(&format!("Configuration written to {}", path.display()));
    Ok(())
}

fn execute_path() -> Result<()> {
    let path = settings::config_path()?;
    println!("{}", path.display());

    if !path.exists() {
        print_info("File does not exist yet (using defaults)");
    }

    Ok(())
}

fn entries(config: &AnalyticsConfig) -> Vec<KeyValue> {
    let bounds = &config.weight_bounds;
    let mut results = vec![
        KeyValue::new("risk_free_rate", format_percent(config.risk_free_rate)),
        KeyValue::new("trading_days_per_year", config.trading_days_per_year.to_string()),
        KeyValue::new("return_type", config.return_type.name()),
        KeyValue::new(
            "weight_bounds",
            format!("{} to {}", format_percent(bounds.min), format_percent(bounds.max)),
        ),
    ];
    for (asset, b) in &bounds.overrides {
        results.push(KeyValue::new(
            format!("weight_bounds.{}", asset),
            format!("{} to {}", format_percent(b.min), format_percent(b.max)),
        ));
    }
    results.extend([
        KeyValue::new("rolling_window", config.rolling_window.to_string()),
        KeyValue::new("optimizer.max_iterations", config.optimizer.max_iterations.to_string()),
        KeyValue::new("optimizer.tolerance", format!("{:e}", config.optimizer.tolerance)),
        KeyValue::new("optimizer.tie_tolerance", format!("{:e}", config.optimizer.tie_tolerance)),
        KeyValue::new("parallel", config.parallel.to_string()),
        KeyValue::new("parallel_threshold", config.parallel_threshold.to_string()),
    ]);
    results
}
