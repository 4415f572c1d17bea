//! Configuration management CLI commands.

use crate::cli::common::{load_config, CliError, CliResult};
use crate::config::Config;
use crate::constants::APP_NAME;
use crate::models::GroupBy;
use clap::{Args, Subcommand};
use serde::Serialize;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
    /// Print the configuration file path
    Path,
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Seed of the synthetic dataset
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Number of synthetic records
    #[arg(long, value_name = "N")]
    records: Option<usize>,

    /// Season applied when no time filter is selected
    #[arg(long, value_name = "YEAR", conflicts_with = "no_fallback")]
    fallback_year: Option<i32>,

    /// Remove the fallback season (no temporal restriction)
    #[arg(long)]
    no_fallback: bool,

    /// Default grouping for top performers
    #[arg(long, value_name = "GROUP")]
    group_by: Option<GroupBy>,

    /// Number of top performer rows
    #[arg(long, value_name = "N")]
    top: Option<usize>,

    /// Fixed seed for insight generation
    #[arg(long, value_name = "SEED")]
    insight_seed: Option<u64>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput<'a> {
    path: Option<String>,
    #[serde(flatten)]
    config: &'a Config,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
            ConfigCommand::Path => {
                let path = Config::config_file_path()
                    .map_err(|e| CliError::io(format!("Failed to resolve config path: {e}")))?;
                println!("{}", path.display());
                Ok(())
            }
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;

        if self.json {
            output_json(&config)?;
        } else {
            output_human_readable(&config);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    const fn is_empty(&self) -> bool {
        self.seed.is_none()
            && self.records.is_none()
            && self.fallback_year.is_none()
            && !self.no_fallback
            && self.group_by.is_none()
            && self.top.is_none()
            && self.insight_seed.is_none()
    }

    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.is_empty() {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --seed, --records, --fallback-year, --no-fallback, --group-by, --top, or --insight-seed",
            ));
        }

        let mut config = load_config()?;

        if let Some(seed) = self.seed {
            config.dataset.seed = seed;
        }
        if let Some(records) = self.records {
            config.dataset.record_count = records;
        }
        if self.no_fallback {
            config.filters.temporal_fallback_year = None;
        } else if let Some(year) = self.fallback_year {
            config.filters.temporal_fallback_year = Some(year);
        }
        if let Some(group_by) = self.group_by {
            config.filters.default_group_by = group_by;
        }
        if let Some(top) = self.top {
            config.filters.top_performers = top;
        }
        if let Some(seed) = self.insight_seed {
            config.insights.seed = Some(seed);
        }

        config
            .validate()
            .map_err(|e| CliError::validation(format!("Invalid configuration: {e}")))?;
        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

/// Output configuration in JSON format
fn output_json(config: &Config) -> CliResult<()> {
    let output = ConfigOutput {
        path: Config::config_file_path()
            .ok()
            .map(|p| p.to_string_lossy().to_string()),
        config,
    };

    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| CliError::io(format!("Failed to serialize configuration to JSON: {e}")))?;

    println!("{json}");
    Ok(())
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    let title = format!("{APP_NAME} Configuration");
    println!("{title}");
    println!("{}", "=".repeat(title.len()));
    println!();
    println!("Dataset:");
    println!("  Seed:           {}", config.dataset.seed);
    println!("  Records:        {}", config.dataset.record_count);
    println!(
        "  Seasons:        {}-{}",
        config.dataset.first_year, config.dataset.last_year
    );
    println!();
    println!("Filters:");
    match config.filters.temporal_fallback_year {
        Some(year) => println!("  Fallback year:  {year}"),
        None => println!("  Fallback year:  (none)"),
    }
    println!("  Group by:       {:?}", config.filters.default_group_by);
    println!("  Top performers: {}", config.filters.top_performers);
    println!();
    println!("Insights:");
    match config.insights.seed {
        Some(seed) => println!("  Seed:           {seed}"),
        None => println!("  Seed:           (random)"),
    }

    if let Ok(path) = Config::config_file_path() {
        println!();
        println!("File: {}", path.display());
    }
}
