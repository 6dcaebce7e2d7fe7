// Command routing and dispatch

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use veraset_config::{AppConfig, ConfigManager, ConfigManagerTrait};

use crate::commands::*;
use crate::error::CliResult;

/// Veraset - statutory inheritance share calculator
#[derive(Parser, Debug)]
#[command(name = "veraset")]
#[command(bin_name = "veraset")]
#[command(about = "Statutory inheritance share calculator")]
#[command(
    long_about = "Veraset records the relatives of a deceased person, enforces which degrees may inherit, and asks the calculation service for each heir's share.\n\nFamily files are JSON documents replayed through the same rules as interactive entry."
)]
#[command(version)]
#[command(author = "Veraset Contributors")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (default: <config dir>/veraset/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimize output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show which relative categories may still be recorded
    Eligibility {
        /// Family file (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the canonical tree as sent to the calculation service
    Tree {
        /// Family file (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Estate value; prints the full request body when given
        #[arg(long, value_name = "N")]
        estate: Option<f64>,
    },

    /// Submit the family to the calculation service and print each share
    Calculate {
        /// Family file (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Estate value, overriding the one in the family file
        #[arg(long, value_name = "N")]
        estate: Option<f64>,

        /// Base URL of the calculation service, overriding service.base_url
        #[arg(long, value_name = "URL")]
        service_url: Option<String>,

        /// Print result rows as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Load and validate configuration from `path` or the default location
pub fn load_config(path: Option<&Path>) -> CliResult<AppConfig> {
    let mut manager = match path {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    };
    let config = manager.load_config()?;
    manager.validate_config(&config)?;
    Ok(config)
}

/// Command router
pub struct CommandRouter;

impl CommandRouter {
    /// Route and execute a command
    pub async fn execute(cli: &Cli, config: AppConfig) -> CliResult<()> {
        match &cli.command {
            Commands::Eligibility { file } => EligibilityCommand::new(file).execute().await,
            Commands::Tree { file, estate } => {
                TreeCommand::new(file, config.defaults.deceased_name.clone())
                    .with_estate(*estate)
                    .execute()
                    .await
            }
            Commands::Calculate {
                file,
                estate,
                service_url,
                json,
            } => {
                CalculateCommand::new(file, config)
                    .with_estate(*estate)
                    .with_service_url(service_url.clone())
                    .with_json(*json)
                    .execute()
                    .await
            }
        }
    }
}
