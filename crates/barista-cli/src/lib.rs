//! # barista-cli
//!
//! Command-line interface for the Barista service: runs the API server and
//! inspects the environment configuration.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use barista_config::EnvironmentLoader;

#[derive(Parser)]
#[command(
    name = "barista",
    version,
    about = "Coffee-shop drinks API with Auth0-backed role permissions"
)]
pub struct Cli {
    /// Path to barista.toml (default: ~/.barista/barista.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Environment profile, e.g. "production" — selects
    /// barista.<profile>.toml next to the base config file
    #[arg(short, long, global = true, env = "BARISTA_PROFILE")]
    pub profile: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Emit JSON-formatted logs
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the API server
    Serve {
        /// SQLite database path for the menu (default: ~/.barista/menu.db)
        #[arg(long, env = "BARISTA_DB")]
        db: Option<PathBuf>,
    },
    /// Inspect the environment configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the loaded environment as TOML
    Show,
    /// Validate the environment and report warnings
    Validate,
}

impl Cli {
    pub async fn run(self) -> barista_core::Result<()> {
        // Initialize tracing with the requested format
        if self.json_logs {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&self.log_level)),
                )
                .json()
                .with_target(true)
                .init();
        } else {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&self.log_level)),
                )
                .with_target(false)
                .init();
        }

        let environment =
            EnvironmentLoader::load(self.config.as_deref(), self.profile.as_deref())?;

        match self.command {
            Commands::Serve { db } => commands::cmd_serve(environment, db).await,
            Commands::Config { command } => match command {
                ConfigCommands::Show => commands::cmd_config_show(&environment),
                ConfigCommands::Validate => commands::cmd_config_validate(&environment),
            },
        }
    }
}
