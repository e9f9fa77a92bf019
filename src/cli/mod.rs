//! Command-line interface for virtgraph.
//!
//! # Available Commands
//!
//! - `resolve` - Resolve a batch and print the annotated graph
//! - `check` - Validate and resolve a batch, reporting only success or failure
//! - `order` - Print resources in dependency-respecting creation order
//!
//! Every command reads a JSON array of resource declarations from a file, or from
//! stdin when the input is `-`.
//!
//! # Global Options
//!
//! - `--verbose` - Debug logging on stderr
//! - `--quiet` - Errors only
//! - `--config` - Path to a configuration file (also `VIRTGRAPH_CONFIG`)
//!
//! # Example
//!
//! ```bash
//! virtgraph resolve batch.json --format json
//! virtgraph --verbose check batch.json
//! cat batch.json | virtgraph order -
//! ```

mod check;
pub mod common;
mod order;
mod resolve;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Runtime configuration derived from the global flags.
///
/// Kept separate from [`Cli`] so tests and embedding code can choose a log level
/// and config path without parsing arguments.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter used when `RUST_LOG` is not set.
    pub log_level: Option<String>,

    /// Explicit configuration file, if any.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber.
    ///
    /// `RUST_LOG` takes precedence over `log_level`. Output goes to stderr so that
    /// stdout stays machine-readable. Calling this twice is harmless.
    pub fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(self.log_level.as_deref().unwrap_or("warn"))
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Main CLI structure.
#[derive(Parser)]
#[command(
    name = "virtgraph",
    about = "Resolve dependencies between libvirt resource declarations",
    version,
    long_about = "virtgraph infers references between libvirt resource declarations by name, \
                  rejects cycles, and marks the resources generated code must bind to variables."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output on stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to a configuration file
    ///
    /// Defaults to ~/.virtgraph/config.toml when that file exists.
    #[arg(short, long, global = true, env = "VIRTGRAPH_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a batch and print the dependency-annotated graph.
    ///
    /// See [`resolve::ResolveCommand`].
    Resolve(resolve::ResolveCommand),

    /// Validate and resolve a batch without printing the graph.
    ///
    /// See [`check::CheckCommand`].
    Check(check::CheckCommand),

    /// Print resources in creation order, dependencies first.
    ///
    /// See [`order::OrderCommand`].
    Order(order::OrderCommand),
}

impl Cli {
    /// Execute the parsed command with configuration built from the global flags.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate the global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Execute with an explicit configuration.
    pub async fn execute_with_config(self, cli_config: CliConfig) -> Result<()> {
        cli_config.init_logging();

        let config = Config::load_with_optional(cli_config.config_path.clone()).await?;

        match self.command {
            Commands::Resolve(cmd) => cmd.execute(&config).await,
            Commands::Check(cmd) => cmd.execute(&config).await,
            Commands::Order(cmd) => cmd.execute(&config).await,
        }
    }
}
