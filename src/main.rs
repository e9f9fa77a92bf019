//! virtgraph CLI entry point
//!
//! Parses arguments, runs the selected command and turns failures into a
//! readable message with a suggestion before exiting with status 1.
//!
//! - `resolve` - Print the dependency-annotated graph of a batch
//! - `check` - Validate and resolve a batch
//! - `order` - Print a batch in creation order

use anyhow::Result;
use clap::Parser;
use virtgraph::cli;
use virtgraph::core::error::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
