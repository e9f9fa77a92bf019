//! Validate and resolve a batch without printing the graph.
//!
//! Exits non-zero on a missing required field, an unreadable batch or a cycle.
//! Useful as a pre-commit or CI step.
//!
//! ```bash
//! virtgraph check batch.json
//! ✓ 4 resources resolved, 2 need variables
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use tracing::info;

use super::common::InputArgs;
use crate::config::Config;
use crate::resolver::ResolvedGraph;

/// Command to check that a batch resolves.
#[derive(Args, Debug)]
pub struct CheckCommand {
    #[command(flatten)]
    input: InputArgs,
}

impl CheckCommand {
    pub async fn execute(self, config: &Config) -> Result<()> {
        let graph = self.input.resolve(config).await?;
        info!("{} resolved without errors", self.input.source_name());

        println!("{} {}", "✓".green(), summary(&graph));
        Ok(())
    }
}

fn summary(graph: &ResolvedGraph) -> String {
    format!(
        "{} resources resolved, {} need variables",
        graph.len(),
        graph.variables().count()
    )
}
