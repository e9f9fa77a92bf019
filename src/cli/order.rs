//! Print resources in creation order.
//!
//! Every resource is listed after all resources it references, which is the order
//! generated code has to declare them in.
//!
//! ```bash
//! virtgraph order batch.json
//! 1. pool/p1
//! 2. volume/v1
//! 3. domain/vm1
//!
//! virtgraph order batch.json --format json
//! [{"kind": "libvirt_pool", "name": "p1"}, ...]
//! ```

use anyhow::{Result, anyhow};
use clap::Args;
use serde::Serialize;

use super::common::InputArgs;
use crate::config::Config;
use crate::core::ResourceKind;
use crate::resolver::ResolvedGraph;

/// Command to print the creation order of a batch.
#[derive(Args, Debug)]
pub struct OrderCommand {
    #[command(flatten)]
    input: InputArgs,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    format: String,
}

#[derive(Debug, Serialize)]
struct OrderEntry<'a> {
    kind: ResourceKind,
    name: &'a str,
}

impl OrderCommand {
    pub async fn execute(self, config: &Config) -> Result<()> {
        match self.format.as_str() {
            "text" | "json" => {}
            _ => {
                return Err(anyhow!(
                    "Invalid format '{}'. Valid formats are: text, json",
                    self.format
                ));
            }
        }

        let graph = self.input.resolve(config).await?;
        let output = if self.format == "json" {
            render_json(&graph)?
        } else {
            render_text(&graph)?
        };
        println!("{output}");

        Ok(())
    }
}

fn entries(graph: &ResolvedGraph) -> Result<Vec<OrderEntry<'_>>> {
    Ok(graph
        .creation_order()?
        .into_iter()
        .map(|resource| OrderEntry {
            kind: resource.kind,
            name: &resource.name,
        })
        .collect())
}

fn render_json(graph: &ResolvedGraph) -> Result<String> {
    Ok(serde_json::to_string_pretty(&entries(graph)?)?)
}

fn render_text(graph: &ResolvedGraph) -> Result<String> {
    if graph.is_empty() {
        return Ok("No resources found.".to_string());
    }

    let lines: Vec<String> = entries(graph)?
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{}. {}/{}", i + 1, entry.kind, entry.name))
        .collect();

    Ok(lines.join("\n"))
}
