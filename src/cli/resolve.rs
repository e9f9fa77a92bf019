//! Resolve a batch and print the dependency-annotated graph.
//!
//! # Examples
//!
//! ```bash
//! virtgraph resolve batch.json
//! virtgraph resolve batch.json --format json > graph.json
//! ```
//!
//! # Output Format
//!
//! ## Text (Default)
//! ```text
//! pool      p1 (var)
//! volume    v1 (var)
//!   └── p1
//! domain    vm1
//!   └── v1
//!
//! 3 resources, 2 need variables
//! ```
//!
//! ## JSON
//! ```json
//! {
//!   "resources": [
//!     {"kind": "libvirt_pool", "name": "p1", "depends_on": [], "create_variable": true, "raw": {...}}
//!   ],
//!   "creation_order": ["p1"]
//! }
//! ```

use anyhow::{Result, anyhow};
use clap::Args;
use colored::Colorize;
use serde_json::json;

use super::common::InputArgs;
use crate::config::Config;
use crate::resolver::{ResolvedGraph, ResourceConfig};

/// Command to resolve a batch and print the result.
#[derive(Args, Debug)]
pub struct ResolveCommand {
    #[command(flatten)]
    input: InputArgs,

    /// Output format (text, json)
    ///
    /// - `text`: one line per resource with its references underneath
    /// - `json`: the full graph, including each raw declaration, plus the creation
    ///   order
    #[arg(long, default_value = "text")]
    format: String,
}

impl ResolveCommand {
    pub async fn execute(self, config: &Config) -> Result<()> {
        self.validate_arguments()?;

        let graph = self.input.resolve(config).await?;

        let output = match self.format.as_str() {
            "json" => render_json(&graph)?,
            _ => render_text(&graph),
        };
        println!("{output}");

        Ok(())
    }

    fn validate_arguments(&self) -> Result<()> {
        match self.format.as_str() {
            "text" | "json" => Ok(()),
            _ => Err(anyhow!("Invalid format '{}'. Valid formats are: text, json", self.format)),
        }
    }
}

/// The graph as pretty-printed JSON.
pub(crate) fn render_json(graph: &ResolvedGraph) -> Result<String> {
    let order: Vec<&str> =
        graph.creation_order()?.into_iter().map(|resource| resource.name.as_str()).collect();

    let value = json!({
        "resources": graph.resources(),
        "creation_order": order,
    });

    Ok(serde_json::to_string_pretty(&value)?)
}

fn render_text(graph: &ResolvedGraph) -> String {
    if graph.is_empty() {
        return "No resources found.".to_string();
    }

    let mut lines = Vec::with_capacity(graph.len() * 2 + 2);
    for resource in graph.resources() {
        lines.push(resource_line(resource));

        let count = resource.depends_on.len();
        for (i, dep) in resource.depends_on.iter().enumerate() {
            let branch = if i + 1 == count {
                "└──"
            } else {
                "├──"
            };
            lines.push(format!("  {branch} {dep}"));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "{} resources, {} need variables",
        graph.len(),
        graph.variables().count()
    ));

    lines.join("\n")
}

fn resource_line(resource: &ResourceConfig) -> String {
    let name = if resource.name.is_empty() {
        "<unnamed>".bright_black().to_string()
    } else {
        resource.name.bold().to_string()
    };
    let marker = if resource.create_variable {
        format!(" {}", "(var)".cyan())
    } else {
        String::new()
    };

    format!("{} {name}{marker}", format!("{:<9}", resource.kind.to_string()).bright_black())
}
