//! Input handling shared by all commands.

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tracing::{debug, warn};

use crate::config::Config;
use crate::core::VirtgraphError;
use crate::models::Element;
use crate::resolver::{ResolvedGraph, Resolver};
use crate::schema::validate_required_fields;

/// Arguments naming the batch to resolve.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// JSON file holding the resource batch, or `-` for stdin
    pub input: PathBuf,

    /// Skip the required-field check against the provider schema
    #[arg(long)]
    pub skip_validation: bool,
}

impl InputArgs {
    /// Human-readable name of the input for messages.
    pub fn source_name(&self) -> String {
        if is_stdin(&self.input) {
            "<stdin>".to_string()
        } else {
            self.input.display().to_string()
        }
    }

    /// Read, decode, validate and resolve the batch.
    pub async fn resolve(&self, config: &Config) -> Result<ResolvedGraph> {
        let content = read_input(&self.input).await?;
        let elements = parse_batch(&content, &self.source_name())?;
        debug!("Read {} elements from {}", elements.len(), self.source_name());

        if self.skip_validation {
            warn!("Skipping required-field validation");
        } else {
            validate_required_fields(&elements, &config.schema())?;
        }

        Ok(Resolver::from_config(config).resolve(&elements)?)
    }
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Read the whole input, from stdin when `path` is `-`.
pub async fn read_input(path: &Path) -> Result<String> {
    if is_stdin(path) {
        let mut content = String::new();
        tokio::io::stdin()
            .read_to_string(&mut content)
            .await
            .context("Failed to read batch from stdin")?;
        return Ok(content);
    }

    tokio::fs::read_to_string(path).await.map_err(|e| {
        anyhow::Error::new(e).context(VirtgraphError::FileSystemError {
            operation: "read".to_string(),
            path: path.display().to_string(),
        })
    })
}

/// Decode a JSON array of elements.
pub fn parse_batch(content: &str, source_name: &str) -> Result<Vec<Element>, VirtgraphError> {
    serde_json::from_str(content).map_err(|e| VirtgraphError::InvalidBatch {
        source_name: source_name.to_string(),
        reason: e.to_string(),
    })
}
