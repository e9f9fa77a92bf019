//! Configuration management for virtgraph
//!
//! Configuration is optional. Without a file, resolution runs with the built-in
//! libvirt schema and the default batch size limit.
//!
//! # Location
//!
//! In order of precedence:
//! 1. `--config <path>` on the command line (or the `VIRTGRAPH_CONFIG` environment
//!    variable, which clap maps onto the same option). The file must exist.
//! 2. The default path:
//!    - Unix/macOS: `~/.virtgraph/config.toml`
//!    - Windows: `%LOCALAPPDATA%\virtgraph\config.toml`
//!
//!    A missing default file means defaults.
//!
//! # Format
//!
//! ```toml
//! [limits]
//! # Largest batch accepted by the resolver; 0 disables the limit
//! max_batch_size = 1024
//!
//! [schema.required]
//! # Extra required fields, merged with the provider schema
//! libvirt_volume = ["pool"]
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::core::VirtgraphError;
use crate::schema::LibvirtSchema;

/// Default largest batch the resolver accepts.
///
/// Each extractor scans the whole batch, so resolution is quadratic in the batch
/// size.
const fn default_max_batch_size() -> usize {
    1024
}

/// Top-level configuration file contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Resource limits applied before resolution.
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Schema extensions for required-field validation.
    #[serde(default)]
    pub schema: SchemaConfig,
}

/// The `[limits]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsConfig {
    /// Largest accepted batch; 0 disables the limit.
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_batch_size: default_max_batch_size(),
        }
    }
}

/// The `[schema]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    /// Extra required fields per kind, keyed by provider tag or short kind name.
    #[serde(default)]
    pub required: BTreeMap<String, Vec<String>>,
}

impl Config {
    /// Load configuration from an explicit path, or from the default location.
    ///
    /// An explicit path that does not exist is an error; a missing default file
    /// yields [`Config::default`].
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(VirtgraphError::ConfigNotFound {
                        path: path.display().to_string(),
                    }
                    .into());
                }
                Self::load_from(&path).await
            }
            None => match Self::default_path() {
                Ok(path) if path.exists() => Self::load_from(&path).await,
                _ => Ok(Self::default()),
            },
        }
    }

    /// Load configuration from a specific file.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content, path)
    }

    /// Parse configuration text; `path` is only used in error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            VirtgraphError::ConfigParseError {
                file: path.display().to_string(),
                reason: e.message().to_string(),
            }
            .into()
        })
    }

    /// Platform-specific default configuration path.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("virtgraph")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".virtgraph")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// The validation schema this configuration describes.
    pub fn schema(&self) -> LibvirtSchema {
        LibvirtSchema::with_overrides(&self.schema.required)
    }
}
