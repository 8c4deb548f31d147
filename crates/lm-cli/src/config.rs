use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use lm_diff::DiffConfig;

use crate::cli::Cli;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "linemerge.toml";

/// Settings read from `linemerge.toml`.
///
/// ```toml
/// color = false
///
/// [diff]
/// max_table_cells = 1000000
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub diff: DiffConfig,
    pub color: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            diff: DiffConfig::default(),
            color: true,
        }
    }
}

impl CliConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("invalid linemerge configuration")
    }

    /// Load the explicit file, or the default file if it exists, or defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path: PathBuf = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.is_file() {
                    return Ok(Self::default());
                }
                fallback
            }
        };
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Self::from_toml(&text)
    }

    /// Apply command-line overrides on top of file values.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if cli.no_color {
            self.color = false;
        }
        match cli.max_cells {
            Some(0) => self.diff = DiffConfig::unbounded(),
            Some(limit) => self.diff = DiffConfig::with_max_table_cells(limit),
            None => {}
        }
        self
    }
}
