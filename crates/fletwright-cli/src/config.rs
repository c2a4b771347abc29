//! fletwright configuration file handling

use anyhow::{Context, Result};
use fletwright_codegen::GeneratorOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "fletwright.toml";

/// Top-level configuration (fletwright.toml)
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FletwrightConfig {
    #[serde(default)]
    pub generator: GeneratorOptions,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Where and how results are written
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Output file; stdout when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Print degradations to stderr
    #[serde(default)]
    pub report: bool,
}

impl FletwrightConfig {
    /// Load configuration from an explicit file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: FletwrightConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(config)
    }

    /// Load `fletwright.toml` from a directory if there is one.
    pub fn discover(dir: &Path) -> Result<Option<Self>> {
        let path = dir.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        tracing::debug!(path = %path.display(), "using config file");
        Self::load(&path).map(Some)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
