//! Configuration for attribute interning and failure description.
//!
//! Configuration is read from TOML. A project file takes precedence over a
//! global one:
//!
//! ```toml
//! [attributes]
//! usage_compatibility = true
//!
//! [diagnostics]
//! max_candidates = 10
//! color = false
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Number of candidate variants listed in a diagnostic when not configured.
pub const DEFAULT_MAX_CANDIDATES: usize = 10;

/// Library configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Attribute interning settings
    pub attributes: AttributesConfig,

    /// Diagnostic rendering settings
    pub diagnostics: DiagnosticsConfig,
}

/// Attribute interning settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributesConfig {
    /// Rewrite deprecated usage values into usage + library elements
    pub usage_compatibility: Option<bool>,
}

impl AttributesConfig {
    pub fn usage_compatibility(&self) -> bool {
        self.usage_compatibility.unwrap_or(true)
    }
}

/// Diagnostic rendering settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Maximum number of candidates listed per failure
    pub max_candidates: Option<usize>,

    /// Emit ANSI colors
    pub color: bool,
}

impl DiagnosticsConfig {
    pub fn max_candidates(&self) -> usize {
        self.max_candidates.unwrap_or(DEFAULT_MAX_CANDIDATES)
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load configuration with fallback to defaults if the file doesn't exist
    /// or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.attributes.usage_compatibility.is_some() {
            self.attributes.usage_compatibility = other.attributes.usage_compatibility;
        }
        if other.diagnostics.max_candidates.is_some() {
            self.diagnostics.max_candidates = other.diagnostics.max_candidates;
        }
        if other.diagnostics.color {
            self.diagnostics.color = true;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Missing files are skipped; the project file wins over the global one.
pub fn load_config(global: &Path, project: &Path) -> Config {
    let mut config = Config::load_or_default(global);
    if project.exists() {
        tracing::debug!("Applying project config from {}", project.display());
        config.merge(Config::load_or_default(project));
    }
    config
}
