// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Gate configuration
//!
//! Loaded from TOML; every field is optional.
//!
//! ```toml
//! name = "uniter"
//! drain_warning = "45s"
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const DEFAULT_NAME: &str = "fortress";
const DEFAULT_DRAIN_WARNING: Duration = Duration::from_secs(30);

/// Configuration for a single gate
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateConfig {
    /// Name identifying this gate in logs and status snapshots
    pub name: String,
    /// How long a lockdown may wait for visits to drain before warning
    #[serde(with = "humantime_serde")]
    pub drain_warning: Duration,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            drain_warning: DEFAULT_DRAIN_WARNING,
        }
    }
}

impl GateConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_drain_warning(mut self, threshold: Duration) -> Self {
        self.drain_warning = threshold;
        self
    }

    /// Parse a configuration from TOML content
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: GateConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "name",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
