// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! globcopy configuration.
//!
//! Configuration is loaded from `globcopy.toml` in the working directory,
//! or from the path given with `--config`. Every key is optional.
//!
//! # Example Configuration
//!
//! ```toml
//! [watch]
//! debounce_ms = 100
//!
//! [walk]
//! max_depth = 256
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure loaded from `globcopy.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Watch mode settings.
    #[serde(default)]
    pub watch: WatchConfig,
    /// Directory walk settings.
    #[serde(default)]
    pub walk: WalkConfig,
}

/// Watch mode configuration.
#[derive(Debug, Deserialize)]
pub struct WatchConfig {
    /// Quiet period before a burst of changes triggers a pass (default: 100).
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

/// Directory walk configuration.
#[derive(Debug, Deserialize)]
pub struct WalkConfig {
    /// Maximum directory levels searched below a base directory (default: 256).
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_debounce_ms() -> u64 {
    100
}

fn default_max_depth() -> usize {
    globcopy::DEFAULT_MAX_DEPTH
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

impl Config {
    /// Loads configuration from `path`.
    ///
    /// If the file does not exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Debounce period for watch mode.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.watch.debounce_ms)
    }
}
