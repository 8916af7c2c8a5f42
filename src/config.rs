//! Configuration management for OutputDiff
//!
//! This module provides configuration structures and defaults for document
//! loading, report caching, output rendering and watch mode. Values come from
//! the defaults, an optional TOML file, and environment overrides, in that order.

use std::path::Path;
use std::time::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{CompareError, Result};

/// Global configuration for OutputDiff
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputDiffConfig {
    /// Report cache configuration
    pub cache: CacheConfig,
    /// Document loading configuration
    pub ingest: IngestConfig,
    /// Rendering configuration
    pub output: OutputConfig,
    /// Watch mode configuration
    pub watcher: WatcherConfig,
}

/// Configuration for the diff report cache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of (base, candidate) reports kept
    pub diff_cache_size: usize,
}

/// Configuration for reading documents from disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Files larger than this are skipped
    pub max_file_bytes: u64,
    /// Honor .gitignore and .ignore files when walking directories
    pub respect_gitignore: bool,
}

/// Configuration for rendered output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Emit ANSI colors in text output
    pub color: bool,
    /// Show word-level detail under modified lines
    pub word_diff: bool,
}

/// Configuration for watch mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherConfig {
    /// Events on the same path closer together than this are dropped
    pub debounce_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            diff_cache_size: 100,
        }
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 4 * 1024 * 1024, // 4 MiB
            respect_gitignore: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            word_diff: true,
        }
    }
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self { debounce_ms: 100 }
    }
}

impl WatcherConfig {
    /// Get debounce duration
    pub fn debounce_duration(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Configuration loading and management
impl OutputDiffConfig {
    /// Load configuration from a TOML file, then apply environment overrides.
    /// Without a path only the defaults and the environment are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| CompareError::io(path, e))?;
                Self::from_toml(&text)?
            }
            None => Self::default(),
        };

        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text; missing keys keep their defaults
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Override fields with environment variables if present
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| std::env::var(key).ok());
    }

    /// Override fields from `OUTPUTDIFF_*` variables supplied by `lookup`
    pub fn apply_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("OUTPUTDIFF_DIFF_CACHE_SIZE") {
            if let Ok(size) = val.parse::<usize>() {
                self.cache.diff_cache_size = size;
            }
        }

        if let Some(val) = lookup("OUTPUTDIFF_MAX_FILE_BYTES") {
            if let Ok(bytes) = val.parse::<u64>() {
                self.ingest.max_file_bytes = bytes;
            }
        }

        if let Some(val) = lookup("OUTPUTDIFF_DEBOUNCE_MS") {
            if let Ok(ms) = val.parse::<u64>() {
                self.watcher.debounce_ms = ms;
            }
        }

        if lookup("OUTPUTDIFF_NO_COLOR").is_some() {
            self.output.color = false;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.cache.diff_cache_size == 0 {
            return Err(CompareError::Config(
                "diff_cache_size must be greater than 0".to_string(),
            ));
        }

        if self.ingest.max_file_bytes == 0 {
            return Err(CompareError::Config(
                "max_file_bytes must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
