use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

use crate::script::ScriptProfile;

/// Application configuration module
/// This module handles the library configuration including loading,
/// validating and saving configuration settings.
/// Represents the library configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Target language script profile
    #[serde(default)]
    pub script: ScriptProfile,

    /// Token estimation config
    #[serde(default)]
    pub estimator: EstimatorConfig,

    /// Chunking config
    #[serde(default)]
    pub chunker: ChunkerConfig,

    /// Fallback cascade config
    #[serde(default)]
    pub fallback: FallbackConfig,
}

/// Token estimation ratios
///
/// Heuristic constants tied to a tokenizer family; different backends
/// tokenize differently, so they stay configurable.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EstimatorConfig {
    /// Characters per token for dense-script characters
    #[serde(default = "default_chars_per_token")]
    pub chars_per_token: f64,

    /// Tokens per word for everything else
    #[serde(default = "default_tokens_per_word")]
    pub tokens_per_word: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            chars_per_token: default_chars_per_token(),
            tokens_per_word: default_tokens_per_word(),
        }
    }
}

/// Chunking configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChunkerConfig {
    /// Maximum estimated tokens per chunk
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// Fraction of a chunk's trailing text copied into the next chunk as
    /// context
    #[serde(default = "default_overlap_fraction")]
    pub overlap_fraction: f64,

    /// Whether chunk boundaries respect sentence boundaries
    #[serde(default = "default_respect_sentences")]
    pub respect_sentences: bool,

    /// Informational lower bound on chunk size; not enforced
    #[serde(default = "default_min_tokens")]
    pub min_tokens: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            overlap_fraction: default_overlap_fraction(),
            respect_sentences: default_respect_sentences(),
            min_tokens: default_min_tokens(),
        }
    }
}

/// Fallback cascade configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FallbackConfig {
    /// Alternative provider identifiers, tried in order
    #[serde(default)]
    pub providers: Vec<String>,

    /// Maximum chunks translated concurrently by the pipeline
    #[serde(default = "default_max_concurrent_chunks")]
    pub max_concurrent_chunks: usize,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            providers: Vec::new(),
            max_concurrent_chunks: default_max_concurrent_chunks(),
        }
    }
}

fn default_chars_per_token() -> f64 {
    4.0
}

fn default_tokens_per_word() -> f64 {
    1.3
}

fn default_max_tokens() -> usize {
    3500
}

fn default_overlap_fraction() -> f64 {
    0.10
}

fn default_respect_sentences() -> bool {
    true
}

fn default_min_tokens() -> usize {
    100
}

fn default_max_concurrent_chunks() -> usize {
    4
}

impl Default for Config {
    fn default() -> Self {
        Self {
            script: ScriptProfile::default(),
            estimator: EstimatorConfig::default(),
            chunker: ChunkerConfig::default(),
            fallback: FallbackConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: Config =
            serde_json::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.chunker.max_tokens == 0 {
            return Err(anyhow!("chunker.max_tokens must be greater than zero"));
        }
        if !(0.0..1.0).contains(&self.chunker.overlap_fraction) {
            return Err(anyhow!(
                "chunker.overlap_fraction must be in [0.0, 1.0), got {}",
                self.chunker.overlap_fraction
            ));
        }
        if self.estimator.chars_per_token <= 0.0 {
            return Err(anyhow!("estimator.chars_per_token must be positive"));
        }
        if self.estimator.tokens_per_word <= 0.0 {
            return Err(anyhow!("estimator.tokens_per_word must be positive"));
        }
        if self.script.ranges.is_empty() {
            return Err(anyhow!("script profile must define at least one range"));
        }
        Ok(())
    }
}
