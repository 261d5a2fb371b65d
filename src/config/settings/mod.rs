#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

use crate::embeddings::chunking::ChunkingConfig;
use crate::embeddings::gemini::DEFAULT_EMBEDDING_DIMENSION;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(skip)]
    pub base_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeminiConfig {
    /// API credential, handed in by the process entry point; never persisted
    #[serde(skip)]
    pub api_key: Option<String>,
    pub api_base: String,
    pub embedding_model: String,
    pub generation_model: String,
    pub embedding_dimension: u32,
    pub batch_size: u32,
    pub temperature: f32,
}

impl Default for GeminiConfig {
    #[inline]
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            embedding_model: "models/embedding-001".to_string(),
            generation_model: "models/gemini-pro".to_string(),
            embedding_dimension: DEFAULT_EMBEDDING_DIMENSION,
            batch_size: 16,
            temperature: 0.3,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found or could not be created")]
    DirectoryError,
    #[error("Invalid URL format: {0}")]
    InvalidUrl(String),
    #[error("Invalid model name: {0} (cannot be empty)")]
    InvalidModel(String),
    #[error("Invalid batch size: {0} (must be between 1 and 100)")]
    InvalidBatchSize(u32),
    #[error("Invalid embedding dimension: {0} (must be between 64 and 4096)")]
    InvalidEmbeddingDimension(u32),
    #[error("Invalid temperature: {0} (must be between 0.0 and 2.0)")]
    InvalidTemperature(f32),
    #[error("Invalid max chunk size: {0} (cannot be zero)")]
    InvalidMaxChunkSize(usize),
    #[error("Overlap size ({0}) must be smaller than max chunk size ({1})")]
    OverlapTooLarge(usize, usize),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Config {
    #[inline]
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join("config.toml");

        if !config_path.exists() {
            return Ok(Self {
                gemini: GeminiConfig::default(),
                chunking: ChunkingConfig::default(),
                base_dir: config_dir.as_ref().to_path_buf(),
            });
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;
        config.base_dir = config_dir.as_ref().to_path_buf();

        config
            .validate()
            .with_context(|| "Configuration validation failed")?;

        Ok(config)
    }

    /// Attach the API credential read at the process entry point
    #[inline]
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.gemini.api_key = api_key;
        self
    }

    #[inline]
    pub fn save(&self) -> Result<()> {
        self.validate()
            .context("Configuration validation failed before saving")?;

        fs::create_dir_all(&self.base_dir).with_context(|| {
            format!(
                "Failed to create config directory: {}",
                self.base_dir.display()
            )
        })?;

        let config_path = self.config_file_path();
        let content = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(())
    }

    #[inline]
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gemini.validate()?;
        self.validate_chunking_config()?;
        Ok(())
    }

    fn validate_chunking_config(&self) -> Result<(), ConfigError> {
        let config = &self.chunking;

        if config.max_chunk_size == 0 {
            return Err(ConfigError::InvalidMaxChunkSize(config.max_chunk_size));
        }

        if config.overlap_size >= config.max_chunk_size {
            return Err(ConfigError::OverlapTooLarge(
                config.overlap_size,
                config.max_chunk_size,
            ));
        }

        Ok(())
    }

    #[inline]
    pub fn config_file_path(&self) -> PathBuf {
        self.base_dir.join("config.toml")
    }

    /// Directory holding the persisted vector index
    #[inline]
    pub fn index_path(&self) -> PathBuf {
        self.base_dir.join("vectors")
    }
}

impl GeminiConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api_base_url()?;

        if self.embedding_model.trim().is_empty() {
            return Err(ConfigError::InvalidModel(self.embedding_model.clone()));
        }

        if self.generation_model.trim().is_empty() {
            return Err(ConfigError::InvalidModel(self.generation_model.clone()));
        }

        if self.batch_size == 0 || self.batch_size > 100 {
            return Err(ConfigError::InvalidBatchSize(self.batch_size));
        }

        if !(64..=4096).contains(&self.embedding_dimension) {
            return Err(ConfigError::InvalidEmbeddingDimension(
                self.embedding_dimension,
            ));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::InvalidTemperature(self.temperature));
        }

        Ok(())
    }

    pub fn api_base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.api_base).map_err(|_| ConfigError::InvalidUrl(self.api_base.clone()))
    }
}
