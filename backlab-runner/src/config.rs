//! Serializable run configuration.

use crate::metrics::AnalyticsConfig;
use backlab_core::execution::ExecutionConfig;
use backlab_core::strategy::Strategy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything needed to reproduce a run: instrument label, strategy
/// parameters, broker settings, analyzer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub symbol: String,
    pub strategy: Strategy,
    #[serde(default)]
    pub execution: ExecutionConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

impl RunConfig {
    pub fn new(symbol: impl Into<String>, strategy: Strategy) -> Self {
        Self {
            symbol: symbol.into(),
            strategy,
            execution: ExecutionConfig::default(),
            analytics: AnalyticsConfig::default(),
        }
    }

    /// Content-addressed id: equal configurations hash to equal ids, so
    /// cached results and golden files can be keyed by it.
    pub fn run_id(&self) -> String {
        let json = serde_json::to_string(self).expect("RunConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }

    pub fn from_toml(input: &str) -> Result<Self, ConfigFileError> {
        Ok(toml::from_str(input)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigFileError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigFileError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("failed to read config {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
