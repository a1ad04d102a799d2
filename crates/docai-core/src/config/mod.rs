pub mod defaults;
mod generation_config;
mod index_config;
mod ingestion_config;
mod observability_config;
mod privacy_config;
mod retrieval_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{DocaiError, DocaiResult};

pub use generation_config::GenerationConfig;
pub use index_config::IndexConfig;
pub use ingestion_config::IngestionConfig;
pub use observability_config::ObservabilityConfig;
pub use privacy_config::{OverlapPolicy, PatternOffsets, PrivacyConfig};
pub use retrieval_config::RetrievalConfig;

/// Workspace-wide configuration. Every section falls back to its defaults,
/// so an empty TOML document is a valid config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocaiConfig {
    pub ingestion: IngestionConfig,
    pub retrieval: RetrievalConfig,
    pub privacy: PrivacyConfig,
    pub index: IndexConfig,
    pub generation: GenerationConfig,
    pub observability: ObservabilityConfig,
}

impl DocaiConfig {
    /// Parse a config from TOML text.
    pub fn from_toml(text: &str) -> DocaiResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> DocaiResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| DocaiError::ConfigError {
            reason: format!("{}: {e}", path.display()),
        })?;
        Self::from_toml(&text)
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> DocaiResult<()> {
        if self.ingestion.chunk_size == 0 {
            return Err(DocaiError::ConfigError {
                reason: "ingestion.chunk_size must be greater than zero".to_string(),
            });
        }
        if self.index.dimensions == 0 {
            return Err(DocaiError::ConfigError {
                reason: "index.dimensions must be greater than zero".to_string(),
            });
        }
        if self.privacy.replacement_token.is_empty() {
            return Err(DocaiError::ConfigError {
                reason: "privacy.replacement_token must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
