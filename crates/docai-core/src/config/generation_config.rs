use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::GenerationParams;

/// Generative model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// `generateContent` endpoint of the generative API.
    pub api_url: String,
    pub temperature: f32,
    /// Max output tokens requested from the API; longer answers are cut.
    pub max_tokens: u32,
    pub top_k: u32,
    pub top_p: f32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl GenerationConfig {
    /// Sampling parameters handed to the generative model.
    pub fn params(&self) -> GenerationParams {
        GenerationParams {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            top_k: self.top_k,
            top_p: self.top_p,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_url: defaults::DEFAULT_API_URL.to_string(),
            temperature: defaults::DEFAULT_TEMPERATURE,
            max_tokens: defaults::DEFAULT_MAX_TOKENS,
            top_k: defaults::DEFAULT_GENERATION_TOP_K,
            top_p: defaults::DEFAULT_GENERATION_TOP_P,
            timeout_secs: defaults::DEFAULT_TIMEOUT_SECS,
        }
    }
}
