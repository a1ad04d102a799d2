//! Gemini `generateContent` client.
//!
//! Blocking `reqwest` POST with the key in an `x-goog-api-key` header.
//! Every failure (transport, HTTP status, response shape) is a
//! `CollaboratorError`; the pipeline turns it into a fallback answer.

use std::path::Path;
use std::time::Duration;

use docai_core::config::GenerationConfig;
use docai_core::errors::{CollaboratorError, DocaiError, DocaiResult};
use docai_core::models::GenerationParams;
use docai_core::traits::IGenerativeModel;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    #[serde(rename = "generationConfig")]
    generation_config: SamplingConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SamplingConfig {
    temperature: f32,
    max_output_tokens: u32,
    top_k: u32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Client for the Gemini generative API.
pub struct GeminiClient {
    http: reqwest::blocking::Client,
    api_url: String,
    api_key: String,
    model_name: String,
}

impl GeminiClient {
    pub fn new(config: &GenerationConfig, api_key: impl Into<String>) -> DocaiResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DocaiError::ConfigError {
                reason: format!("http client: {e}"),
            })?;
        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            api_key: api_key.into(),
            model_name: model_name_from_url(&config.api_url),
        })
    }

    /// Read the API key from a file, trimming surrounding whitespace.
    pub fn load_api_key(path: impl AsRef<Path>) -> DocaiResult<String> {
        let path = path.as_ref();
        let key = std::fs::read_to_string(path).map_err(|e| DocaiError::ConfigError {
            reason: format!("cannot read API key file {}: {e}", path.display()),
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(DocaiError::ConfigError {
                reason: format!("API key file {} is empty", path.display()),
            });
        }
        Ok(key.to_string())
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

/// `gemini-1.5-flash` out of `.../models/gemini-1.5-flash:generateContent`.
fn model_name_from_url(url: &str) -> String {
    url.rsplit('/')
        .next()
        .and_then(|last| last.split(':').next())
        .filter(|name| !name.is_empty())
        .unwrap_or("gemini")
        .to_string()
}

/// JSON body for a `generateContent` call.
pub fn request_body(prompt: &str, params: &GenerationParams) -> DocaiResult<String> {
    let request = GenerateRequest {
        contents: [Content {
            parts: [Part { text: prompt }],
        }],
        generation_config: SamplingConfig {
            temperature: params.temperature,
            max_output_tokens: params.max_tokens,
            top_k: params.top_k,
            top_p: params.top_p,
        },
    };
    Ok(serde_json::to_string(&request)?)
}

/// Text of the first part of the first candidate.
pub fn parse_response(body: &str) -> DocaiResult<String> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| CollaboratorError::MalformedResponse {
            reason: format!("invalid JSON: {e}"),
        })?;
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .ok_or_else(|| {
            CollaboratorError::MalformedResponse {
                reason: "missing candidates[0].content.parts[0].text".to_string(),
            }
            .into()
        })
}

/// Keep at most `max_tokens` whitespace-separated tokens, appending `...`
/// when anything was dropped. Text within the limit is returned unchanged.
pub fn truncate_tokens(text: &str, max_tokens: usize) -> String {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() <= max_tokens {
        return text.to_string();
    }
    format!("{}...", tokens[..max_tokens].join(" "))
}

impl IGenerativeModel for GeminiClient {
    fn generate(&self, prompt: &str, params: &GenerationParams) -> DocaiResult<String> {
        let _span = docai_observability::generation_span!(self.model_name).entered();
        let body = request_body(prompt, params)?;

        let response = self
            .http
            .post(&self.api_url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .body(body)
            .send()
            .map_err(|e| CollaboratorError::Network {
                reason: e.to_string(),
            })?;

        let status = response.status();
        let text = response.text().map_err(|e| CollaboratorError::Network {
            reason: format!("reading response body: {e}"),
        })?;
        if !status.is_success() {
            return Err(CollaboratorError::HttpStatus {
                status: status.as_u16(),
                body: text,
            }
            .into());
        }

        let generated = parse_response(&text)?;
        debug!(chars = generated.chars().count(), "generation completed");
        Ok(truncate_tokens(&generated, params.max_tokens as usize))
    }

    fn name(&self) -> &str {
        &self.model_name
    }
}
