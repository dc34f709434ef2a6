//! Gemini HTTP API client
//!
//! Talks to the non-streaming `generateContent` endpoint of Google's
//! Generative Language API. One request per analysis; the caller supplies
//! the ordered content parts (instruction first, payload second).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the Gemini API client
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for Google Gemini
    pub api_key: String,
    /// Model used for text-only analysis
    pub text_model: String,
    /// Model used for image analysis
    pub vision_model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GeminiConfig {
    /// Create config from environment variables.
    ///
    /// `GOOGLE_API_KEY` is required; the model names and timeout can be
    /// overridden with `SDG9AID_TEXT_MODEL`, `SDG9AID_VISION_MODEL` and
    /// `SDG9AID_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GOOGLE_API_KEY")
            .context("GOOGLE_API_KEY environment variable not set")?;

        let text_model = std::env::var("SDG9AID_TEXT_MODEL")
            .unwrap_or_else(|_| "gemini-1.5-flash".to_string());
        let vision_model = std::env::var("SDG9AID_VISION_MODEL")
            .unwrap_or_else(|_| "gemini-1.5-flash".to_string());
        let timeout_secs = std::env::var("SDG9AID_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(120);

        Ok(Self {
            api_key,
            text_model,
            vision_model,
            timeout_secs,
        })
    }
}

/// Gemini API client shared by the text and vision endpoints
pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { config, client })
    }

    /// Create client from environment variables
    pub fn from_env() -> Result<Self> {
        let config = GeminiConfig::from_env()?;
        Self::new(config)
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Run one generateContent request and return the generated text.
    ///
    /// Fails on transport errors, non-success status codes (status and
    /// response body are included in the message) and responses without a
    /// text candidate.
    pub async fn generate(&self, model: &str, parts: Vec<GeminiPart>) -> Result<String> {
        let request = GeminiRequest {
            contents: vec![GeminiContent { parts }],
        };

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            model
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Gemini API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API error ({}): {}", status, error_text);
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .context("Failed to parse Gemini response")?;

        // Concatenate the text parts of the first candidate
        if let Some(candidate) = gemini_response.candidates.first() {
            let text: String = candidate
                .content
                .parts
                .iter()
                .filter_map(|part| match part {
                    GeminiPart::Text { text } => Some(text.as_str()),
                    GeminiPart::InlineData { .. } => None,
                })
                .collect();
            if !text.is_empty() {
                return Ok(text);
            }
        }

        anyhow::bail!("No text in Gemini response")
    }
}

/// Gemini API request structure
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiContent {
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeminiPart {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InlineData {
    pub mime_type: String,
    /// Base64-encoded image bytes
    pub data: String,
}

/// Gemini API response structure
#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    pub candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
pub struct GeminiCandidate {
    pub content: GeminiContent,
}
