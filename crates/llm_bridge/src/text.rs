//! Text endpoint for description analysis

use crate::gemini::{GeminiClient, GeminiPart};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// A text-capable model endpoint.
///
/// The trait seam keeps the dispatcher testable with substitute endpoints.
#[async_trait]
pub trait TextEndpoint: Send + Sync {
    /// Analyze a text description under the given instruction.
    async fn generate(&self, instruction: &str, text: &str) -> Result<String>;
}

/// Gemini-backed text endpoint
pub struct TextModel {
    client: Arc<GeminiClient>,
    model_name: String,
}

impl TextModel {
    pub fn new(client: Arc<GeminiClient>, model_name: String) -> Self {
        Self { client, model_name }
    }

    /// Create a text model using the client's configured text model name
    pub fn from_client(client: Arc<GeminiClient>) -> Self {
        let model_name = client.config().text_model.clone();
        Self::new(client, model_name)
    }
}

#[async_trait]
impl TextEndpoint for TextModel {
    async fn generate(&self, instruction: &str, text: &str) -> Result<String> {
        let parts = vec![
            GeminiPart::Text {
                text: instruction.to_string(),
            },
            GeminiPart::Text {
                text: text.to_string(),
            },
        ];

        self.client.generate(&self.model_name, parts).await
    }
}
