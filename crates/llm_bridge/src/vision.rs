//! Vision endpoint for image analysis

use crate::gemini::{GeminiClient, GeminiPart, InlineData};
use analysis_core::ImagePayload;
use anyhow::Result;
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use std::sync::Arc;

/// A vision-capable model endpoint.
#[async_trait]
pub trait VisionEndpoint: Send + Sync {
    /// Analyze an uploaded image under the given instruction.
    async fn generate(&self, instruction: &str, image: &ImagePayload) -> Result<String>;
}

/// Gemini-backed vision endpoint
pub struct VisionModel {
    client: Arc<GeminiClient>,
    model_name: String,
}

impl VisionModel {
    pub fn new(client: Arc<GeminiClient>, model_name: String) -> Self {
        Self { client, model_name }
    }

    /// Create a vision model using the client's configured vision model name
    pub fn from_client(client: Arc<GeminiClient>) -> Self {
        let model_name = client.config().vision_model.clone();
        Self::new(client, model_name)
    }
}

#[async_trait]
impl VisionEndpoint for VisionModel {
    async fn generate(&self, instruction: &str, image: &ImagePayload) -> Result<String> {
        let parts = vec![
            GeminiPart::Text {
                text: instruction.to_string(),
            },
            GeminiPart::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type.clone(),
                    data: general_purpose::STANDARD.encode(&image.bytes),
                },
            },
        ];

        self.client.generate(&self.model_name, parts).await
    }
}
