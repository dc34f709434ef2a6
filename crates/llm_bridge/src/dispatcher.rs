//! Analysis dispatcher
//!
//! Routes a validated payload to the text or vision endpoint and converts
//! every failure into displayable text. The single caller (a results panel)
//! only ever renders a string, so remote faults are never propagated as
//! errors; a failed analysis and a negative judgment differ only in wording.

use crate::text::TextEndpoint;
use crate::vision::VisionEndpoint;
use analysis_core::hint::hint_for;
use analysis_core::{AnalysisPayload, InputError};
use std::sync::Arc;

/// Routes analysis requests to the matching model endpoint.
///
/// Holds one endpoint per modality. The real `TextModel` and `VisionModel`
/// are constructed once at startup and injected here, so tests can
/// substitute recording mocks.
pub struct Dispatcher {
    text: Arc<dyn TextEndpoint>,
    vision: Arc<dyn VisionEndpoint>,
}

impl Dispatcher {
    pub fn new(text: Arc<dyn TextEndpoint>, vision: Arc<dyn VisionEndpoint>) -> Self {
        Self { text, vision }
    }

    /// Analyze one payload under the fixed instruction.
    ///
    /// Empty text is rejected locally without a network call. On success the
    /// model's text is returned verbatim; on failure the returned string is
    /// the normalized diagnostic built by `normalize_failure`.
    pub async fn analyze(&self, instruction: &str, payload: &AnalysisPayload) -> String {
        let outcome = match payload {
            AnalysisPayload::Text(text) => {
                if text.trim().is_empty() {
                    return InputError::EmptyText.to_string();
                }
                self.text.generate(instruction, text).await
            }
            AnalysisPayload::Image(image) => self.vision.generate(instruction, image).await,
        };

        match outcome {
            Ok(text) => text,
            Err(err) => Self::normalize_failure(&err),
        }
    }

    /// Build the user-facing diagnostic for a failed endpoint call.
    ///
    /// Generic prefix + underlying error text, then the matching hint when
    /// the message fits a known provider condition. The full diagnostic is
    /// also logged.
    fn normalize_failure(err: &anyhow::Error) -> String {
        let err_text = format!("{err:#}");
        tracing::error!("Gemini API error: {err_text}");

        let mut message = format!("An error occurred during analysis: {err_text}");
        if let Some(hint) = hint_for(&err_text) {
            message.push('\n');
            message.push_str(hint);
        }

        format!("Error during analysis. Details: {message}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::hint::{HINT_API_KEY, HINT_QUOTA, HINT_TIMEOUT};
    use analysis_core::{ImagePayload, SDG9_PROMPT};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Text endpoint mock recording every call it receives.
    struct MockText {
        calls: AtomicUsize,
        seen: Mutex<Vec<(String, String)>>,
        reply: Result<String, String>,
    }

    impl MockText {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
                reply: Ok(text.to_string()),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
                reply: Err(message.to_string()),
            })
        }
    }

    #[async_trait]
    impl TextEndpoint for MockText {
        async fn generate(&self, instruction: &str, text: &str) -> anyhow::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen
                .lock()
                .unwrap()
                .push((instruction.to_string(), text.to_string()));
            match &self.reply {
                Ok(reply) => Ok(reply.clone()),
                Err(message) => Err(anyhow::anyhow!("{message}")),
            }
        }
    }

    /// Vision endpoint mock counting calls.
    struct MockVision {
        calls: AtomicUsize,
        reply: Result<String, String>,
    }

    impl MockVision {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                reply: Ok(text.to_string()),
            })
        }
    }

    #[async_trait]
    impl VisionEndpoint for MockVision {
        async fn generate(
            &self,
            _instruction: &str,
            _image: &ImagePayload,
        ) -> anyhow::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Ok(reply) => Ok(reply.clone()),
                Err(message) => Err(anyhow::anyhow!("{message}")),
            }
        }
    }

    fn png_payload() -> ImagePayload {
        let img = image::ImageBuffer::from_pixel(2, 2, image::Rgb([10u8, 20u8, 30u8]));
        let mut bytes = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut bytes);
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut cursor, image::ImageFormat::Png)
            .unwrap();
        ImagePayload::from_bytes(bytes).unwrap()
    }

    #[tokio::test]
    async fn test_text_payload_uses_text_endpoint_only() {
        let text = MockText::replying("YES. Chemical dumping violates SDG 9.");
        let vision = MockVision::replying("unused");
        let dispatcher = Dispatcher::new(text.clone(), vision.clone());

        let payload =
            AnalysisPayload::Text("Factory dumping chemical waste into river".to_string());
        let result = dispatcher.analyze(SDG9_PROMPT, &payload).await;

        assert_eq!(result, "YES. Chemical dumping violates SDG 9.");
        assert_eq!(text.calls.load(Ordering::SeqCst), 1);
        assert_eq!(vision.calls.load(Ordering::SeqCst), 0);

        let seen = text.seen.lock().unwrap();
        assert_eq!(
            seen[0],
            (
                SDG9_PROMPT.to_string(),
                "Factory dumping chemical waste into river".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_image_payload_uses_vision_endpoint_only() {
        let text = MockText::replying("unused");
        let vision = MockVision::replying("NO. No indicators found.");
        let dispatcher = Dispatcher::new(text.clone(), vision.clone());

        let payload = AnalysisPayload::Image(png_payload());
        let result = dispatcher.analyze(SDG9_PROMPT, &payload).await;

        assert_eq!(result, "NO. No indicators found.");
        assert_eq!(text.calls.load(Ordering::SeqCst), 0);
        assert_eq!(vision.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_text_rejected_without_network_call() {
        let text = MockText::replying("unused");
        let vision = MockVision::replying("unused");
        let dispatcher = Dispatcher::new(text.clone(), vision.clone());

        for input in ["", "   ", "\n\t"] {
            let payload = AnalysisPayload::Text(input.to_string());
            let result = dispatcher.analyze(SDG9_PROMPT, &payload).await;
            assert_eq!(result, "Error: Please provide some text to analyze.");
        }

        assert_eq!(text.calls.load(Ordering::SeqCst), 0);
        assert_eq!(vision.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_quota_failure_gets_quota_hint() {
        let text = MockText::failing("429: Quota exceeded for requests per day");
        let vision = MockVision::replying("unused");
        let dispatcher = Dispatcher::new(text, vision);

        let payload = AnalysisPayload::Text("some scene".to_string());
        let result = dispatcher.analyze(SDG9_PROMPT, &payload).await;

        assert!(result.starts_with("Error during analysis. Details: "));
        assert!(result.contains("Quota exceeded for requests per day"));
        assert!(result.contains(HINT_QUOTA));
        assert!(!result.contains(HINT_API_KEY));
    }

    #[tokio::test]
    async fn test_credential_failure_gets_credential_hint() {
        let text = MockText::failing("400: API key not valid. Pass a valid key.");
        let vision = MockVision::replying("unused");
        let dispatcher = Dispatcher::new(text, vision);

        let payload = AnalysisPayload::Text("some scene".to_string());
        let result = dispatcher.analyze(SDG9_PROMPT, &payload).await;

        assert!(result.contains(HINT_API_KEY));
        assert!(!result.contains(HINT_QUOTA));
    }

    #[tokio::test]
    async fn test_timeout_failure_has_prefix_and_hint() {
        let text = MockText::failing("Deadline exceeded while waiting");
        let vision = MockVision::replying("unused");
        let dispatcher = Dispatcher::new(text, vision);

        let payload = AnalysisPayload::Text("some scene".to_string());
        let result = dispatcher.analyze(SDG9_PROMPT, &payload).await;

        assert!(result.contains("An error occurred during analysis: "));
        assert!(result.contains(HINT_TIMEOUT));
    }

    #[tokio::test]
    async fn test_unclassified_failure_has_no_hint() {
        let text = MockText::failing("connection reset by peer");
        let vision = MockVision::replying("unused");
        let dispatcher = Dispatcher::new(text, vision);

        let payload = AnalysisPayload::Text("some scene".to_string());
        let result = dispatcher.analyze(SDG9_PROMPT, &payload).await;

        assert_eq!(
            result,
            "Error during analysis. Details: An error occurred during analysis: \
             connection reset by peer"
        );
    }
}
