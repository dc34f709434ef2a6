//! Analysis request payload model
//!
//! A submission carries exactly one payload: either a free-text description
//! or a decoded upload image. Image bytes are validated here, before any
//! network traffic, so the dispatcher only ever sees well-formed input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input validation errors, surfaced to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Error: Please provide some text to analyze.")]
    EmptyText,

    #[error("Error: Invalid input type provided.")]
    InvalidInput,

    #[error("Error processing image: {0}")]
    UnreadableImage(String),
}

/// A validated upload image, ready to send to a vision model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
    /// Original encoded bytes (PNG or JPEG), exactly as uploaded.
    pub bytes: Vec<u8>,
    /// MIME type matching `bytes`.
    pub mime_type: String,
    /// Pixel dimensions from the decoded image.
    pub width: u32,
    pub height: u32,
}

impl ImagePayload {
    /// Validate and wrap uploaded image bytes.
    ///
    /// Accepts PNG and JPEG only. The buffer is fully decoded once so that
    /// truncated or corrupt uploads are rejected before analysis.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, InputError> {
        let format = image::guess_format(&bytes).map_err(|_| InputError::InvalidInput)?;

        let mime_type = match format {
            image::ImageFormat::Png => "image/png",
            image::ImageFormat::Jpeg => "image/jpeg",
            _ => return Err(InputError::InvalidInput),
        };

        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| InputError::UnreadableImage(e.to_string()))?;

        Ok(Self {
            bytes,
            mime_type: mime_type.to_string(),
            width: decoded.width(),
            height: decoded.height(),
        })
    }
}

/// The subject of one analysis submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisPayload {
    /// Free-text description of an industrial practice or scene.
    Text(String),
    /// Uploaded image of an industrial scene.
    Image(ImagePayload),
}

impl AnalysisPayload {
    /// Build a payload from the raw form inputs.
    ///
    /// An uploaded image always wins over entered text; with no image, the
    /// text must be non-empty after trimming.
    pub fn from_parts(
        text: Option<String>,
        image_bytes: Option<Vec<u8>>,
    ) -> Result<Self, InputError> {
        if let Some(bytes) = image_bytes {
            return Ok(Self::Image(ImagePayload::from_bytes(bytes)?));
        }

        match text {
            Some(t) if !t.trim().is_empty() => Ok(Self::Text(t)),
            _ => Err(InputError::EmptyText),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    fn png_bytes() -> Vec<u8> {
        let img = ImageBuffer::from_pixel(4, 4, Rgb([120u8, 120u8, 120u8]));
        let mut bytes = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut bytes);
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut cursor, image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_image_payload_accepts_png() {
        let payload = ImagePayload::from_bytes(png_bytes()).unwrap();
        assert_eq!(payload.mime_type, "image/png");
        assert_eq!(payload.width, 4);
        assert_eq!(payload.height, 4);
    }

    #[test]
    fn test_image_payload_rejects_garbage() {
        let result = ImagePayload::from_bytes(vec![0u8, 1, 2, 3, 4]);
        assert_eq!(result.unwrap_err(), InputError::InvalidInput);
    }

    #[test]
    fn test_image_payload_rejects_truncated_png() {
        let mut bytes = png_bytes();
        bytes.truncate(12); // keeps the PNG signature, drops the data
        let result = ImagePayload::from_bytes(bytes);
        assert!(matches!(result, Err(InputError::UnreadableImage(_))));
    }

    #[test]
    fn test_image_payload_rejects_unsupported_format() {
        // Valid GIF header; format is recognized but not accepted
        let bytes = b"GIF89a\x01\x00\x01\x00\x00\x00\x00".to_vec();
        let result = ImagePayload::from_bytes(bytes);
        assert_eq!(result.unwrap_err(), InputError::InvalidInput);
    }

    #[test]
    fn test_from_parts_text_only() {
        let payload =
            AnalysisPayload::from_parts(Some("smokestacks at night".to_string()), None).unwrap();
        assert!(matches!(payload, AnalysisPayload::Text(_)));
    }

    #[test]
    fn test_from_parts_empty_text_rejected() {
        let result = AnalysisPayload::from_parts(Some("   \n".to_string()), None);
        assert_eq!(result.unwrap_err(), InputError::EmptyText);

        let result = AnalysisPayload::from_parts(None, None);
        assert_eq!(result.unwrap_err(), InputError::EmptyText);
    }

    #[test]
    fn test_from_parts_image_wins_over_text() {
        let payload =
            AnalysisPayload::from_parts(Some("ignored".to_string()), Some(png_bytes())).unwrap();
        assert!(matches!(payload, AnalysisPayload::Image(_)));
    }

    #[test]
    fn test_input_error_messages_are_fixed() {
        assert_eq!(
            InputError::EmptyText.to_string(),
            "Error: Please provide some text to analyze."
        );
        assert_eq!(
            InputError::InvalidInput.to_string(),
            "Error: Invalid input type provided."
        );
    }
}
