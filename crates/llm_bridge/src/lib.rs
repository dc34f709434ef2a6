//! LLM bridge for the Gemini API
//!
//! Provides the HTTP client for Google's Gemini generateContent endpoint,
//! one endpoint wrapper per modality (text and vision), and the dispatcher
//! that routes a validated payload to the right endpoint and normalizes
//! every failure into displayable text.

pub mod dispatcher;
pub mod gemini;
pub mod text;
pub mod vision;

pub use dispatcher::Dispatcher;
pub use gemini::{GeminiClient, GeminiConfig};
pub use text::{TextEndpoint, TextModel};
pub use vision::{VisionEndpoint, VisionModel};
