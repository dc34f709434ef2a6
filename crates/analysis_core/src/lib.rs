//! Core types for sdg9aid
//!
//! This crate defines the request payload model shared by the CLI, the
//! server and the frontend API, along with the fixed SDG 9 evaluation
//! prompt and the classifier that maps provider error text to user hints.

pub mod hint;
pub mod prompt;
pub mod types;

pub use prompt::SDG9_PROMPT;
pub use types::*;
