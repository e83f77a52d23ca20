//! Google Gemini REST client.
//!
//! One `generateContent` call per prompt, no streaming, no tools. The
//! worker decides when to call and how often to retry.

mod client;
mod dto;

pub use client::GeminiClient;
pub use dto::{
    Candidate, Content, EMPTY_RESPONSE, GenerateContentRequest, GenerateContentResponse,
    NO_CONTENT, Part, extract_text, extract_text_from_body,
};

/// Result type for Gemini operations.
pub type GeminiResult<T> = Result<T, cadence_error::GeminiError>;
