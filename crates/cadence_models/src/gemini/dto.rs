//! Wire types for `generateContent`.
//!
//! Only the fields we read are modelled. Everything is optional or defaulted
//! so partial responses still deserialize and fall through to a placeholder.

use super::GeminiResult;
use cadence_error::{GeminiError, GeminiErrorKind};
use serde::{Deserialize, Serialize};

/// Returned when the response body is the JSON literal `null`.
pub const EMPTY_RESPONSE: &str = "Empty response from API";

/// Returned when the response has no candidate text.
pub const NO_CONTENT: &str = "No questions generated.";

/// A single text part.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Part {
    /// Text of the part; absent for non-text parts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A sequence of parts from one author.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Content {
    /// Ordered parts
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// One generated candidate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Candidate {
    /// Candidate content; missing when generation was blocked
    #[serde(default)]
    pub content: Option<Content>,
}

/// Request body: a single user turn carrying the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    /// Conversation contents
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// Wrap a prompt as `{"contents":[{"parts":[{"text": prompt}]}]}`.
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }
}

/// Response body.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    /// Generated candidates, best first
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// First text fragment of the first candidate, or [`NO_CONTENT`].
pub fn extract_text(response: &GenerateContentResponse) -> String {
    response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .and_then(|content| content.parts.first())
        .and_then(|part| part.text.clone())
        .unwrap_or_else(|| NO_CONTENT.to_string())
}

/// Parse a successful response body and extract its text.
///
/// # Errors
///
/// Returns [`GeminiErrorKind::MalformedResponse`] when the body is not JSON
/// or not shaped like a `generateContent` response.
pub fn extract_text_from_body(body: &str) -> GeminiResult<String> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| GeminiError::new(GeminiErrorKind::MalformedResponse(e.to_string())))?;

    if value.is_null() {
        return Ok(EMPTY_RESPONSE.to_string());
    }

    let response: GenerateContentResponse = serde_json::from_value(value)
        .map_err(|e| GeminiError::new(GeminiErrorKind::MalformedResponse(e.to_string())))?;

    Ok(extract_text(&response))
}
