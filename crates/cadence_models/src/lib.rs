//! Upstream text-generation clients for Cadence.
//!
//! The serialized worker talks to the upstream API only through the
//! [`TextGenerator`] trait. Its results are folded into a [`CallOutcome`]
//! so retry logic can match on "rate limited" versus "fatal" instead of
//! inspecting error types.
//!
//! # Example
//!
//! ```no_run
//! use cadence_models::{GeminiClient, TextGenerator};
//! use cadence_rate_limit::GeminiSettings;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::from_settings(&GeminiSettings::default())?;
//! let text = client.generate("Say hello").await?;
//! println!("{}", text);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gemini;
mod generator;

pub use gemini::{
    Candidate, Content, EMPTY_RESPONSE, GeminiClient, GeminiResult, GenerateContentRequest,
    GenerateContentResponse, NO_CONTENT, Part, extract_text, extract_text_from_body,
};
pub use generator::{CallOutcome, TextGenerator};
