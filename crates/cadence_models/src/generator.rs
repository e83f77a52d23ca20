//! The external-call seam used by the serialized worker.

use crate::GeminiResult;
use async_trait::async_trait;

/// Anything that can turn one prompt into generated text.
///
/// Implementations make exactly one upstream call per `generate`; retrying
/// and pacing belong to the caller.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send one prompt upstream and return the first generated text fragment.
    async fn generate(&self, prompt: &str) -> GeminiResult<String>;

    /// Model identifier, for logs.
    fn model_name(&self) -> &str;

    /// [`generate`](Self::generate), classified for retry decisions.
    async fn call(&self, prompt: &str) -> CallOutcome {
        CallOutcome::from(self.generate(prompt).await)
    }
}

/// Result of one upstream call, classified.
///
/// # Examples
///
/// ```
/// use cadence_error::{GeminiError, GeminiErrorKind};
/// use cadence_models::CallOutcome;
///
/// let limited = CallOutcome::from(Err::<String, _>(GeminiError::new(
///     GeminiErrorKind::HttpError { status_code: 429, message: "retry in 2s".into() },
/// )));
/// assert!(matches!(limited, CallOutcome::RateLimited { .. }));
///
/// let denied = CallOutcome::from(Err::<String, _>(GeminiError::new(
///     GeminiErrorKind::HttpError { status_code: 403, message: "bad key".into() },
/// )));
/// assert!(matches!(denied, CallOutcome::Fatal { .. }));
///
/// let ok = CallOutcome::from(Ok::<_, GeminiError>("text".to_string()));
/// assert_eq!(ok, CallOutcome::Success("text".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum CallOutcome {
    /// Generated text
    #[display("success")]
    Success(String),
    /// Upstream asked us to slow down; worth retrying
    #[display("rate limited: {}", message)]
    RateLimited {
        /// Upstream description, possibly carrying a retry hint
        message: String,
    },
    /// Anything else; retrying would not help
    #[display("fatal: {}", message)]
    Fatal {
        /// Failure description
        message: String,
    },
}

impl From<GeminiResult<String>> for CallOutcome {
    fn from(result: GeminiResult<String>) -> Self {
        match result {
            Ok(text) => CallOutcome::Success(text),
            Err(e) if e.is_rate_limited() => CallOutcome::RateLimited {
                message: e.message(),
            },
            Err(e) => CallOutcome::Fatal {
                message: e.message(),
            },
        }
    }
}
