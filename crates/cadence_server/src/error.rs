//! Mapping of admission and worker failures onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cadence_core::TaskKind;
use cadence_error::{WorkerError, WorkerErrorKind};
use cadence_rate_limit::{RateLimitError, RateLimitErrorKind};
use cadence_worker::failure_payload;
use tracing::{error, warn};

/// Why a gated request did not produce generated text.
#[derive(Debug, derive_more::Display)]
pub enum ApiError {
    /// The entry point's gate was saturated; no task was created
    #[display("{}", _0)]
    Refused(RateLimitError),
    /// The task was created but no text came back
    #[display("{}", error)]
    Worker {
        /// Kind of the task that failed
        task: TaskKind,
        /// Underlying failure
        error: WorkerError,
    },
}

impl ApiError {
    /// Status code this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Refused(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Worker { error, .. } => match error.kind {
                WorkerErrorKind::TimedOut(_) => StatusCode::REQUEST_TIMEOUT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn body(&self) -> String {
        match self {
            ApiError::Refused(e) => match e.kind() {
                RateLimitErrorKind::Saturated { capacity, .. } => format!(
                    "Server limit reached ({} active requests). Please try again later.",
                    capacity
                ),
                other => other.to_string(),
            },
            ApiError::Worker { task, error } => match &error.kind {
                WorkerErrorKind::TimedOut(_) => {
                    "Request timed out. The server is under heavy load.".to_string()
                }
                kind => failure_payload(*task, &kind.to_string()),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match status {
            StatusCode::INTERNAL_SERVER_ERROR => error!(error = %self, "Request failed"),
            _ => warn!(status = status.as_u16(), error = %self, "Request not served"),
        }
        (status, self.body()).into_response()
    }
}
