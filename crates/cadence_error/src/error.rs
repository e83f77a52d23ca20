//! Top-level error wrapper types.

use crate::{ConfigError, GeminiError, ServerError, WorkerError};

/// Every error a Cadence crate can surface.
///
/// # Examples
///
/// ```
/// use cadence_error::{CadenceError, CadenceErrorKind, WorkerError, WorkerErrorKind};
///
/// let err: CadenceError = WorkerError::new(WorkerErrorKind::QueueClosed).into();
/// assert!(matches!(err.kind(), CadenceErrorKind::Worker(_)));
/// assert!(format!("{}", err).contains("Worker Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum CadenceErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Upstream generation API error
    #[from(GeminiError)]
    Gemini(GeminiError),
    /// Task queue and worker error
    #[from(WorkerError)]
    Worker(WorkerError),
    /// HTTP surface error
    #[from(ServerError)]
    Server(ServerError),
}

/// Cadence error with kind discrimination.
///
/// # Examples
///
/// ```
/// use cadence_error::{CadenceResult, ConfigError};
///
/// fn might_fail() -> CadenceResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Cadence Error: {}", _0)]
pub struct CadenceError(Box<CadenceErrorKind>);

impl CadenceError {
    /// Create a new error from a kind.
    pub fn new(kind: CadenceErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CadenceErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to CadenceErrorKind
impl<T> From<T> for CadenceError
where
    T: Into<CadenceErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Cadence operations.
pub type CadenceResult<T> = std::result::Result<T, CadenceError>;
