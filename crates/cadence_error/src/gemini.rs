//! Upstream generation API error types.

/// Gemini-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GeminiErrorKind {
    /// API key not configured
    #[display("Gemini API key not configured (set gemini.api_key or GEMINI_API_KEY)")]
    MissingApiKey,
    /// Failed to build the HTTP client
    #[display("Failed to create Gemini client: {}", _0)]
    ClientCreation(String),
    /// Request never produced a response (connect, timeout, body read)
    #[display("Gemini API request failed: {}", _0)]
    ApiRequest(String),
    /// Upstream answered with a non-success status
    #[display("HTTP {} error: {}", status_code, message)]
    HttpError {
        /// HTTP status code
        status_code: u16,
        /// Error message, usually the upstream response body
        message: String,
    },
    /// Response body was not the JSON document we expect
    #[display("Malformed Gemini response: {}", _0)]
    MalformedResponse(String),
}

impl GeminiErrorKind {
    /// True when the upstream rejected the call for exceeding its rate limit.
    ///
    /// Only `429 Too Many Requests` counts. Every other status, including
    /// 5xx, is final for the task that produced it.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, GeminiErrorKind::HttpError { status_code: 429, .. })
    }

    /// The HTTP status code, if the upstream produced one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            GeminiErrorKind::HttpError { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

/// Gemini error with source location tracking.
///
/// # Examples
///
/// ```
/// use cadence_error::{GeminiError, GeminiErrorKind};
///
/// let err = GeminiError::new(GeminiErrorKind::HttpError {
///     status_code: 429,
///     message: "Quota exceeded. Please retry in 2.5s.".to_string(),
/// });
/// assert!(err.is_rate_limited());
/// assert!(format!("{}", err).contains("retry in 2.5s"));
///
/// let err = GeminiError::new(GeminiErrorKind::MissingApiKey);
/// assert!(!err.is_rate_limited());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Gemini Error: {} at line {} in {}", kind, line, file)]
pub struct GeminiError {
    /// The kind of error that occurred
    pub kind: GeminiErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GeminiError {
    /// Create a new GeminiError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GeminiErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// See [`GeminiErrorKind::is_rate_limited`].
    pub fn is_rate_limited(&self) -> bool {
        self.kind.is_rate_limited()
    }

    /// The upstream's own description of the failure, without location noise.
    ///
    /// This is the text scanned for a `retry in <n>s` hint and embedded in
    /// terminal error payloads.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}
