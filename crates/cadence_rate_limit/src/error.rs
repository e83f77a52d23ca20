//! Error types for admission control.

use std::fmt;

/// Error kinds for admission control.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RateLimitErrorKind {
    /// Every permit of the named gate is held.
    Saturated {
        /// Gate name
        gate: String,
        /// Gate capacity
        capacity: usize,
    },
    /// A gate was configured with a capacity it cannot honour.
    InvalidCapacity(String),
}

impl fmt::Display for RateLimitErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateLimitErrorKind::Saturated { gate, capacity } => write!(
                f,
                "Admission gate '{}' saturated ({} active requests)",
                gate, capacity
            ),
            RateLimitErrorKind::InvalidCapacity(msg) => write!(f, "Invalid capacity: {}", msg),
        }
    }
}

/// Admission error with location tracking.
#[derive(Debug, Clone)]
pub struct RateLimitError {
    kind: RateLimitErrorKind,
    line: u32,
    file: &'static str,
}

impl RateLimitError {
    /// Create a new admission error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RateLimitErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &RateLimitErrorKind {
        &self.kind
    }

    /// True when the error is a refused admission rather than a setup problem.
    pub fn is_saturated(&self) -> bool {
        matches!(self.kind, RateLimitErrorKind::Saturated { .. })
    }
}

impl fmt::Display for RateLimitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rate Limit Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for RateLimitError {}
