//! Backoff delays derived from upstream rate-limit messages.
//!
//! Gemini's 429 responses usually embed a hint such as
//! `"Please retry in 37.83s."`. We honour the hint plus a safety buffer,
//! and fall back to a fixed delay when there is no usable hint.

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use std::time::Duration;

static RETRY_HINT: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"retry in ([0-9.]+)s").expect("Valid retry hint regex")
});

/// How long to wait before retrying a rate-limited call.
///
/// # Examples
///
/// ```
/// use cadence_rate_limit::BackoffPolicy;
/// use std::time::Duration;
///
/// let policy = BackoffPolicy::default();
/// assert_eq!(
///     policy.delay_for("Quota exceeded. Please retry in 2.5s."),
///     Duration::from_millis(3500)
/// );
/// assert_eq!(policy.delay_for("no hint here"), Duration::from_millis(30_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BackoffPolicy {
    /// Delay used when the message carries no parsable hint
    pub default_delay_ms: u64,
    /// Added on top of the upstream's own hint
    pub buffer_ms: u64,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            default_delay_ms: 30_000,
            buffer_ms: 1_000,
        }
    }
}

impl BackoffPolicy {
    /// Create a policy with explicit default and buffer delays.
    pub fn new(default_delay: Duration, buffer: Duration) -> Self {
        Self {
            default_delay_ms: default_delay.as_millis().try_into().unwrap_or(u64::MAX),
            buffer_ms: buffer.as_millis().try_into().unwrap_or(u64::MAX),
        }
    }

    /// Compute the wait for a rate-limit error message.
    ///
    /// Total: every input yields a delay. A hint of `n` seconds becomes
    /// `n * 1000` milliseconds (fraction truncated) plus the buffer.
    pub fn delay_for(&self, message: &str) -> Duration {
        let hinted = RETRY_HINT
            .captures(message)
            .and_then(|caps| caps.get(1))
            .and_then(|secs| secs.as_str().parse::<f64>().ok());

        match hinted {
            // f64 -> u64 casts saturate, so an absurd hint cannot overflow
            Some(secs) => Duration::from_millis(
                ((secs * 1000.0) as u64).saturating_add(self.buffer_ms),
            ),
            None => Duration::from_millis(self.default_delay_ms),
        }
    }
}

/// [`BackoffPolicy::delay_for`] with the default policy.
///
/// # Examples
///
/// ```
/// use cadence_rate_limit::parse_delay;
/// use std::time::Duration;
///
/// assert_eq!(parse_delay("... retry in 2.5s ..."), Duration::from_millis(3500));
/// assert_eq!(parse_delay("no hint here"), Duration::from_millis(30_000));
/// ```
pub fn parse_delay(message: &str) -> Duration {
    BackoffPolicy::default().delay_for(message)
}
