//! Per-task retry execution.

use crate::WorkerMetrics;
use cadence_core::TaskKind;
use cadence_models::{CallOutcome, TextGenerator};
use cadence_rate_limit::WorkerSettings;
use tracing::{debug, error, instrument, warn};

/// Payload delivered when every attempt was rate limited.
pub fn exhausted_payload(kind: TaskKind) -> String {
    match kind {
        TaskKind::QuestionGeneration => {
            "Error: Failed to generate questions after retries due to rate limits.".to_string()
        }
        TaskKind::CodeAnalysis => {
            "Error: Failed to analyze code after retries due to rate limits.".to_string()
        }
    }
}

/// Payload delivered for a non-retryable failure.
pub fn failure_payload(kind: TaskKind, message: &str) -> String {
    match kind {
        TaskKind::QuestionGeneration => format!("Error generating questions: {}", message),
        TaskKind::CodeAnalysis => format!("Error analyzing code: {}", message),
    }
}

/// Run one prompt against the generator, retrying rate-limited attempts.
///
/// Makes at most `settings.max_attempts` calls. Between a rate-limited
/// attempt and the next one it sleeps for the backoff derived from the
/// upstream message; there is no sleep after the final attempt. Terminal
/// conditions come back as text, never as an error.
#[instrument(
    skip(generator, prompt, settings, metrics),
    fields(model = %generator.model_name(), max_attempts = settings.max_attempts)
)]
pub async fn execute_with_retry<G>(
    generator: &G,
    kind: TaskKind,
    prompt: &str,
    settings: &WorkerSettings,
    metrics: &WorkerMetrics,
) -> String
where
    G: TextGenerator + ?Sized,
{
    let backoff = settings.backoff();

    for attempt in 1..=settings.max_attempts {
        debug!(attempt, "Calling upstream");
        metrics.record_upstream_call();

        match generator.call(prompt).await {
            CallOutcome::Success(text) => {
                debug!(attempt, chars = text.len(), "Upstream call succeeded");
                return text;
            }
            CallOutcome::Fatal { message } => {
                error!(attempt, error = %message, "Non-retryable upstream failure");
                metrics.record_fatal_failure();
                return failure_payload(kind, &message);
            }
            CallOutcome::RateLimited { message } => {
                if attempt >= settings.max_attempts {
                    warn!(attempt, "Rate limited on final attempt");
                    break;
                }
                let delay = backoff.delay_for(&message);
                warn!(
                    attempt,
                    max_attempts = settings.max_attempts,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    "Rate limit hit, backing off"
                );
                metrics.record_rate_limit_retry();
                tokio::time::sleep(delay).await;
            }
        }
    }

    metrics.record_retries_exhausted();
    exhausted_payload(kind)
}
