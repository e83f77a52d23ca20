//! Worker counters.

use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters shared between the queue, the worker loop and observers.
#[derive(Debug, Clone, Default)]
pub struct WorkerMetrics {
    inner: Arc<WorkerMetricsInner>,
}

#[derive(Debug, Default)]
struct WorkerMetricsInner {
    submitted: AtomicU64,
    completed: AtomicU64,
    unobserved: AtomicU64,
    upstream_calls: AtomicU64,
    rate_limit_retries: AtomicU64,
    retries_exhausted: AtomicU64,
    fatal_failures: AtomicU64,
    internal_faults: AtomicU64,
}

impl WorkerMetrics {
    /// Creates a zeroed collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a task accepted by the queue.
    pub fn record_submitted(&self) {
        self.inner.submitted.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a completed result handle; `observed` is false when the caller had already left.
    pub fn record_completed(&self, observed: bool) {
        self.inner.completed.fetch_add(1, Ordering::Relaxed);
        if !observed {
            self.inner.unobserved.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Records one call to the upstream API.
    pub fn record_upstream_call(&self) {
        self.inner.upstream_calls.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a rate-limited attempt that will be retried.
    pub fn record_rate_limit_retry(&self) {
        self.inner.rate_limit_retries.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a task that ran out of attempts.
    pub fn record_retries_exhausted(&self) {
        self.inner.retries_exhausted.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a non-retryable upstream failure.
    pub fn record_fatal_failure(&self) {
        self.inner.fatal_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a task that ended in an exceptional completion.
    pub fn record_internal_fault(&self) {
        self.inner.internal_faults.fetch_add(1, Ordering::Relaxed);
    }

    /// Gets the submitted task count.
    pub fn submitted(&self) -> u64 {
        self.inner.submitted.load(Ordering::Relaxed)
    }

    /// Gets the completed task count.
    pub fn completed(&self) -> u64 {
        self.inner.completed.load(Ordering::Relaxed)
    }

    /// Gets the upstream call count.
    pub fn upstream_calls(&self) -> u64 {
        self.inner.upstream_calls.load(Ordering::Relaxed)
    }

    /// Gets the rate-limit retry count.
    pub fn rate_limit_retries(&self) -> u64 {
        self.inner.rate_limit_retries.load(Ordering::Relaxed)
    }

    /// Gets the exhausted task count.
    pub fn retries_exhausted(&self) -> u64 {
        self.inner.retries_exhausted.load(Ordering::Relaxed)
    }

    /// Gets the fatal failure count.
    pub fn fatal_failures(&self) -> u64 {
        self.inner.fatal_failures.load(Ordering::Relaxed)
    }

    /// Gets a serializable snapshot of all counters.
    pub fn snapshot(&self) -> WorkerMetricsSnapshot {
        WorkerMetricsSnapshot {
            submitted: self.submitted(),
            completed: self.completed(),
            unobserved: self.inner.unobserved.load(Ordering::Relaxed),
            upstream_calls: self.upstream_calls(),
            rate_limit_retries: self.rate_limit_retries(),
            retries_exhausted: self.retries_exhausted(),
            fatal_failures: self.fatal_failures(),
            internal_faults: self.inner.internal_faults.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`WorkerMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct WorkerMetricsSnapshot {
    /// Tasks accepted by the queue
    pub submitted: u64,
    /// Result handles completed
    pub completed: u64,
    /// Completions nobody was waiting for
    pub unobserved: u64,
    /// Calls made to the upstream API
    pub upstream_calls: u64,
    /// Rate-limited attempts followed by a backoff
    pub rate_limit_retries: u64,
    /// Tasks that ran out of attempts
    pub retries_exhausted: u64,
    /// Tasks ended by a non-retryable failure
    pub fatal_failures: u64,
    /// Tasks ended by an exceptional completion
    pub internal_faults: u64,
}
