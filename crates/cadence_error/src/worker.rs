//! Task queue and serialized worker error types.

/// Error conditions raised by the queue/worker pipeline.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum WorkerErrorKind {
    /// The worker has stopped; the queue no longer accepts tasks
    #[display("Task queue is closed")]
    QueueClosed,
    /// The worker dropped a task's result handle without completing it
    #[display("Task was abandoned before completion")]
    HandleDropped,
    /// The caller stopped waiting before the task completed
    #[display("Timed out after {} ms waiting for task result", _0)]
    TimedOut(u64),
    /// The worker hit an unexpected fault while executing the task
    #[display("Internal fault during task execution: {}", _0)]
    Internal(String),
    /// `start` was called on a worker that is already running
    #[display("Worker is already running")]
    AlreadyRunning,
    /// `stop` was called on a worker that was never started
    #[display("Worker is not running")]
    NotRunning,
}

/// Worker error with location tracking.
///
/// # Examples
///
/// ```
/// use cadence_error::{WorkerError, WorkerErrorKind};
///
/// let err = WorkerError::new(WorkerErrorKind::Internal("boom".into()));
/// assert_eq!(err.kind, WorkerErrorKind::Internal("boom".into()));
/// assert!(format!("{}", err).contains("boom"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Worker Error: {} at line {} in {}", kind, line, file)]
pub struct WorkerError {
    /// The error kind
    pub kind: WorkerErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl WorkerError {
    /// Create a new WorkerError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: WorkerErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
