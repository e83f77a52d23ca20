//! Single-assignment result handles.

use cadence_error::{WorkerError, WorkerErrorKind};
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::warn;

/// Outcome of one task: generated text (including terminal error payloads)
/// or an exceptional completion.
pub type TaskResult = Result<String, WorkerError>;

/// Create a connected completer/handle pair.
pub(crate) fn result_channel() -> (Completer, ResultHandle) {
    let (tx, rx) = oneshot::channel();
    (Completer { tx }, ResultHandle { rx })
}

/// Write side of a result handle, owned by the worker.
#[derive(Debug)]
pub(crate) struct Completer {
    tx: oneshot::Sender<TaskResult>,
}

impl Completer {
    /// Deliver the task's outcome.
    ///
    /// Returns `false` when the caller already stopped waiting; that is not
    /// an error, the result is simply discarded.
    pub(crate) fn complete(self, result: TaskResult) -> bool {
        self.tx.send(result).is_ok()
    }
}

/// Read side of a task's outcome, returned by [`TaskQueue::submit`](crate::TaskQueue::submit).
///
/// Consumed by waiting. Dropping it (or timing out) never cancels the task.
#[derive(Debug)]
pub struct ResultHandle {
    rx: oneshot::Receiver<TaskResult>,
}

impl ResultHandle {
    /// Wait for the task without a bound.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerErrorKind::HandleDropped`] if the worker stopped
    /// before completing the task, or the task's own exceptional completion.
    pub async fn wait(self) -> TaskResult {
        match self.rx.await {
            Ok(result) => result,
            Err(_) => Err(WorkerError::new(WorkerErrorKind::HandleDropped)),
        }
    }

    /// Wait for the task for at most `limit`.
    ///
    /// # Errors
    ///
    /// As [`wait`](Self::wait), plus [`WorkerErrorKind::TimedOut`] when the
    /// limit expires first. The task keeps its place in the queue.
    pub async fn wait_timeout(self, limit: Duration) -> TaskResult {
        match tokio::time::timeout(limit, self.wait()).await {
            Ok(result) => result,
            Err(_) => {
                let waited_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
                warn!(waited_ms, "Gave up waiting for task result");
                Err(WorkerError::new(WorkerErrorKind::TimedOut(waited_ms)))
            }
        }
    }
}
