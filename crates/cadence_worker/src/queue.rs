//! Unbounded FIFO task queue.

use crate::WorkerMetrics;
use crate::handle::{Completer, ResultHandle, result_channel};
use cadence_core::Task;
use cadence_error::{WorkerError, WorkerErrorKind};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::mpsc;
use tracing::{debug, instrument};

/// A task paired with the completer for its result handle.
#[derive(Debug)]
pub(crate) struct QueuedTask {
    pub(crate) task: Task,
    pub(crate) completer: Completer,
}

/// Producer side of the queue. Cheap to clone; every clone feeds the same worker.
#[derive(Debug, Clone)]
pub struct TaskQueue {
    tx: mpsc::UnboundedSender<QueuedTask>,
    depth: Arc<AtomicUsize>,
    metrics: WorkerMetrics,
}

/// Consumer side of the queue, owned by the worker loop.
#[derive(Debug)]
pub(crate) struct TaskReceiver {
    rx: mpsc::UnboundedReceiver<QueuedTask>,
    depth: Arc<AtomicUsize>,
}

/// Create a connected queue pair.
pub(crate) fn task_channel(metrics: WorkerMetrics) -> (TaskQueue, TaskReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    let depth = Arc::new(AtomicUsize::new(0));
    (
        TaskQueue {
            tx,
            depth: Arc::clone(&depth),
            metrics,
        },
        TaskReceiver { rx, depth },
    )
}

impl TaskQueue {
    /// Enqueue a task and return the handle its outcome will arrive on.
    ///
    /// Never blocks and never rejects for capacity.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerErrorKind::QueueClosed`] once the worker has stopped.
    #[instrument(skip(self, task), fields(kind = %task.kind()))]
    pub fn submit(&self, task: Task) -> Result<ResultHandle, WorkerError> {
        let (completer, handle) = result_channel();

        // Count before sending so the receiver never decrements below zero.
        self.depth.fetch_add(1, Ordering::SeqCst);
        if self.tx.send(QueuedTask { task, completer }).is_err() {
            release_slot(&self.depth);
            return Err(WorkerError::new(WorkerErrorKind::QueueClosed));
        }

        self.metrics.record_submitted();
        debug!(queue_depth = self.depth(), "Task enqueued");
        Ok(handle)
    }

    /// Tasks waiting to be dequeued.
    pub fn depth(&self) -> usize {
        self.depth.load(Ordering::SeqCst)
    }

    /// True once the worker has stopped and dropped its end of the queue.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Counters of the worker this queue feeds.
    pub fn metrics(&self) -> &WorkerMetrics {
        &self.metrics
    }
}

impl TaskReceiver {
    /// Wait for the next task in submission order.
    ///
    /// Returns `None` only when every producer has been dropped.
    pub(crate) async fn dequeue(&mut self) -> Option<QueuedTask> {
        let next = self.rx.recv().await;
        if next.is_some() {
            release_slot(&self.depth);
        }
        next
    }
}

/// Decrement the depth counter without wrapping below zero.
///
/// The receiver resets depth to zero on drop, which can land between a
/// producer's increment and its failed send.
fn release_slot(depth: &AtomicUsize) {
    let _ = depth.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
}

impl Drop for TaskReceiver {
    fn drop(&mut self) {
        // Anything still buffered is dropped with the channel.
        self.depth.store(0, Ordering::SeqCst);
    }
}
