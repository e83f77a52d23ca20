//! The single serialized worker and its start/stop lifecycle.

use crate::handle::TaskResult;
use crate::queue::{QueuedTask, TaskReceiver, task_channel};
use crate::{TaskQueue, WorkerMetrics, execute_with_retry};
use cadence_core::{PromptBudget, Task, build_prompt};
use cadence_error::{WorkerError, WorkerErrorKind};
use cadence_models::TextGenerator;
use cadence_rate_limit::WorkerSettings;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument};

/// Owns the upstream generator and the one loop allowed to call it.
///
/// Create one per process (or per test), [`start`](Self::start) it to get
/// the [`TaskQueue`] callers submit to, and [`stop`](Self::stop) it on
/// shutdown. Tasks still queued, in flight or mid-backoff at stop are
/// abandoned. Their handles resolve at once with
/// [`WorkerErrorKind::HandleDropped`] instead of running out the caller's
/// bounded wait.
pub struct SerializedWorker<G: TextGenerator + 'static> {
    generator: Arc<G>,
    settings: WorkerSettings,
    budget: PromptBudget,
    metrics: WorkerMetrics,
    running: Option<Running>,
}

struct Running {
    queue: TaskQueue,
    shutdown_tx: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl<G: TextGenerator + 'static> std::fmt::Debug for SerializedWorker<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerializedWorker")
            .field("model", &self.generator.model_name())
            .field("settings", &self.settings)
            .field("running", &self.running.is_some())
            .finish_non_exhaustive()
    }
}

impl<G: TextGenerator + 'static> SerializedWorker<G> {
    /// Creates a stopped worker.
    pub fn new(generator: G, settings: WorkerSettings, budget: PromptBudget) -> Self {
        Self::with_shared(Arc::new(generator), settings, budget)
    }

    /// Creates a stopped worker around a generator the caller keeps a handle to.
    pub fn with_shared(generator: Arc<G>, settings: WorkerSettings, budget: PromptBudget) -> Self {
        Self {
            generator,
            settings,
            budget,
            metrics: WorkerMetrics::new(),
            running: None,
        }
    }

    /// Counters for this worker.
    pub fn metrics(&self) -> &WorkerMetrics {
        &self.metrics
    }

    /// True between `start` and `stop`.
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Producer handle for the running worker.
    pub fn queue(&self) -> Option<TaskQueue> {
        self.running.as_ref().map(|running| running.queue.clone())
    }

    /// Spawn the worker loop on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerErrorKind::AlreadyRunning`] if the loop is already up.
    #[instrument(skip(self), fields(model = %self.generator.model_name()))]
    pub fn start(&mut self) -> Result<TaskQueue, WorkerError> {
        if self.running.is_some() {
            return Err(WorkerError::new(WorkerErrorKind::AlreadyRunning));
        }

        let (queue, receiver) = task_channel(self.metrics.clone());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let worker_loop = WorkerLoop {
            generator: Arc::clone(&self.generator),
            settings: self.settings,
            budget: self.budget,
            metrics: self.metrics.clone(),
            receiver,
            shutdown: shutdown_rx,
        };
        let join = tokio::spawn(worker_loop.run());

        self.running = Some(Running {
            queue: queue.clone(),
            shutdown_tx,
            join,
        });
        Ok(queue)
    }

    /// Signal the loop to stop and wait for it to exit.
    ///
    /// Interrupts a blocked dequeue, an in-flight task and any backoff or
    /// pacing sleep. Later submissions fail with `QueueClosed`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerErrorKind::NotRunning`] if the worker was not started,
    /// or [`WorkerErrorKind::Internal`] if the loop task itself failed.
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> Result<(), WorkerError> {
        let running = self
            .running
            .take()
            .ok_or_else(|| WorkerError::new(WorkerErrorKind::NotRunning))?;

        // The loop may already be gone; a closed channel is fine.
        let _ = running.shutdown_tx.send(true);
        running
            .join
            .await
            .map_err(|e| WorkerError::new(WorkerErrorKind::Internal(e.to_string())))
    }
}

struct WorkerLoop<G: TextGenerator + ?Sized> {
    generator: Arc<G>,
    settings: WorkerSettings,
    budget: PromptBudget,
    metrics: WorkerMetrics,
    receiver: TaskReceiver,
    shutdown: watch::Receiver<bool>,
}

impl<G: TextGenerator + ?Sized> WorkerLoop<G> {
    async fn run(mut self) {
        info!(
            pacing_delay_ms = self.settings.pacing_delay_ms,
            max_attempts = self.settings.max_attempts,
            "Serialized worker started"
        );

        loop {
            let QueuedTask { task, completer } = tokio::select! {
                biased;
                _ = shutdown_signalled(&mut self.shutdown) => break,
                next = self.receiver.dequeue() => match next {
                    Some(queued) => queued,
                    None => break,
                },
            };

            let kind = task.kind();
            debug!(kind = %kind, "Dequeued task");

            let result = tokio::select! {
                biased;
                _ = shutdown_signalled(&mut self.shutdown) => {
                    info!(kind = %kind, "Abandoning in-flight task");
                    break;
                }
                result = execute_task(
                    &*self.generator,
                    &task,
                    &self.settings,
                    &self.budget,
                    &self.metrics,
                ) => result,
            };

            let observed = completer.complete(result);
            self.metrics.record_completed(observed);
            if !observed {
                debug!(kind = %kind, "Task completed after its caller stopped waiting");
            }

            tokio::select! {
                biased;
                _ = shutdown_signalled(&mut self.shutdown) => break,
                _ = tokio::time::sleep(self.settings.pacing_delay()) => {}
            }
        }

        info!("Serialized worker stopped");
    }
}

/// Resolves once stop was requested or the controlling worker was dropped.
async fn shutdown_signalled(shutdown: &mut watch::Receiver<bool>) {
    // Err means the sender is gone, which also means stop.
    let _ = shutdown.wait_for(|stop| *stop).await;
}

/// Single dispatch point over task variants. Panics become exceptional completions.
async fn execute_task<G: TextGenerator + ?Sized>(
    generator: &G,
    task: &Task,
    settings: &WorkerSettings,
    budget: &PromptBudget,
    metrics: &WorkerMetrics,
) -> TaskResult {
    let kind = task.kind();
    let prompt = build_prompt(task, budget);

    match AssertUnwindSafe(execute_with_retry(generator, kind, &prompt, settings, metrics))
        .catch_unwind()
        .await
    {
        Ok(text) => Ok(text),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!(kind = %kind, error = %message, "Internal fault while executing task");
            metrics.record_internal_fault();
            Err(WorkerError::new(WorkerErrorKind::Internal(message)))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "task panicked".to_string()
    }
}
