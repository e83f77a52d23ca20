//! Task queue and serialized worker.
//!
//! Callers submit [`Task`](cadence_core::Task)s to a [`TaskQueue`] and get a
//! [`ResultHandle`] back. One [`SerializedWorker`] drains the queue in FIFO
//! order, makes at most one upstream call at a time, retries rate-limited
//! calls after a backoff derived from the upstream message, and pauses for a
//! fixed pacing delay after every task.
//!
//! # Example
//!
//! ```no_run
//! use cadence_core::{CodeAnalysisTask, PromptBudget};
//! use cadence_models::GeminiClient;
//! use cadence_rate_limit::CadenceConfig;
//! use cadence_worker::SerializedWorker;
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CadenceConfig::load()?;
//! let client = GeminiClient::from_settings(&config.gemini)?;
//! let mut worker = SerializedWorker::new(client, config.worker, PromptBudget::default());
//! let queue = worker.start()?;
//!
//! let handle = queue.submit(CodeAnalysisTask::new("fn main() {}").into())?;
//! let text = handle.wait_timeout(Duration::from_secs(60)).await?;
//! println!("{}", text);
//!
//! worker.stop().await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod handle;
mod metrics;
mod queue;
mod retry;
mod worker;

pub use handle::{ResultHandle, TaskResult};
pub use metrics::{WorkerMetrics, WorkerMetricsSnapshot};
pub use queue::TaskQueue;
pub use retry::{execute_with_retry, exhausted_payload, failure_payload};
pub use worker::SerializedWorker;
