//! Cadence - a paced front end for a rate-limited text generation API.
//!
//! Callers hit per-endpoint admission gates; admitted requests become tasks
//! on one FIFO queue drained by a single worker that makes one upstream call
//! at a time, backs off when the upstream says "retry in <n>s", and pauses
//! between tasks so the steady-state call rate stays under the limit.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cadence::{CadenceConfig, CodeAnalysisTask, GeminiClient, SerializedWorker};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CadenceConfig::load()?;
//!     let client = GeminiClient::from_settings(&config.gemini)?;
//!
//!     let mut worker = SerializedWorker::new(client, config.worker, config.prompt);
//!     let queue = worker.start()?;
//!
//!     let handle = queue.submit(CodeAnalysisTask::new("fn main() {}").into())?;
//!     println!("{}", handle.wait_timeout(config.server.wait_timeout()).await?);
//!
//!     worker.stop().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `cadence_error` - Error types
//! - `cadence_core` - Task model, prompts, skill vocabulary
//! - `cadence_rate_limit` - Admission gates, backoff, configuration
//! - `cadence_models` - Upstream client and the `TextGenerator` seam
//! - `cadence_worker` - Task queue and serialized worker
//! - `cadence_server` - HTTP surface
//!
//! This crate re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod observability;

pub use observability::{ObservabilityConfig, init_observability, init_observability_with_config};

pub use cadence_error::{
    CadenceError, CadenceErrorKind, CadenceResult, ConfigError, GeminiError, GeminiErrorKind,
    ServerError, ServerErrorKind, WorkerError, WorkerErrorKind,
};

pub use cadence_core::{
    CodeAnalysisTask, PromptBudget, QuestionGenerationTask, QuestionType, SKILL_VOCABULARY,
    TRUNCATION_MARKER, Task, TaskKind, build_prompt, extract_skills, truncate_chars,
};

pub use cadence_rate_limit::{
    AdmissionGate, AdmissionPermit, BackoffPolicy, CadenceConfig, GateSettings, GeminiSettings,
    LoggingSettings, RateLimitError, RateLimitErrorKind, ServerSettings, WorkerSettings,
    parse_delay,
};

pub use cadence_models::{CallOutcome, GeminiClient, GeminiResult, TextGenerator};

pub use cadence_worker::{
    ResultHandle, SerializedWorker, TaskQueue, TaskResult, WorkerMetrics, WorkerMetricsSnapshot,
};

pub use cadence_server::{ApiError, AppState, create_router};
