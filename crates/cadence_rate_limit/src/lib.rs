//! Admission control and rate-limit recovery.
//!
//! This crate holds the pieces that keep callers from overwhelming the
//! service and keep the service from overwhelming the upstream API:
//!
//! - [`AdmissionGate`]: a fixed-capacity permit pool that refuses excess
//!   callers immediately instead of queueing them
//! - [`BackoffPolicy`]: turns an upstream rate-limit message into a wait
//! - [`CadenceConfig`]: layered TOML/environment configuration for the
//!   whole service

mod backoff;
mod config;
mod error;
mod gate;

pub use backoff::{BackoffPolicy, parse_delay};
pub use config::{
    CadenceConfig, GateSettings, GeminiSettings, LoggingSettings, ServerSettings, WorkerSettings,
};
pub use error::{RateLimitError, RateLimitErrorKind};
pub use gate::{AdmissionGate, AdmissionPermit};
