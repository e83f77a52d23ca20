//! Error types for the Cadence service.
//!
//! This crate provides the foundation error types used throughout the Cadence workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use cadence_error::{CadenceResult, GeminiError, GeminiErrorKind};
//!
//! fn call_upstream() -> CadenceResult<String> {
//!     Err(GeminiError::new(GeminiErrorKind::MissingApiKey))?
//! }
//!
//! match call_upstream() {
//!     Ok(text) => println!("Got: {}", text),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod gemini;
mod server;
mod worker;

pub use config::ConfigError;
pub use error::{CadenceError, CadenceErrorKind, CadenceResult};
pub use gemini::{GeminiError, GeminiErrorKind};
pub use server::{ServerError, ServerErrorKind};
pub use worker::{WorkerError, WorkerErrorKind};
