//! HTTP surface for Cadence.
//!
//! Every upstream-backed endpoint follows the same path: take a permit from
//! its [`AdmissionGate`](cadence_rate_limit::AdmissionGate) or answer 429,
//! submit a task, wait for its result for a bounded time or answer 408, and
//! release the permit on every path.
//!
//! | Route | Gate | Body |
//! |---|---|---|
//! | `POST /generate` | generation | JSON [`GenerateRequest`] |
//! | `POST /upload` | generation | JSON [`UploadRequest`] |
//! | `POST /analyze-code` | analysis | plain-text code |
//! | `POST /analyze` | none | plain-text CV, returns matched skills |
//! | `GET /health` | none | |
//! | `GET /metrics` | none | |

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod handlers;
mod routes;
mod server;
mod state;

pub use error::ApiError;
pub use handlers::{GateStatus, GenerateRequest, MetricsResponse, UploadRequest};
pub use routes::create_router;
pub use server::{bind, serve};
pub use state::AppState;
