//! Shared handler state.

use cadence_rate_limit::{AdmissionGate, GateSettings, RateLimitError};
use cadence_worker::TaskQueue;
use std::time::Duration;

/// Queue, gates and wait bound shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    queue: TaskQueue,
    generation_gate: AdmissionGate,
    analysis_gate: AdmissionGate,
    wait_timeout: Duration,
}

impl AppState {
    /// Build state with one gate per gated entry point.
    ///
    /// # Errors
    ///
    /// Fails if either configured capacity is unusable.
    pub fn new(
        queue: TaskQueue,
        gates: &GateSettings,
        wait_timeout: Duration,
    ) -> Result<Self, RateLimitError> {
        Ok(Self::with_gates(
            queue,
            AdmissionGate::new("generation", gates.generation)?,
            AdmissionGate::new("analysis", gates.analysis)?,
            wait_timeout,
        ))
    }

    /// Build state from existing gates.
    pub fn with_gates(
        queue: TaskQueue,
        generation_gate: AdmissionGate,
        analysis_gate: AdmissionGate,
        wait_timeout: Duration,
    ) -> Self {
        Self {
            queue,
            generation_gate,
            analysis_gate,
            wait_timeout,
        }
    }

    /// Queue feeding the serialized worker.
    pub fn queue(&self) -> &TaskQueue {
        &self.queue
    }

    /// Gate in front of question generation.
    pub fn generation_gate(&self) -> &AdmissionGate {
        &self.generation_gate
    }

    /// Gate in front of code analysis.
    pub fn analysis_gate(&self) -> &AdmissionGate {
        &self.analysis_gate
    }

    /// How long a caller waits for its result.
    pub fn wait_timeout(&self) -> Duration {
        self.wait_timeout
    }
}
