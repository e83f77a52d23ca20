//! Test utilities for worker tests.
//!
//! This module provides a scripted stand-in for the upstream API.

pub mod mock_generator;

#[allow(unused_imports)]
pub use mock_generator::{MockCall, MockGenerator, MockResponse};

use cadence_rate_limit::WorkerSettings;

/// Worker settings with the production retry policy and a custom pacing delay.
#[allow(dead_code)]
pub fn settings_with_pacing(pacing_delay_ms: u64) -> WorkerSettings {
    WorkerSettings {
        pacing_delay_ms,
        ..WorkerSettings::default()
    }
}
