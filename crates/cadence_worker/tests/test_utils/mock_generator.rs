//! Scripted [`TextGenerator`] that records every call.

use async_trait::async_trait;
use cadence_error::{GeminiError, GeminiErrorKind};
use cadence_models::{GeminiResult, TextGenerator};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// What the mock does on one call.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum MockResponse {
    /// Return this text
    Text(String),
    /// Return the prompt itself
    Echo,
    /// Fail with HTTP 429 carrying this message
    RateLimited(String),
    /// Fail with a non-retryable transport error
    Fatal(String),
    /// Panic with this message
    Panic(String),
}

/// One recorded call.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub prompt: String,
    pub started: Instant,
    pub finished: Instant,
}

/// Replays a script of responses, then repeats a fallback forever.
#[derive(Debug)]
pub struct MockGenerator {
    script: Mutex<VecDeque<MockResponse>>,
    fallback: MockResponse,
    latency: Duration,
    calls: Mutex<Vec<MockCall>>,
}

#[allow(dead_code)]
impl MockGenerator {
    /// Always responds with `fallback`.
    pub fn always(fallback: MockResponse) -> Self {
        Self::scripted(Vec::new(), fallback)
    }

    /// Responds with `script` in order, then `fallback`.
    pub fn scripted(script: Vec<MockResponse>, fallback: MockResponse) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            latency: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Each call takes `latency` before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    fn next_response(&self) -> MockResponse {
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &str) -> GeminiResult<String> {
        let started = Instant::now();
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let response = self.next_response();
        self.calls.lock().unwrap().push(MockCall {
            prompt: prompt.to_string(),
            started,
            finished: Instant::now(),
        });

        match response {
            MockResponse::Text(text) => Ok(text),
            MockResponse::Echo => Ok(prompt.to_string()),
            MockResponse::RateLimited(message) => {
                Err(GeminiError::new(GeminiErrorKind::HttpError {
                    status_code: 429,
                    message,
                }))
            }
            MockResponse::Fatal(message) => {
                Err(GeminiError::new(GeminiErrorKind::ApiRequest(message)))
            }
            MockResponse::Panic(message) => panic!("{}", message),
        }
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
