//! Test utilities for API tests: a stand-in generator and a served app.

use async_trait::async_trait;
use cadence_core::PromptBudget;
use cadence_error::{GeminiError, GeminiErrorKind};
use cadence_models::{GeminiResult, TextGenerator};
use cadence_rate_limit::{AdmissionGate, WorkerSettings};
use cadence_server::{AppState, create_router, serve};
use cadence_worker::{SerializedWorker, TaskQueue};
use std::time::Duration;
use tokio::sync::oneshot;

/// Echoes the prompt after a fixed latency, or fails with a 403.
#[derive(Debug)]
pub struct EchoGenerator {
    latency: Duration,
    fail: bool,
}

#[allow(dead_code)]
impl EchoGenerator {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            latency: Duration::ZERO,
            fail: true,
        }
    }
}

#[async_trait]
impl TextGenerator for EchoGenerator {
    async fn generate(&self, prompt: &str) -> GeminiResult<String> {
        tokio::time::sleep(self.latency).await;
        if self.fail {
            return Err(GeminiError::new(GeminiErrorKind::HttpError {
                status_code: 403,
                message: "API key not valid".to_string(),
            }));
        }
        Ok(prompt.to_string())
    }

    fn model_name(&self) -> &str {
        "echo"
    }
}

/// A running worker plus the API served on an ephemeral port.
pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
    pub worker: SerializedWorker<EchoGenerator>,
    pub queue: TaskQueue,
    shutdown: Option<oneshot::Sender<()>>,
}

#[allow(dead_code)]
impl TestApp {
    /// Spawn with the given gate capacities and caller wait bound. No pacing.
    pub async fn spawn(
        generator: EchoGenerator,
        generation: usize,
        analysis: usize,
        wait_timeout: Duration,
    ) -> anyhow::Result<Self> {
        let settings = WorkerSettings {
            pacing_delay_ms: 0,
            ..WorkerSettings::default()
        };
        let mut worker = SerializedWorker::new(generator, settings, PromptBudget::default());
        let queue = worker.start()?;

        let state = AppState::with_gates(
            queue.clone(),
            AdmissionGate::new("generation", generation)?,
            AdmissionGate::new("analysis", analysis)?,
            wait_timeout,
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(serve(listener, create_router(state), async move {
            let _ = rx.await;
        }));

        Ok(Self {
            base_url: format!("http://{}", addr),
            client: reqwest::Client::new(),
            worker,
            queue,
            shutdown: Some(tx),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn metrics(&self) -> anyhow::Result<serde_json::Value> {
        Ok(self
            .client
            .get(self.url("/metrics"))
            .send()
            .await?
            .json()
            .await?)
    }

    pub async fn shutdown(mut self) -> anyhow::Result<()> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if self.worker.is_running() {
            self.worker.stop().await?;
        }
        Ok(())
    }
}
