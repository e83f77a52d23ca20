//! Request handlers.

use crate::{ApiError, AppState};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use cadence_core::{
    CodeAnalysisTask, QuestionGenerationTask, QuestionType, Task, extract_skills,
};
use cadence_rate_limit::AdmissionGate;
use cadence_worker::WorkerMetricsSnapshot;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, instrument};

/// Body of `POST /generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Extracted CV text
    #[serde(alias = "cvText")]
    pub cv_text: String,
    /// Experience level label
    #[serde(alias = "experienceLevel")]
    pub experience_level: String,
    /// `Programming`, `Theoretical` or `Mixed`; anything else means `Mixed`
    #[serde(default, alias = "questionType")]
    pub question_type: Option<String>,
    /// Skills to focus on
    #[serde(default, alias = "selectedSkills")]
    pub selected_skills: Option<Vec<String>>,
    /// Job description to tailor the questions to
    #[serde(default, alias = "jobDescription")]
    pub job_description: Option<String>,
}

impl GenerateRequest {
    fn into_task(self) -> Task {
        let question_type = self
            .question_type
            .as_deref()
            .map(QuestionType::from_label)
            .unwrap_or_default();
        let job_description = self
            .job_description
            .filter(|description| !description.trim().is_empty());

        Task::QuestionGeneration(QuestionGenerationTask::new(
            self.cv_text,
            self.experience_level,
            question_type,
            self.selected_skills.unwrap_or_default(),
            job_description,
        ))
    }
}

/// Body of the legacy `POST /upload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRequest {
    /// Extracted CV text
    #[serde(alias = "cvText")]
    pub cv_text: String,
    /// Experience level label
    #[serde(alias = "experienceLevel")]
    pub experience_level: String,
}

impl From<UploadRequest> for GenerateRequest {
    fn from(request: UploadRequest) -> Self {
        Self {
            cv_text: request.cv_text,
            experience_level: request.experience_level,
            question_type: Some(QuestionType::Mixed.to_string()),
            selected_skills: None,
            job_description: None,
        }
    }
}

/// One gate's state in `GET /metrics`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateStatus {
    /// Gate name
    pub name: String,
    /// Total permits
    pub capacity: usize,
    /// Permits not currently held
    pub available: usize,
}

impl From<&AdmissionGate> for GateStatus {
    fn from(gate: &AdmissionGate) -> Self {
        Self {
            name: gate.name().to_string(),
            capacity: gate.capacity(),
            available: gate.available(),
        }
    }
}

/// Body of `GET /metrics`.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsResponse {
    /// Worker counters
    pub worker: WorkerMetricsSnapshot,
    /// Tasks waiting to be dequeued
    pub queue_depth: usize,
    /// Admission gates
    pub gates: Vec<GateStatus>,
}

/// Take a permit, submit, wait, release.
///
/// The permit is held until the wait ends, whatever the outcome.
async fn run_gated(state: &AppState, gate: &AdmissionGate, task: Task) -> Result<String, ApiError> {
    let kind = task.kind();
    let permit = gate.try_enter().map_err(ApiError::Refused)?;

    let result = match state.queue().submit(task) {
        Ok(handle) => handle.wait_timeout(state.wait_timeout()).await,
        Err(error) => Err(error),
    };
    permit.exit();

    result.map_err(|error| ApiError::Worker { task: kind, error })
}

/// `POST /generate`
#[instrument(skip_all, fields(experience_level = %request.experience_level))]
pub(crate) async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<String, ApiError> {
    debug!(cv_chars = request.cv_text.chars().count(), "Question generation requested");
    run_gated(&state, state.generation_gate(), request.into_task()).await
}

/// `POST /upload`
#[instrument(skip_all)]
pub(crate) async fn upload(
    State(state): State<AppState>,
    Json(request): Json<UploadRequest>,
) -> Result<String, ApiError> {
    let request = GenerateRequest::from(request);
    run_gated(&state, state.generation_gate(), request.into_task()).await
}

/// `POST /analyze-code`
#[instrument(skip_all, fields(code_chars = code.chars().count()))]
pub(crate) async fn analyze_code(
    State(state): State<AppState>,
    code: String,
) -> Result<String, ApiError> {
    run_gated(
        &state,
        state.analysis_gate(),
        CodeAnalysisTask::new(code).into(),
    )
    .await
}

/// `POST /analyze`
#[instrument(skip_all)]
pub(crate) async fn analyze(cv_text: String) -> Json<Vec<&'static str>> {
    let skills = extract_skills(&cv_text);
    info!(skills = ?skills, "Extracted skills");
    Json(skills)
}

/// `GET /health`
pub(crate) async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// `GET /metrics`
pub(crate) async fn get_metrics(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = MetricsResponse {
        worker: state.queue().metrics().snapshot(),
        queue_depth: state.queue().depth(),
        gates: vec![
            GateStatus::from(state.generation_gate()),
            GateStatus::from(state.analysis_gate()),
        ],
    };
    (StatusCode::OK, Json(snapshot))
}
