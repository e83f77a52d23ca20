//! Units of work submitted to the serialized worker.

use crate::QuestionType;
use serde::{Deserialize, Serialize};

/// Generate interview questions from a candidate's CV text.
///
/// # Examples
///
/// ```
/// use cadence_core::{QuestionGenerationTask, QuestionType};
///
/// let task = QuestionGenerationTask::builder()
///     .cv_text("Five years of Rust and Kafka.")
///     .experience_level("Senior")
///     .question_type(QuestionType::Programming)
///     .selected_skills(vec!["Kafka".to_string()])
///     .build()
///     .unwrap();
///
/// assert_eq!(task.experience_level(), "Senior");
/// assert!(task.job_description().is_none());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct QuestionGenerationTask {
    /// Extracted CV text
    cv_text: String,
    /// Experience level label, e.g. "Junior" or "Senior"
    experience_level: String,
    /// Requested question flavour
    #[builder(default)]
    #[serde(default)]
    question_type: QuestionType,
    /// Skills to focus on; empty means "whatever the CV mentions"
    #[builder(default)]
    #[serde(default)]
    selected_skills: Vec<String>,
    /// Optional job description to tailor the questions to
    #[builder(default)]
    #[serde(default)]
    job_description: Option<String>,
}

impl QuestionGenerationTask {
    /// Creates a task from every field at once.
    pub fn new(
        cv_text: impl Into<String>,
        experience_level: impl Into<String>,
        question_type: QuestionType,
        selected_skills: Vec<String>,
        job_description: Option<String>,
    ) -> Self {
        Self {
            cv_text: cv_text.into(),
            experience_level: experience_level.into(),
            question_type,
            selected_skills,
            job_description,
        }
    }

    /// Creates a new builder.
    pub fn builder() -> QuestionGenerationTaskBuilder {
        QuestionGenerationTaskBuilder::default()
    }
}

/// Review a raw code snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct CodeAnalysisTask {
    /// The snippet, verbatim
    code: String,
}

impl CodeAnalysisTask {
    /// Wraps a snippet.
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

/// A unit of work for the upstream generation API.
///
/// Tasks carry no identity of their own. Two structurally equal tasks are
/// still two separate executions.
///
/// # Examples
///
/// ```
/// use cadence_core::{CodeAnalysisTask, Task, TaskKind};
///
/// let task: Task = CodeAnalysisTask::new("fn main() {}").into();
/// assert_eq!(task.kind(), TaskKind::CodeAnalysis);
/// assert_eq!(task.kind().to_string(), "code_analysis");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::From)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Task {
    /// Interview question generation
    QuestionGeneration(QuestionGenerationTask),
    /// Code snippet analysis
    CodeAnalysis(CodeAnalysisTask),
}

impl Task {
    /// Discriminant used for logging and metrics.
    pub fn kind(&self) -> TaskKind {
        match self {
            Task::QuestionGeneration(_) => TaskKind::QuestionGeneration,
            Task::CodeAnalysis(_) => TaskKind::CodeAnalysis,
        }
    }
}

/// Field-less mirror of [`Task`]'s variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum TaskKind {
    /// See [`Task::QuestionGeneration`]
    QuestionGeneration,
    /// See [`Task::CodeAnalysis`]
    CodeAnalysis,
}
