//! Core data types for the Cadence service.
//!
//! This crate holds the units of work that flow through the serialized
//! worker, plus the stateless text transformations around them: building
//! the upstream prompt for a task and scanning CV text for known skills.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod prompt;
mod question_type;
mod skills;
mod task;

pub use prompt::{PromptBudget, PromptBudgetBuilder, TRUNCATION_MARKER, build_prompt, truncate_chars};
pub use question_type::QuestionType;
pub use skills::{SKILL_VOCABULARY, extract_skills};
pub use task::{
    CodeAnalysisTask, QuestionGenerationTask, QuestionGenerationTaskBuilder,
    QuestionGenerationTaskBuilderError, Task, TaskKind,
};
