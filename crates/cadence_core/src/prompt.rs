//! Prompt construction for upstream generation calls.

use crate::{CodeAnalysisTask, QuestionGenerationTask, Task};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Appended to any free-text field cut down to its budget.
pub const TRUNCATION_MARKER: &str = "... [truncated]";

/// Character budgets for the free-text fields of a prompt.
///
/// Long CVs and job descriptions are cut so the prompt stays well under the
/// upstream token limits.
///
/// # Examples
///
/// ```
/// use cadence_core::PromptBudget;
///
/// let budget = PromptBudget::default();
/// assert_eq!(*budget.cv_chars(), 4000);
/// assert_eq!(*budget.job_description_chars(), 3000);
///
/// let tight = PromptBudget::builder().cv_chars(100).build();
/// assert_eq!(*tight.cv_chars(), 100);
/// assert_eq!(*tight.job_description_chars(), 3000);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters,
)]
pub struct PromptBudget {
    /// Maximum characters of CV text kept in the prompt
    #[serde(default = "default_cv_chars")]
    cv_chars: usize,
    /// Maximum characters of job description kept in the prompt
    #[serde(default = "default_job_description_chars")]
    job_description_chars: usize,
}

fn default_cv_chars() -> usize {
    4000
}

fn default_job_description_chars() -> usize {
    3000
}

impl Default for PromptBudget {
    fn default() -> Self {
        Self {
            cv_chars: default_cv_chars(),
            job_description_chars: default_job_description_chars(),
        }
    }
}

impl PromptBudget {
    /// Creates a new budget builder.
    pub fn builder() -> PromptBudgetBuilder {
        PromptBudgetBuilder::default()
    }
}

/// Builder for `PromptBudget`.
#[derive(Debug, Default)]
pub struct PromptBudgetBuilder {
    cv_chars: Option<usize>,
    job_description_chars: Option<usize>,
}

impl PromptBudgetBuilder {
    /// Sets the CV character budget.
    pub fn cv_chars(mut self, value: usize) -> Self {
        self.cv_chars = Some(value);
        self
    }

    /// Sets the job description character budget.
    pub fn job_description_chars(mut self, value: usize) -> Self {
        self.job_description_chars = Some(value);
        self
    }

    /// Builds the budget, using defaults for unset fields.
    pub fn build(self) -> PromptBudget {
        PromptBudget {
            cv_chars: self.cv_chars.unwrap_or_else(default_cv_chars),
            job_description_chars: self
                .job_description_chars
                .unwrap_or_else(default_job_description_chars),
        }
    }
}

/// Cut `text` to at most `budget` characters, marking the cut.
///
/// Counts `char`s, so a multi-byte code point is never split. Text within
/// budget is returned borrowed and untouched.
///
/// # Examples
///
/// ```
/// use cadence_core::truncate_chars;
///
/// assert_eq!(truncate_chars("short", 10), "short");
/// assert_eq!(truncate_chars("abcdef", 3), "abc... [truncated]");
/// assert_eq!(truncate_chars("héllo", 2), "hé... [truncated]");
/// ```
pub fn truncate_chars(text: &str, budget: usize) -> Cow<'_, str> {
    match text.char_indices().nth(budget) {
        Some((cut, _)) => Cow::Owned(format!("{}{}", &text[..cut], TRUNCATION_MARKER)),
        None => Cow::Borrowed(text),
    }
}

/// Render the single prompt string sent upstream for `task`.
pub fn build_prompt(task: &Task, budget: &PromptBudget) -> String {
    match task {
        Task::QuestionGeneration(task) => question_prompt(task, budget),
        Task::CodeAnalysis(task) => code_analysis_prompt(task),
    }
}

fn question_prompt(task: &QuestionGenerationTask, budget: &PromptBudget) -> String {
    let skills = if task.selected_skills().is_empty() {
        "Focus on the skills mentioned in the CV. ".to_string()
    } else {
        format!(
            "Focus ONLY on the following technical skills: {}. ",
            task.selected_skills().join(", ")
        )
    };

    let job_description = match task.job_description().as_deref() {
        Some(jd) if !jd.trim().is_empty() => format!(
            "Tailor the questions to this job description: {}\n",
            truncate_chars(jd, *budget.job_description_chars())
        ),
        _ => String::new(),
    };

    format!(
        "Generate 10 technical interview questions for a {} candidate. {}{}{}Use the candidate's CV context where relevant: {}",
        task.experience_level(),
        skills,
        task.question_type().instruction(),
        job_description,
        truncate_chars(task.cv_text(), *budget.cv_chars()),
    )
}

fn code_analysis_prompt(task: &CodeAnalysisTask) -> String {
    format!(
        "Analyze the following code. Explain what it does, point out bugs or risky \
         constructs, and suggest concrete improvements.\n\n{}",
        task.code()
    )
}
