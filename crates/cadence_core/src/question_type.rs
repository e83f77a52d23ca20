//! Question type labels for generation tasks.

use serde::{Deserialize, Serialize};

/// Which flavour of interview questions to ask for.
///
/// Labels parse case-insensitively. Anything unrecognised falls back to
/// [`QuestionType::Mixed`], so a caller can never fail a request on this field.
///
/// # Examples
///
/// ```
/// use cadence_core::QuestionType;
///
/// assert_eq!(QuestionType::from_label("programming"), QuestionType::Programming);
/// assert_eq!(QuestionType::from_label("THEORETICAL"), QuestionType::Theoretical);
/// assert_eq!(QuestionType::from_label("whatever"), QuestionType::Mixed);
/// assert_eq!(format!("{}", QuestionType::Programming), "Programming");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum QuestionType {
    /// Practical coding questions only
    Programming,
    /// Conceptual questions only
    Theoretical,
    /// A mix of both
    #[default]
    Mixed,
}

impl QuestionType {
    /// Parse a label leniently, defaulting to `Mixed`.
    pub fn from_label(label: &str) -> Self {
        label.trim().parse().unwrap_or_default()
    }

    /// The sentence that steers the model toward this question type.
    pub fn instruction(&self) -> &'static str {
        match self {
            QuestionType::Programming => "Generate ONLY practical coding/programming questions. ",
            QuestionType::Theoretical => "Generate ONLY theoretical/conceptual questions. ",
            QuestionType::Mixed => "Generate a mix of theoretical and practical questions. ",
        }
    }
}
