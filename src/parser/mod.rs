//! Turns free-form model output into typed application data.
//!
//! Models do not always follow formatting instructions, so both parsers accept
//! small deviations (surrounding prose, bullet styles) but validate every field
//! they hand on.

pub mod quiz;
pub mod summary;


pub use quiz::parse_quiz_questions;
pub use summary::parse_summary;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid response format from AI: {0}")]
    MalformedResponse(String),
    #[error("Question {position} has invalid field '{field}': {reason}")]
    InvalidQuestion {
        position: usize,
        field: &'static str,
        reason: String,
    },
    #[error("AI response contained no {0}")]
    EmptyResult(&'static str),
}
