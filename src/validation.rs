use crate::error::ApiError;

/// Minimum non-whitespace characters for summary and quiz source text.
pub const MIN_SOURCE_CHARS: usize = 50;

pub const MIN_QUESTIONS: usize = 1;
pub const MAX_QUESTIONS: usize = 20;

pub fn significant_chars(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

pub fn require_source_text(text: &str, purpose: &str) -> Result<(), ApiError> {
    if significant_chars(text) < MIN_SOURCE_CHARS {
        return Err(ApiError::invalid_input(format!(
            "Text is too short or empty. Please provide at least {} characters of content for {}.",
            MIN_SOURCE_CHARS, purpose
        )));
    }
    Ok(())
}

pub fn require_question_count(num_questions: usize) -> Result<(), ApiError> {
    if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&num_questions) {
        return Err(ApiError::invalid_input(format!(
            "num_questions must be between {} and {}",
            MIN_QUESTIONS, MAX_QUESTIONS
        )));
    }
    Ok(())
}

pub fn require_non_blank(value: &str, field: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::invalid_input(format!("{} must not be empty", field)));
    }
    Ok(())
}
