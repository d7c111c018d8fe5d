use log::{debug, error, info};

use super::models::{AnswerResult, Quiz};
use super::registry::QuizRegistry;
use crate::error::ApiError;
use crate::llm::{prompts, TextGenerator};
use crate::parser::parse_quiz_questions;
use crate::validation::{require_question_count, require_source_text};

/// Generates a quiz from study text and stores it for later answer checks.
pub async fn generate_quiz(
    generator: &dyn TextGenerator,
    registry: &QuizRegistry,
    text: &str,
    num_questions: usize,
) -> Result<Quiz, ApiError> {
    require_source_text(text, "quiz generation")?;
    require_question_count(num_questions)?;

    let response = generator
        .generate(&prompts::quiz_prompt(text, num_questions))
        .await?;
    debug!("Quiz response received ({} characters)", response.len());

    let questions = parse_quiz_questions(&response).map_err(|e| {
        error!(
            "Could not parse quiz response: {}. Response start: {:?}",
            e,
            response.chars().take(200).collect::<String>()
        );
        e
    })?;

    if questions.len() != num_questions {
        debug!(
            "Model returned {} questions, {} were requested",
            questions.len(),
            num_questions
        );
    }

    let quiz = Quiz::new(questions);
    registry.put(quiz.clone());
    info!("Generated quiz {} with {} questions", quiz.id, quiz.questions.len());
    Ok(quiz)
}

pub fn check_answer(
    registry: &QuizRegistry,
    quiz_id: &str,
    question_id: &str,
    answer: usize,
) -> Result<AnswerResult, ApiError> {
    Ok(registry.check_answer(quiz_id, question_id, answer)?)
}

pub fn get_quiz(registry: &QuizRegistry, quiz_id: &str) -> Result<Quiz, ApiError> {
    Ok(registry.get(quiz_id)?)
}
