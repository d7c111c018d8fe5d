//! Process-lifetime quiz store.
//!
//! Quizzes are never evicted and the map is unbounded; a restart drops them all.
//! Swap the backing map for an external keyed store if several instances must
//! share quizzes; `put`/`get`/`check_answer` stay the same.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, warn};
use parking_lot::RwLock;

use super::models::{AnswerResult, Quiz};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Quiz not found")]
    QuizNotFound(String),
    #[error("Question not found")]
    QuestionNotFound { quiz_id: String, question_id: String },
}

#[derive(Clone, Default)]
pub struct QuizRegistry {
    quizzes: Arc<RwLock<HashMap<String, Quiz>>>,
}

impl QuizRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, quiz: Quiz) {
        let id = quiz.id.clone();
        let question_count = quiz.questions.len();
        if self.quizzes.write().insert(id.clone(), quiz).is_some() {
            warn!("Quiz {} replaced an existing quiz with the same id", id);
        }
        debug!("Stored quiz {} with {} questions", id, question_count);
    }

    pub fn get(&self, quiz_id: &str) -> Result<Quiz, RegistryError> {
        self.quizzes
            .read()
            .get(quiz_id)
            .cloned()
            .ok_or_else(|| RegistryError::QuizNotFound(quiz_id.to_string()))
    }

    /// Grades `answer`; the explanation is returned whether or not it is correct.
    pub fn check_answer(
        &self,
        quiz_id: &str,
        question_id: &str,
        answer: usize,
    ) -> Result<AnswerResult, RegistryError> {
        let quizzes = self.quizzes.read();
        let quiz = quizzes
            .get(quiz_id)
            .ok_or_else(|| RegistryError::QuizNotFound(quiz_id.to_string()))?;

        // first match wins
        let question = quiz
            .questions
            .iter()
            .find(|question| question.id == question_id)
            .ok_or_else(|| RegistryError::QuestionNotFound {
                quiz_id: quiz_id.to_string(),
                question_id: question_id.to_string(),
            })?;

        Ok(AnswerResult {
            correct: answer == question.correct_answer,
            explanation: question.explanation.clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.quizzes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.quizzes.read().is_empty()
    }
}
