use std::sync::Arc;

use crate::config::AppConfig;
use crate::llm::{GeminiClient, GenerationError, TextGenerator};
use crate::quiz::QuizRegistry;

/// Shared by every worker through `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn TextGenerator>,
    pub quizzes: QuizRegistry,
}

impl AppState {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            quizzes: QuizRegistry::new(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, GenerationError> {
        let client = GeminiClient::from_config(config)?;
        Ok(Self::new(Arc::new(client)))
    }
}
