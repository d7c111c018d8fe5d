use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn default_num_questions() -> usize {
    5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Question {
    #[schema(example = "1")]
    pub id: String,
    #[schema(example = "Which organelle produces most of the cell's ATP?")]
    pub question: String,
    #[schema(example = json!(["Nucleus", "Mitochondrion", "Ribosome", "Golgi apparatus"]))]
    pub options: Vec<String>,
    #[schema(example = 1, minimum = 0, maximum = 3)]
    pub correct_answer: usize,
    #[schema(example = "Mitochondria carry out cellular respiration, which produces ATP.")]
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Quiz {
    #[schema(example = "5b0c6d1e-8f2a-4c3b-9d4e-1a2b3c4d5e6f")]
    pub id: String,
    pub questions: Vec<Question>,
}

impl Quiz {
    /// Wraps parsed questions under a freshly minted id.
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            questions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnswerResult {
    pub correct: bool,
    pub explanation: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct QuizRequest {
    #[schema(example = "Photosynthesis converts light energy into chemical energy stored in glucose...")]
    pub text: String,
    #[serde(default = "default_num_questions")]
    #[schema(example = 5, minimum = 1, maximum = 20)]
    pub num_questions: usize,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckAnswerRequest {
    #[schema(example = "5b0c6d1e-8f2a-4c3b-9d4e-1a2b3c4d5e6f")]
    pub quiz_id: String,
    #[schema(example = "1")]
    pub question_id: String,
    #[schema(example = 1)]
    pub answer: usize,
}
