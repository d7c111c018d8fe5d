#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use async_trait::async_trait;
use futures::stream;
use parking_lot::Mutex;
use serde_json::json;

use study_assistant_server::llm::{GenerationError, TextGenerator, TextStream};
use study_assistant_server::AppState;

/// Study text long enough to pass the minimum-length check.
pub const STUDY_TEXT: &str = "Photosynthesis converts light energy into chemical energy. \
    The light reactions in the thylakoid membranes produce ATP and NADPH, \
    which the Calvin cycle then uses to fix carbon dioxide into glucose.";

/// Scripted generator: replays one canned reply and one canned stream, and
/// records every prompt it receives.
pub struct MockTextGenerator {
    reply: Result<String, GenerationError>,
    stream: Result<Vec<Result<String, GenerationError>>, GenerationError>,
    prompts: Mutex<Vec<String>>,
}

impl MockTextGenerator {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            stream: Ok(vec![Ok(text.to_string())]),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn streaming(chunks: Vec<Result<String, GenerationError>>) -> Self {
        Self {
            reply: Ok(String::new()),
            stream: Ok(chunks),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: GenerationError) -> Self {
        Self {
            reply: Err(error.clone()),
            stream: Err(error),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().push(prompt.to_string());
        self.reply.clone()
    }

    async fn generate_stream(&self, prompt: &str) -> Result<TextStream, GenerationError> {
        self.prompts.lock().push(prompt.to_string());
        let chunks = self.stream.clone()?;
        Ok(Box::pin(stream::iter(chunks)))
    }
}

pub fn app_state(generator: Arc<MockTextGenerator>) -> web::Data<AppState> {
    web::Data::new(AppState::new(generator))
}

/// A well-formed model reply for a quiz of `count` questions.
pub fn quiz_reply(count: usize) -> String {
    let questions: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            json!({
                "question": format!("Question {} about photosynthesis?", i + 1),
                "options": ["ATP", "Glucose", "Oxygen", "Water"],
                "correctAnswer": i % 4,
                "explanation": format!("Explanation for question {}", i + 1)
            })
        })
        .collect();
    format!("Here is your quiz:\n{}", serde_json::Value::Array(questions))
}

/// Builds a single-part `multipart/form-data` body. Returns the content type and the body.
pub fn multipart_body(field: &str, filename: &str, data: &[u8]) -> (String, Vec<u8>) {
    let boundary = "----study-assistant-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    (format!("multipart/form-data; boundary={}", boundary), body)
}
