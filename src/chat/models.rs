use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatMessage {
    #[schema(example = "What does the Calvin cycle produce?")]
    pub content: String,
    #[serde(default)]
    #[schema(example = "Photosynthesis converts light energy into chemical energy...")]
    pub context: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub content: String,
}

/// One server-sent event of a streamed chat reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChatEvent {
    Chunk { content: String },
    Done,
    Error { message: String },
}

impl ChatEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ChatEvent::Chunk { .. })
    }

    /// Encodes the event as an SSE `data:` frame.
    pub fn to_sse_frame(&self) -> String {
        let payload = serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"type":"error","message":"Failed to encode event"}"#.to_string()
        });
        format!("data: {}\n\n", payload)
    }
}
