use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DocumentSummary {
    #[schema(example = json!(["Photosynthesis happens in chloroplasts", "Light reactions produce ATP and NADPH"]))]
    pub quick_notes: Vec<String>,
    #[schema(example = json!(["The Calvin cycle depends on products of the light reactions"]))]
    pub key_takeaways: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SummarizeRequest {
    #[schema(example = "Photosynthesis converts light energy into chemical energy stored in glucose...")]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    #[schema(example = "Chapter 1. Cell structure ...")]
    pub text: String,
    #[schema(example = "biology-notes.pdf")]
    pub filename: String,
}

/// Multipart body of `POST /api/documents/upload`, for the OpenAPI document only.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UploadDocumentRequest {
    #[allow(unused)]
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}
