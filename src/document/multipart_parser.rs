use actix_multipart::Multipart;
use actix_web::HttpResponse;
use futures::StreamExt;
use sanitize_filename::sanitize;

use crate::ErrorResponse;

/// Upper bound for a single uploaded document.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug)]
pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum MultipartParseError {
    #[error("Multipart field error: {0}")]
    FieldError(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("No file was uploaded")]
    MissingFile,
    #[error("File exceeds the {0} byte upload limit")]
    TooLarge(usize),
}

impl From<MultipartParseError> for HttpResponse {
    fn from(error: MultipartParseError) -> Self {
        match error {
            MultipartParseError::FieldError(_) | MultipartParseError::MissingFile => {
                HttpResponse::BadRequest().json(ErrorResponse::bad_request(&error.to_string()))
            }
            MultipartParseError::TooLarge(_) => HttpResponse::PayloadTooLarge()
                .json(ErrorResponse::new("PayloadTooLarge", &error.to_string())),
            MultipartParseError::IoError(_) => HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error(&error.to_string())),
        }
    }
}

pub struct MultipartParser;

impl MultipartParser {
    /// Reads the `file` field of an upload. Other fields are skipped.
    pub async fn parse_document_upload(
        mut multipart: Multipart,
    ) -> Result<UploadedFile, MultipartParseError> {
        let mut uploaded: Option<UploadedFile> = None;

        while let Some(item) = multipart.next().await {
            let mut field = item.map_err(|e| MultipartParseError::FieldError(e.to_string()))?;
            let content_disposition = field
                .content_disposition()
                .ok_or_else(|| MultipartParseError::FieldError("Content disposition not found".to_string()))?;
            let field_name = content_disposition
                .get_name()
                .ok_or_else(|| MultipartParseError::FieldError("Field name not found".to_string()))?;

            if field_name != "file" {
                continue;
            }

            let filename = content_disposition
                .get_filename()
                .map(sanitize)
                .filter(|name| !name.is_empty())
                .ok_or_else(|| MultipartParseError::FieldError("No filename in file field".to_string()))?;

            let mut data = Vec::new();
            while let Some(chunk) = field.next().await {
                let chunk = chunk.map_err(|e| MultipartParseError::IoError(e.to_string()))?;
                if data.len() + chunk.len() > MAX_UPLOAD_BYTES {
                    return Err(MultipartParseError::TooLarge(MAX_UPLOAD_BYTES));
                }
                data.extend_from_slice(&chunk);
            }

            uploaded = Some(UploadedFile { filename, data });
        }

        uploaded.ok_or(MultipartParseError::MissingFile)
    }
}
