//! Plain-text extraction from uploaded PDF and TXT files.

use std::path::Path;
use std::time::Duration;

use log::{debug, info, warn};

const PDF_EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("Unsupported file type '{0}'. Only PDF and TXT files are supported.")]
    UnsupportedFormat(String),
    #[error("{0}")]
    EmptyDocument(&'static str),
    #[error("Invalid text file encoding. Please ensure the file is UTF-8 encoded.")]
    InvalidEncoding,
    #[error("Failed to read PDF file: {0}")]
    UnreadableDocument(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Text,
}

impl DocumentFormat {
    /// Picks the format from the filename suffix, case-insensitively.
    pub fn from_filename(filename: &str) -> Result<Self, DocumentError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("pdf") => Ok(DocumentFormat::Pdf),
            Some("txt") => Ok(DocumentFormat::Text),
            _ => Err(DocumentError::UnsupportedFormat(filename.to_string())),
        }
    }
}

pub async fn extract_text(filename: &str, data: Vec<u8>) -> Result<String, DocumentError> {
    if data.is_empty() {
        return Err(DocumentError::EmptyDocument("Empty file uploaded"));
    }

    match DocumentFormat::from_filename(filename)? {
        DocumentFormat::Pdf => extract_pdf(filename, data).await,
        DocumentFormat::Text => decode_plain_text(data),
    }
}

fn decode_plain_text(data: Vec<u8>) -> Result<String, DocumentError> {
    let text = String::from_utf8(data).map_err(|_| DocumentError::InvalidEncoding)?;
    if text.trim().is_empty() {
        return Err(DocumentError::EmptyDocument("Empty text file uploaded"));
    }
    Ok(text)
}

async fn extract_pdf(filename: &str, data: Vec<u8>) -> Result<String, DocumentError> {
    debug!("Extracting text from PDF '{}' ({} bytes)", filename, data.len());

    // pdf-extract is synchronous and may panic on damaged files; a panic surfaces as a JoinError.
    let extraction = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data));

    let text = tokio::time::timeout(PDF_EXTRACTION_TIMEOUT, extraction)
        .await
        .map_err(|_| DocumentError::UnreadableDocument("PDF extraction timed out".to_string()))?
        .map_err(|e| {
            warn!("PDF decoder aborted for '{}': {}", filename, e);
            DocumentError::UnreadableDocument("the file appears to be corrupted".to_string())
        })?
        .map_err(|e| DocumentError::UnreadableDocument(e.to_string()))?;

    if text.trim().is_empty() {
        return Err(DocumentError::UnreadableDocument(
            "No text content extracted from PDF. The file might be scanned images or corrupted."
                .to_string(),
        ));
    }

    info!("Extracted {} characters from PDF '{}'", text.len(), filename);
    Ok(text)
}
