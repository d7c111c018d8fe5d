//! Request-level error type and its mapping onto HTTP responses.

use actix_web::{http::StatusCode, HttpResponse};
use log::{error, warn};

use crate::document::DocumentError;
use crate::llm::GenerationError;
use crate::parser::ParseError;
use crate::quiz::RegistryError;
use crate::ErrorResponse;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl ApiError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ApiError::InvalidInput(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) | ApiError::Document(_) => StatusCode::BAD_REQUEST,
            ApiError::Parse(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Generation(GenerationError::InvalidInput) => StatusCode::BAD_REQUEST,
            ApiError::Generation(GenerationError::RateLimited) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Registry(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Stable error name used in the `error` field of the response body.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "InvalidInput",
            ApiError::Document(DocumentError::UnsupportedFormat(_)) => "UnsupportedFormat",
            ApiError::Document(DocumentError::EmptyDocument(_)) => "EmptyDocument",
            ApiError::Document(DocumentError::InvalidEncoding) => "InvalidEncoding",
            ApiError::Document(DocumentError::UnreadableDocument(_)) => "UnreadableDocument",
            ApiError::Parse(ParseError::MalformedResponse(_)) => "MalformedResponse",
            ApiError::Parse(ParseError::InvalidQuestion { .. }) => "InvalidQuestion",
            ApiError::Parse(ParseError::EmptyResult(_)) => "EmptyResult",
            ApiError::Generation(GenerationError::InvalidInput) => "InvalidInput",
            ApiError::Generation(GenerationError::RateLimited) => "RateLimited",
            ApiError::Generation(GenerationError::ConfigurationError(_)) => "ConfigurationError",
            ApiError::Generation(GenerationError::GenerationFailed(_)) => "GenerationFailed",
            ApiError::Registry(RegistryError::QuizNotFound(_)) => "QuizNotFound",
            ApiError::Registry(RegistryError::QuestionNotFound { .. }) => "QuestionNotFound",
        }
    }

    pub fn public_message(&self) -> String {
        match self {
            ApiError::Generation(e) => e.public_message(),
            other => other.to_string(),
        }
    }
}

impl From<ApiError> for HttpResponse {
    fn from(err: ApiError) -> Self {
        let status = err.status_code();
        if status.is_server_error() {
            error!("{} ({}): {:?}", err.kind(), status, err);
        } else {
            warn!("{} ({}): {}", err.kind(), status, err);
        }
        HttpResponse::build(status).json(ErrorResponse::new(err.kind(), &err.public_message()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping_follows_error_taxonomy() {
        let cases: Vec<(ApiError, StatusCode)> = vec![
            (ApiError::invalid_input("too short"), StatusCode::BAD_REQUEST),
            (DocumentError::InvalidEncoding.into(), StatusCode::BAD_REQUEST),
            (
                ParseError::EmptyResult("quiz questions").into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (GenerationError::RateLimited.into(), StatusCode::TOO_MANY_REQUESTS),
            (
                GenerationError::ConfigurationError("bad key".into()).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                RegistryError::QuizNotFound("x".into()).into(),
                StatusCode::NOT_FOUND,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status_code(), expected, "{}", err.kind());
        }
    }

    #[test]
    fn test_provider_failures_are_not_leaked() {
        let err: ApiError =
            GenerationError::GenerationFailed("HTTP 500: internal provider trace".into()).into();
        assert_eq!(err.kind(), "GenerationFailed");
        assert!(!err.public_message().contains("provider trace"));
    }

    #[test]
    fn test_parse_errors_keep_specific_message() {
        let err: ApiError = ParseError::InvalidQuestion {
            position: 3,
            field: "options",
            reason: "must have exactly 4 options, found 5".into(),
        }
        .into();
        assert_eq!(err.kind(), "InvalidQuestion");
        assert!(err.public_message().contains("Question 3"));
    }

    #[test]
    fn test_into_http_response_uses_status() {
        let response: HttpResponse = ApiError::from(RegistryError::QuestionNotFound {
            quiz_id: "q".into(),
            question_id: "7".into(),
        })
        .into();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
