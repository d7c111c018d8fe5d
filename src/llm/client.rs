use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

/// Incremental model output. Finite and consumed once; an `Err` item is terminal.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String, GenerationError>> + Send + 'static>>;

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate the complete response for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Generate the response for `prompt` as ordered text fragments.
    async fn generate_stream(&self, prompt: &str) -> Result<TextStream, GenerationError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum GenerationError {
    #[error("Empty prompt provided")]
    InvalidInput,
    #[error("Text generation is not configured properly: {0}")]
    ConfigurationError(String),
    #[error("Text generation rate limit exceeded. Please try again later")]
    RateLimited,
    #[error("Error generating text: {0}")]
    GenerationFailed(String),
}

impl GenerationError {
    /// Message that is safe to show to API callers. Provider details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            GenerationError::InvalidInput | GenerationError::RateLimited => self.to_string(),
            GenerationError::ConfigurationError(_) | GenerationError::GenerationFailed(_) => {
                "Failed to generate a response. Please try again later.".to_string()
            }
        }
    }
}

/// Rejects blank prompts before anything goes over the wire.
pub fn ensure_prompt(prompt: &str) -> Result<(), GenerationError> {
    if prompt.trim().is_empty() {
        return Err(GenerationError::InvalidInput);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_prompt_is_rejected() {
        assert!(matches!(ensure_prompt(""), Err(GenerationError::InvalidInput)));
        assert!(matches!(ensure_prompt(" \n\t"), Err(GenerationError::InvalidInput)));
        assert!(ensure_prompt("Explain photosynthesis").is_ok());
    }

    #[test]
    fn test_public_message_hides_provider_details() {
        let failed = GenerationError::GenerationFailed("HTTP 500: upstream stack trace".to_string());
        assert!(!failed.public_message().contains("stack trace"));

        let config = GenerationError::ConfigurationError("API key not valid".to_string());
        assert!(!config.public_message().contains("API key"));

        assert!(GenerationError::RateLimited.public_message().contains("rate limit"));
    }
}
