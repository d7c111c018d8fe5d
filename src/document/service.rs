use log::{debug, error, info};

use super::models::DocumentSummary;
use crate::error::ApiError;
use crate::llm::{prompts, TextGenerator};
use crate::parser::parse_summary;
use crate::validation::require_source_text;

/// Summarizes study text into quick notes and key takeaways.
pub async fn generate_summary(
    generator: &dyn TextGenerator,
    text: &str,
) -> Result<DocumentSummary, ApiError> {
    require_source_text(text, "summarization")?;

    let response = generator.generate(&prompts::summary_prompt(text)).await?;
    debug!("Summary response received ({} characters)", response.len());

    let summary = parse_summary(&response).map_err(|e| {
        error!(
            "Could not parse summary response: {}. Response start: {:?}",
            e,
            response.chars().take(200).collect::<String>()
        );
        e
    })?;

    info!(
        "Generated summary with {} quick notes and {} key takeaways",
        summary.quick_notes.len(),
        summary.key_takeaways.len()
    );
    Ok(summary)
}
