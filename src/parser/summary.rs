use super::ParseError;
use crate::document::models::DocumentSummary;

pub const QUICK_NOTES_MARKER: &str = "Quick Notes:";
pub const KEY_TAKEAWAYS_MARKER: &str = "Key Takeaways:";

/// Parses a "Quick Notes:" / "Key Takeaways:" response into its two bullet lists.
pub fn parse_summary(raw: &str) -> Result<DocumentSummary, ParseError> {
    let sections: Vec<&str> = raw.split(KEY_TAKEAWAYS_MARKER).collect();
    if sections.len() != 2 {
        return Err(ParseError::MalformedResponse(format!(
            "expected exactly one '{}' section, found {}",
            KEY_TAKEAWAYS_MARKER,
            sections.len() - 1
        )));
    }

    let quick_notes = bullet_lines(&sections[0].replace(QUICK_NOTES_MARKER, ""));
    let key_takeaways = bullet_lines(sections[1]);

    if quick_notes.is_empty() {
        return Err(ParseError::EmptyResult("quick notes"));
    }
    if key_takeaways.is_empty() {
        return Err(ParseError::EmptyResult("key takeaways"));
    }

    Ok(DocumentSummary {
        quick_notes,
        key_takeaways,
    })
}

fn bullet_lines(section: &str) -> Vec<String> {
    section
        .lines()
        .map(strip_bullet)
        .filter(|line| !line.is_empty())
        // leftovers of markdown emphasis around the markers, e.g. "**"
        .filter(|line| !line.chars().all(|c| matches!(c, '*' | '#')))
        .map(str::to_string)
        .collect()
}

fn strip_bullet(line: &str) -> &str {
    let line = line.trim_matches(|c: char| c == '-' || c.is_whitespace());
    line.strip_prefix("* ")
        .or_else(|| line.strip_prefix("• "))
        .unwrap_or(line)
        .trim()
}
