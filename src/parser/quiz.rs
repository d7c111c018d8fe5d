use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};

use super::ParseError;
use crate::quiz::models::Question;

pub const OPTION_COUNT: usize = 4;
pub const REQUIRED_FIELDS: [&str; 4] = ["question", "options", "correctAnswer", "explanation"];

lazy_static! {
    // First `[ {...}, {...} ]` run of flat objects; options arrays contain no braces.
    static ref QUESTION_ARRAY: Regex =
        Regex::new(r"\[\s*\{[^}]*\}(?:\s*,\s*\{[^}]*\})*\s*\]").expect("question array pattern is valid");
}

/// Parses model output into questions with ids `"1"..="N"` in input order.
pub fn parse_quiz_questions(raw: &str) -> Result<Vec<Question>, ParseError> {
    let elements = locate_question_array(raw)?;

    let questions = elements
        .iter()
        .enumerate()
        .map(|(index, element)| parse_question(index + 1, element))
        .collect::<Result<Vec<_>, _>>()?;

    if questions.is_empty() {
        return Err(ParseError::EmptyResult("quiz questions"));
    }
    Ok(questions)
}

fn locate_question_array(raw: &str) -> Result<Vec<Value>, ParseError> {
    if let Ok(Value::Array(elements)) = serde_json::from_str::<Value>(raw.trim()) {
        return Ok(elements);
    }

    let embedded = QUESTION_ARRAY.find(raw).ok_or_else(|| {
        ParseError::MalformedResponse("could not find a JSON array of questions".to_string())
    })?;

    match serde_json::from_str::<Value>(embedded.as_str()) {
        Ok(Value::Array(elements)) => Ok(elements),
        Ok(_) => Err(ParseError::MalformedResponse(
            "questions data must be an array".to_string(),
        )),
        Err(e) => Err(ParseError::MalformedResponse(format!(
            "failed to parse quiz questions: {}",
            e
        ))),
    }
}

fn invalid(position: usize, field: &'static str, reason: impl Into<String>) -> ParseError {
    ParseError::InvalidQuestion {
        position,
        field,
        reason: reason.into(),
    }
}

fn parse_question(position: usize, element: &Value) -> Result<Question, ParseError> {
    let object = element
        .as_object()
        .ok_or_else(|| invalid(position, "question", "expected a JSON object"))?;

    if let Some(missing) = REQUIRED_FIELDS.iter().find(|field| !object.contains_key(**field)) {
        return Err(invalid(position, *missing, "missing required field"));
    }

    let question = string_field(object, position, "question")?;
    let explanation = string_field(object, position, "explanation")?;

    let options = object["options"]
        .as_array()
        .ok_or_else(|| invalid(position, "options", "must be an array"))?;
    if options.len() != OPTION_COUNT {
        return Err(invalid(
            position,
            "options",
            format!("must have exactly {} options, found {}", OPTION_COUNT, options.len()),
        ));
    }
    let options = options
        .iter()
        .map(|option| {
            option
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| invalid(position, "options", "every option must be a string"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let correct_answer = object["correctAnswer"]
        .as_u64()
        .filter(|index| *index < OPTION_COUNT as u64)
        .ok_or_else(|| invalid(position, "correctAnswer", "must be an integer between 0 and 3"))?;

    Ok(Question {
        id: position.to_string(),
        question,
        options,
        correct_answer: correct_answer as usize,
        explanation,
    })
}

fn string_field(
    object: &Map<String, Value>,
    position: usize,
    field: &'static str,
) -> Result<String, ParseError> {
    object[field]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(position, field, "must be a string"))
}
