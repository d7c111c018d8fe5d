//! Prompt templates.
//!
//! The output shapes requested here are a contract with `crate::parser`: the quiz
//! prompt asks for a JSON array with `question`/`options`/`correctAnswer`/`explanation`
//! objects, the summary prompt for "Quick Notes:" followed by "Key Takeaways:".
//! Bump `OUTPUT_FORMAT_VERSION` whenever either shape changes.

use crate::parser::summary::{KEY_TAKEAWAYS_MARKER, QUICK_NOTES_MARKER};

pub const OUTPUT_FORMAT_VERSION: u32 = 1;

/// Wraps a prompt with output formatting instructions.
pub fn structured_prompt(format_instructions: &str, prompt: &str) -> String {
    format!(
        "{}\n\nImportant: Format your response exactly as requested. Do not include any additional text.\n\n{}",
        format_instructions.trim(),
        prompt
    )
}

/// Wraps a task with the material it should be answered from.
pub fn context_prompt(task: &str, context: &str) -> String {
    format!(
        "Context:\n{}\n\nTask:\n{}\n\nImportant: Provide a detailed, accurate response based on the context provided.",
        context, task
    )
}

pub fn chat_prompt(message: &str, context: &str) -> String {
    let task = format!(
        "You are a helpful study assistant. Your role is to help students understand \
         the content they are studying. Use the provided context to answer the \
         question thoroughly and clearly. If you cannot answer based on the context, \
         say so.\n\nQuestion: {}",
        message
    );
    context_prompt(&task, context)
}

pub fn summary_prompt(text: &str) -> String {
    let format_instructions = format!(
        "Analyze the provided text and create a comprehensive summary with two sections:
1. Quick Notes: Concise bullet points of main concepts and facts
2. Key Takeaways: Deeper analysis and important implications

Format your response EXACTLY as follows:
{quick}
- [concise point about main concept]
- [important fact or definition]
(include 5-7 bullet points)

{takeaways}
- [detailed insight with explanation]
- [important implication or connection]
(include 3-5 detailed takeaways)

Note: Each bullet point should be clear and complete. Quick notes should be concise (1-2 lines) while takeaways can be more detailed (2-3 lines).",
        quick = QUICK_NOTES_MARKER,
        takeaways = KEY_TAKEAWAYS_MARKER,
    );
    structured_prompt(&format_instructions, &format!("Text to analyze:\n{}", text))
}

pub fn quiz_prompt(text: &str, num_questions: usize) -> String {
    format!(
        r#"Generate a quiz with exactly {n} multiple-choice questions based on the following text.

IMPORTANT FORMATTING REQUIREMENTS:
1. Response MUST be a JSON array containing exactly {n} question objects
2. Each question object MUST have these exact fields:
   - "question": "A clear, specific question about the content"
   - "options": ["option1", "option2", "option3", "option4"] (exactly 4 options)
   - "correctAnswer": number 0-3 indicating the correct option index
   - "explanation": "Clear explanation of why the answer is correct"
3. The response must be valid JSON - all strings must use double quotes

CONTENT REQUIREMENTS:
1. Questions should test understanding, not just memorization
2. All options should be plausible and related to the topic
3. Explanations should be educational and detailed
4. Vary the difficulty level of questions
5. Focus on key concepts from the text

Example format:
[
  {{
    "question": "What is X?",
    "options": ["A", "B", "C", "D"],
    "correctAnswer": 2,
    "explanation": "C is correct because..."
  }}
]

Text to analyze:
{text}"#,
        n = num_questions,
        text = text
    )
}
