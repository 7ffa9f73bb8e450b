//! Prompt templates for question generation.

pub const SYSTEM_PROMPT: &str = "You are a board exam question generator.";

/// Build the user prompt asking for `count` questions about `text`.
///
/// The document text is embedded verbatim at the end of the template.
pub fn build_question_prompt(text: &str, count: u8) -> String {
    format!(
        r#"You are a medical exam question writer. Create {count} challenging, case-based, USMLE-style questions based on the following content.
Each question should have:
- A clinical case scenario as 'question'
- 4 answer choices labeled A, B, C, D
- The letter of the correct answer as 'correct'
- A brief explanation of the answer as 'explanation'

Format the output as a JSON array with this structure:

[
  {{
    "question": "Case scenario text here...",
    "choices": {{
      "A": "Answer choice A",
      "B": "Answer choice B",
      "C": "Answer choice C",
      "D": "Answer choice D"
    }},
    "correct": "A",
    "explanation": "Explanation text here..."
  }},
  ...
]

Respond ONLY with the JSON array (no markdown, no extra text).

Content:
{text}
"#
    )
}
