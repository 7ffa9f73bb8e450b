use crate::ai::client::{ModelConfig, OpenRouterClient};
use crate::error::GenerationError;
use crate::models::{ChoiceLabel, Choices, Question};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

/// Anything that can turn document text into a raw model reply.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn request_questions(&self, text: &str, count: u8) -> Result<String, GenerationError>;
}

/// Generator backed by OpenRouter.
///
/// The HTTP client is built on every request, so a missing API key only
/// surfaces when the user actually asks for questions.
#[derive(Debug, Clone, Default)]
pub struct OpenRouterGenerator {
    pub config: ModelConfig,
}

impl OpenRouterGenerator {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl QuestionGenerator for OpenRouterGenerator {
    async fn request_questions(&self, text: &str, count: u8) -> Result<String, GenerationError> {
        let client = OpenRouterClient::new()?;
        client.generate_questions(text, count, &self.config).await
    }
}

fn clean_json_response(response: &str) -> String {
    let mut cleaned = response.trim().to_string();

    if cleaned.starts_with("```") {
        let lines: Vec<&str> = cleaned.lines().collect();
        if lines.len() > 2 {
            cleaned = lines[1..lines.len() - 1].join("\n");
        }
    }

    // An object-wrapped reply is left whole so it fails as "not an array".
    if !cleaned.starts_with('{') {
        if let (Some(start), Some(end)) = (array_start(&cleaned), cleaned.rfind(']')) {
            if start < end {
                cleaned = cleaned[start..=end].to_string();
            }
        }
    }

    cleaned.trim().to_string()
}

/// First `[` that opens a line or an array of objects, skipping bracketed
/// references such as "[1]" in surrounding prose.
fn array_start(text: &str) -> Option<usize> {
    text.match_indices('[').map(|(i, _)| i).find(|&i| {
        let before = text[..i].rsplit('\n').next().unwrap_or_default();
        before.trim().is_empty() || text[i + 1..].trim_start().starts_with('{')
    })
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    question: String,
    choices: Choices,
    correct: String,
    explanation: String,
}

/// Parse a model reply into questions.
///
/// Every record must carry all fields and a `correct` label of exactly
/// "A", "B", "C" or "D"; anything else fails with the raw reply attached.
pub fn parse_questions(response: &str) -> Result<Vec<Question>, GenerationError> {
    let malformed = |detail: String| GenerationError::Malformed {
        detail,
        raw: response.to_string(),
    };

    let cleaned = clean_json_response(response);
    let raw: Vec<RawQuestion> =
        serde_json::from_str(&cleaned).map_err(|e| malformed(e.to_string()))?;

    raw.into_iter()
        .enumerate()
        .map(|(i, q)| {
            let correct: ChoiceLabel = q
                .correct
                .parse()
                .map_err(|e| malformed(format!("question {}: correct label {}", i + 1, e)))?;
            Ok(Question {
                question: q.question,
                choices: q.choices,
                correct,
                explanation: q.explanation,
            })
        })
        .collect()
}

/// Request questions for `text` and parse the reply.
pub async fn generate_question_set(
    generator: &dyn QuestionGenerator,
    text: &str,
    count: u8,
) -> Result<Vec<Question>, GenerationError> {
    if text.trim().is_empty() {
        return Err(GenerationError::RequestFailure(
            "The document contains no text to generate questions from".to_string(),
        ));
    }

    info!(count, chars = text.chars().count(), "requesting questions");
    let response = generator.request_questions(text, count).await?;
    debug!(response = %response, "raw generation response");

    let questions = parse_questions(&response)?;
    info!(received = questions.len(), "parsed generated questions");
    Ok(questions)
}

/// Canned generator for tests.
#[cfg(test)]
pub(crate) struct MockGenerator {
    pub response: Result<String, String>,
    pub calls: std::sync::Mutex<Vec<(String, u8)>>,
}

#[cfg(test)]
impl MockGenerator {
    pub fn replying(response: &str) -> Self {
        Self {
            response: Ok(response.to_string()),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: &str) -> Self {
        Self {
            response: Err(error.to_string()),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl QuestionGenerator for MockGenerator {
    async fn request_questions(&self, text: &str, count: u8) -> Result<String, GenerationError> {
        self.calls.lock().unwrap().push((text.to_string(), count));
        self.response
            .clone()
            .map_err(GenerationError::RequestFailure)
    }
}

#[cfg(test)]
pub(crate) const TWO_QUESTIONS_JSON: &str = r#"[
  {
    "question": "A 60-year-old smoker has painless jaundice. Most likely diagnosis?",
    "choices": {"A": "Hepatitis A", "B": "Pancreatic head carcinoma", "C": "Gallstones", "D": "Gilbert syndrome"},
    "correct": "B",
    "explanation": "Painless jaundice in an older smoker suggests pancreatic cancer."
  },
  {
    "question": "A child has a honey-colored crusted rash. Causative organism?",
    "choices": {"A": "Staphylococcus aureus", "B": "Candida", "C": "HSV-1", "D": "Tinea"},
    "correct": "A",
    "explanation": "Impetigo is most often caused by S. aureus."
  }
]"#;
