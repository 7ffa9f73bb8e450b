pub mod client;
pub mod generator;
pub mod prompt;

// Public API exports
pub use client::{ModelConfig, OpenRouterClient, DEFAULT_MODEL};
pub use generator::{generate_question_set, parse_questions, OpenRouterGenerator, QuestionGenerator};
