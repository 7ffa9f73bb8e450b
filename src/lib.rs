pub mod ai;
pub mod ai_worker;
pub mod app;
pub mod config;
pub mod countdown;
pub mod error;
pub mod extract;
pub mod file_io;
pub mod logger;
pub mod models;
pub mod session;
pub mod ui;
pub mod utils;

#[cfg(test)]
mod ui_tests;

// Re-exports for convenience
pub use ai::{
    generate_question_set, parse_questions, ModelConfig, OpenRouterGenerator, QuestionGenerator,
    DEFAULT_MODEL,
};
pub use ai_worker::spawn_generation_worker;
pub use app::{App, StatusMessage};
pub use config::QuizConfig;
pub use error::{AppError, ExtractError, GenerationError, QuizError};
pub use extract::{extract_text, get_document_files, DocumentFormat, ExtractedDocument};
pub use models::{AppState, ChoiceLabel, Choices, Question};
pub use session::{AnswerOutcome, QuizSession, QuizState};
pub use ui::draw;
