//! Runtime configuration for a quiz session.
//!
//! The binary fills [`QuizConfig`] from command-line flags and environment
//! variables. The OpenRouter credential is not part of it: `openrouter_api`
//! reads `OPENROUTER_API_KEY` itself when the first generation request is made.

use crate::ai::ModelConfig;
use std::path::PathBuf;

pub const MIN_QUESTION_COUNT: u8 = 1;
pub const MAX_QUESTION_COUNT: u8 = 10;
pub const DEFAULT_QUESTION_COUNT: u8 = 5;
pub const DEFAULT_COUNTDOWN_SECS: u64 = 60;
pub const DEFAULT_LOG_FILE: &str = "case_quiz.log";

/// Clamp a requested question count into the accepted 1..=10 range.
pub fn clamp_question_count(count: i64) -> u8 {
    count.clamp(MIN_QUESTION_COUNT as i64, MAX_QUESTION_COUNT as i64) as u8
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizConfig {
    /// Directory listed in the document menu.
    pub documents_dir: PathBuf,
    /// Document opened at start-up, if any.
    pub initial_document: Option<PathBuf>,
    pub question_count: u8,
    /// Per-question countdown shown in the quiz; 0 hides it.
    pub countdown_secs: u64,
    pub model: ModelConfig,
    /// Append a Markdown transcript of the attempt here.
    pub transcript_path: Option<PathBuf>,
    pub log_file: PathBuf,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            documents_dir: PathBuf::from("."),
            initial_document: None,
            question_count: DEFAULT_QUESTION_COUNT,
            countdown_secs: DEFAULT_COUNTDOWN_SECS,
            model: ModelConfig::default(),
            transcript_path: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}
