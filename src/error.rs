//! Error types for the quiz generator.
//!
//! Each concern owns its error enum so the driver can decide how to surface
//! it: extraction and generation failures are shown to the user and leave the
//! session untouched, while [`QuizError`] signals a transition attempted out
//! of order and is refused by the state machine without mutating anything.

use std::path::PathBuf;
use thiserror::Error;

use crate::session::QuizState;

/// Failures while turning a document into plain text.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The file extension is not one of pdf, docx, txt or md.
    #[error("Unsupported file format '{extension}' for '{path}'. Use a PDF, DOCX, TXT or MD file.")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// The format is recognised but the file could not be parsed.
    #[error("Failed to extract text from '{path}': {detail}")]
    ExtractionFailure { path: PathBuf, detail: String },
}

/// Failures while asking the model for questions.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Network, authentication or service error from the completion call.
    #[error("Error generating questions: {0}")]
    RequestFailure(String),

    /// The response could not be turned into a question set.
    ///
    /// `raw` carries the untouched model output for manual inspection.
    #[error("Failed to parse generated questions: {detail}")]
    Malformed { detail: String, raw: String },
}

impl GenerationError {
    /// Raw model output, when the failure happened after a response arrived.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            GenerationError::Malformed { raw, .. } => Some(raw),
            GenerationError::RequestFailure(_) => None,
        }
    }
}

/// Transitions requested in an order the quiz does not allow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("The current question has already been answered")]
    AlreadyAnswered,

    #[error("Submit an answer before moving to the next question")]
    NotYetAnswered,

    #[error("Action not allowed while the quiz is {state}")]
    InvalidState { state: QuizState },

    #[error("Cannot start a quiz without questions")]
    EmptyQuestionSet,
}

/// Any error the application surfaces to the user.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Quiz(#[from] QuizError),
}
