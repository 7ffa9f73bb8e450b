//! Presentation driver: turns key presses into quiz transitions.
//!
//! [`App`] owns the [`QuizSession`] and everything the screens need to draw
//! it. Each key press triggers at most one session transition; the main loop
//! redraws after every call.

use crate::config::{clamp_question_count, QuizConfig};
use crate::countdown::Countdown;
use crate::error::{AppError, QuizError};
use crate::extract::{extract_text, get_document_files, ExtractedDocument};
use crate::file_io::{open_transcript, write_final_score, write_question_entry, write_session_header};
use crate::models::{AppState, ChoiceLabel, GenerationRequest, GenerationResponse, Question};
use crate::session::{AnswerOutcome, QuizSession, QuizState};
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

#[derive(Debug)]
pub struct App {
    pub state: AppState,
    pub config: QuizConfig,
    pub documents: Vec<PathBuf>,
    pub selected_document: usize,
    pub document: Option<ExtractedDocument>,
    pub question_count: u8,
    pub session: QuizSession,
    pub selected_choice: ChoiceLabel,
    pub last_outcome: Option<AnswerOutcome>,
    pub status: Option<StatusMessage>,
    /// Model output kept for inspection after a malformed generation.
    pub raw_response: Option<String>,
    pub raw_scroll: u16,
    pub countdown: Countdown,
    pub generation_started: Option<Instant>,
    pub should_quit: bool,
    request_tx: Sender<GenerationRequest>,
    response_rx: Receiver<GenerationResponse>,
    transcript: Option<File>,
}

impl App {
    pub fn new(
        config: QuizConfig,
        request_tx: Sender<GenerationRequest>,
        response_rx: Receiver<GenerationResponse>,
    ) -> Self {
        let mut documents = get_document_files(&config.documents_dir);
        let mut selected_document = 0;
        if let Some(initial) = &config.initial_document {
            selected_document = match documents.iter().position(|d| d == initial) {
                Some(i) => i,
                None => {
                    documents.insert(0, initial.clone());
                    0
                }
            };
        }

        let mut status = None;
        let transcript = match &config.transcript_path {
            Some(path) => match open_transcript(path) {
                Ok(file) => Some(file),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "cannot open transcript");
                    status = Some(StatusMessage::Error(format!(
                        "Cannot open transcript '{}': {}",
                        path.display(),
                        e
                    )));
                    None
                }
            },
            None => None,
        };

        let mut app = Self {
            state: AppState::Menu,
            question_count: clamp_question_count(config.question_count.into()),
            countdown: Countdown::new(config.countdown_secs),
            config,
            documents,
            selected_document,
            document: None,
            session: QuizSession::new(),
            selected_choice: ChoiceLabel::A,
            last_outcome: None,
            status,
            raw_response: None,
            raw_scroll: 0,
            generation_started: None,
            should_quit: false,
            request_tx,
            response_rx,
            transcript,
        };

        if app.config.initial_document.is_some() {
            app.open_selected_document();
        }
        app
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.state {
            AppState::Menu => self.handle_menu_key(key),
            // Generation blocks the session until the worker answers.
            AppState::Generating => {}
            AppState::Quiz => self.handle_quiz_key(key),
            AppState::RestartConfirm => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.restart(),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.state = AppState::Quiz;
                }
                _ => {}
            },
            AppState::Summary => match key.code {
                KeyCode::Char('r') | KeyCode::Char('R') => self.restart(),
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                _ => {}
            },
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => {
                self.selected_document = self.selected_document.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_document + 1 < self.documents.len() {
                    self.selected_document += 1;
                }
            }
            KeyCode::Enter => self.open_selected_document(),
            KeyCode::Left | KeyCode::Char('-') => {
                self.question_count = clamp_question_count(i64::from(self.question_count) - 1);
            }
            KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => {
                self.question_count = clamp_question_count(i64::from(self.question_count) + 1);
            }
            KeyCode::PageUp => self.raw_scroll = self.raw_scroll.saturating_sub(5),
            KeyCode::PageDown => self.raw_scroll = self.raw_scroll.saturating_add(5),
            KeyCode::Char('g') | KeyCode::Char('G') => self.request_generation(),
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_quiz_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.state = AppState::RestartConfirm;
            return;
        }

        if self.session.answered() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char('n') | KeyCode::Char('N')) {
                self.advance();
            }
            return;
        }

        match key.code {
            KeyCode::Up => self.selected_choice = self.selected_choice.prev(),
            KeyCode::Down => self.selected_choice = self.selected_choice.next(),
            KeyCode::Char(c) => {
                if let Ok(label) = c.to_ascii_uppercase().to_string().parse::<ChoiceLabel>() {
                    self.selected_choice = label;
                }
            }
            KeyCode::Enter => self.submit_answer(),
            _ => {}
        }
    }

    fn open_selected_document(&mut self) {
        let Some(path) = self.documents.get(self.selected_document).cloned() else {
            self.status = Some(StatusMessage::Error(format!(
                "No documents found in '{}'",
                self.config.documents_dir.display()
            )));
            return;
        };

        self.raw_response = None;
        match extract_text(&path) {
            Ok(doc) => {
                self.status = Some(StatusMessage::Info(format!(
                    "Loaded {} ({} characters). Press g to generate questions.",
                    doc.file_name(),
                    doc.char_count()
                )));
                self.document = Some(doc);
            }
            Err(e) => {
                warn!(error = %e, "document extraction failed");
                self.report(e.into());
            }
        }
    }

    fn request_generation(&mut self) {
        let Some(doc) = &self.document else {
            self.status = Some(StatusMessage::Error(
                "Open a document first (select it and press Enter).".to_string(),
            ));
            return;
        };
        if doc.text.trim().is_empty() {
            self.status = Some(StatusMessage::Error(format!(
                "No text could be extracted from {}.",
                doc.file_name()
            )));
            return;
        }

        let request = GenerationRequest::Generate {
            text: doc.text.clone(),
            count: self.question_count,
        };
        if self.request_tx.send(request).is_err() {
            self.status = Some(StatusMessage::Error(
                "Question generator is not running.".to_string(),
            ));
            return;
        }

        info!(count = self.question_count, document = %doc.file_name(), "generation requested");
        self.state = AppState::Generating;
        self.generation_started = Some(Instant::now());
        self.status = None;
        self.raw_response = None;
        self.raw_scroll = 0;
    }

    /// Apply a finished generation, if one is waiting. Returns whether anything changed.
    pub fn poll_generation(&mut self) -> bool {
        match self.response_rx.try_recv() {
            Ok(response) => {
                self.process_generation_response(response);
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                if self.state == AppState::Generating {
                    self.state = AppState::Menu;
                    self.generation_started = None;
                    self.status = Some(StatusMessage::Error(
                        "Question generator stopped unexpectedly.".to_string(),
                    ));
                    return true;
                }
                false
            }
        }
    }

    pub fn process_generation_response(&mut self, response: GenerationResponse) {
        self.generation_started = None;
        match response {
            GenerationResponse::Questions(questions) => self.start_quiz(questions),
            GenerationResponse::Failed(e) => {
                self.state = AppState::Menu;
                self.raw_response = e.raw_response().map(str::to_string);
                self.report(e.into());
            }
        }
    }

    fn start_quiz(&mut self, questions: Vec<Question>) {
        if let Err(e) = self.session.load(questions) {
            self.state = AppState::Menu;
            self.report(e.into());
            return;
        }

        info!(questions = self.session.len(), "quiz started");
        self.state = AppState::Quiz;
        self.status = None;
        self.selected_choice = ChoiceLabel::A;
        self.last_outcome = None;
        self.countdown.start(Instant::now());

        let name = self
            .document
            .as_ref()
            .map(|d| d.file_name())
            .unwrap_or_default();
        let total = self.session.len();
        self.write_transcript(|out| write_session_header(out, &name, total));
    }

    fn submit_answer(&mut self) {
        let selected = self.selected_choice;
        match self.session.submit_answer(selected.as_str()) {
            Ok(outcome) => {
                self.countdown.stop();
                let number = self.session.current_index() + 1;
                if let Some(question) = self.session.current_question().cloned() {
                    self.write_transcript(|out| {
                        write_question_entry(out, number, &question, selected.as_str(), &outcome)
                    });
                }
                self.last_outcome = Some(outcome);
            }
            Err(e) => self.report_quiz_error(e),
        }
    }

    fn advance(&mut self) {
        match self.session.advance() {
            Ok(QuizState::Completed) => {
                self.state = AppState::Summary;
                self.countdown.stop();
                self.last_outcome = None;
                let (score, total, best) = (
                    self.session.score(),
                    self.session.len(),
                    self.session.best_streak(),
                );
                info!(score, total, "quiz completed");
                self.write_transcript(|out| write_final_score(out, score, total, best));
            }
            Ok(_) => {
                self.selected_choice = ChoiceLabel::A;
                self.last_outcome = None;
                self.countdown.start(Instant::now());
            }
            Err(e) => self.report_quiz_error(e),
        }
    }

    fn restart(&mut self) {
        self.session.restart();
        self.state = AppState::Menu;
        self.selected_choice = ChoiceLabel::A;
        self.last_outcome = None;
        self.countdown.stop();
        self.status = Some(StatusMessage::Info(
            "Quiz restarted. Press g to generate a new set of questions.".to_string(),
        ));
    }

    fn report_quiz_error(&mut self, e: QuizError) {
        warn!(error = %e, state = %self.session.state(), "quiz transition refused");
        self.report(e.into());
    }

    fn report(&mut self, e: AppError) {
        self.status = Some(StatusMessage::Error(e.to_string()));
    }

    fn write_transcript(&mut self, write: impl FnOnce(&mut File) -> io::Result<()>) {
        if let Some(file) = self.transcript.as_mut() {
            if let Err(e) = write(file) {
                warn!(error = %e, "failed to write transcript");
            }
        }
    }
}
