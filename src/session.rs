//! The quiz session state machine.
//!
//! A [`QuizSession`] is owned by the driver and moves strictly forward:
//! `NotStarted → InProgress(0) → … → InProgress(n-1) → Completed`, with
//! `restart` returning to `NotStarted` from anywhere. Every transition either
//! succeeds or returns a [`QuizError`] without touching the session.

use crate::error::QuizError;
use crate::models::{ChoiceLabel, Question};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    NotStarted,
    InProgress(usize),
    Completed,
}

impl fmt::Display for QuizState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizState::NotStarted => f.write_str("not started"),
            QuizState::InProgress(i) => write!(f, "in progress at question {}", i + 1),
            QuizState::Completed => f.write_str("completed"),
        }
    }
}

/// Result of submitting an answer, carrying what the user should see next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct {
        explanation: String,
    },
    Incorrect {
        explanation: String,
        correct: ChoiceLabel,
    },
}

impl AnswerOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, AnswerOutcome::Correct { .. })
    }

    pub fn explanation(&self) -> &str {
        match self {
            AnswerOutcome::Correct { explanation } => explanation,
            AnswerOutcome::Incorrect { explanation, .. } => explanation,
        }
    }
}

/// What the user chose for one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub selected: String,
    pub correct: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizSession {
    questions: Vec<Question>,
    current_index: usize,
    score: usize,
    streak: usize,
    best_streak: usize,
    answered: bool,
    started: bool,
    responses: Vec<Response>,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> QuizState {
        if !self.started {
            QuizState::NotStarted
        } else if self.current_index >= self.questions.len() {
            QuizState::Completed
        } else {
            QuizState::InProgress(self.current_index)
        }
    }

    /// Start a quiz over `questions`. Only valid before the quiz has started.
    pub fn load(&mut self, questions: Vec<Question>) -> Result<(), QuizError> {
        let state = self.state();
        if state != QuizState::NotStarted {
            return Err(QuizError::InvalidState { state });
        }
        if questions.is_empty() {
            return Err(QuizError::EmptyQuestionSet);
        }

        debug!(count = questions.len(), "loading question set");
        *self = Self {
            questions,
            started: true,
            ..Self::default()
        };
        Ok(())
    }

    /// Compare `selected` with the current question's correct label.
    ///
    /// The match is exact and case-sensitive, so anything other than the
    /// correct single letter counts as a wrong answer.
    pub fn submit_answer(&mut self, selected: &str) -> Result<AnswerOutcome, QuizError> {
        let index = match self.state() {
            QuizState::InProgress(i) => i,
            state => return Err(QuizError::InvalidState { state }),
        };
        if self.answered {
            return Err(QuizError::AlreadyAnswered);
        }

        let question = &self.questions[index];
        let is_correct = selected == question.correct.as_str();
        let outcome = if is_correct {
            self.score += 1;
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
            AnswerOutcome::Correct {
                explanation: question.explanation.clone(),
            }
        } else {
            self.streak = 0;
            AnswerOutcome::Incorrect {
                explanation: question.explanation.clone(),
                correct: question.correct,
            }
        };

        self.answered = true;
        self.responses.push(Response {
            selected: selected.to_string(),
            correct: is_correct,
        });
        debug!(
            question = index + 1,
            correct = is_correct,
            score = self.score,
            streak = self.streak,
            "answer submitted"
        );
        Ok(outcome)
    }

    /// Move past an answered question, returning the new state.
    pub fn advance(&mut self) -> Result<QuizState, QuizError> {
        let index = match self.state() {
            QuizState::InProgress(i) => i,
            state => return Err(QuizError::InvalidState { state }),
        };
        if !self.answered {
            return Err(QuizError::NotYetAnswered);
        }

        self.current_index = index + 1;
        self.answered = false;
        Ok(self.state())
    }

    /// Drop the question set and every counter.
    pub fn restart(&mut self) {
        *self = Self::default();
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.state() {
            QuizState::InProgress(i) => self.questions.get(i),
            _ => None,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn streak(&self) -> usize {
        self.streak
    }

    pub fn best_streak(&self) -> usize {
        self.best_streak
    }

    pub fn answered(&self) -> bool {
        self.answered
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    /// Fraction of questions already left behind, for the progress bar.
    pub fn progress_ratio(&self) -> f64 {
        if self.questions.is_empty() {
            0.0
        } else {
            (self.current_index as f64 / self.questions.len() as f64).min(1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_question;
    use crate::models::ChoiceLabel::{A, B, C, D};

    fn question_set(labels: &[ChoiceLabel]) -> Vec<Question> {
        labels.iter().map(|l| sample_question(*l)).collect()
    }

    fn loaded(labels: &[ChoiceLabel]) -> QuizSession {
        let mut session = QuizSession::new();
        session.load(question_set(labels)).unwrap();
        session
    }

    #[test]
    fn test_new_session_is_not_started() {
        let session = QuizSession::new();
        assert_eq!(session.state(), QuizState::NotStarted);
        assert_eq!(session.score(), 0);
        assert_eq!(session.streak(), 0);
        assert!(!session.answered());
        assert!(session.current_question().is_none());
    }

    #[test]
    fn test_load_enters_first_question() {
        let session = loaded(&[A, B]);
        assert_eq!(session.state(), QuizState::InProgress(0));
        assert_eq!(session.len(), 2);
        assert!(session.is_started());
        assert!(!session.answered());
        assert_eq!(session.current_question().unwrap().correct, A);
    }

    #[test]
    fn test_load_empty_set_is_rejected() {
        let mut session = QuizSession::new();
        assert_eq!(session.load(vec![]), Err(QuizError::EmptyQuestionSet));
        assert_eq!(session.state(), QuizState::NotStarted);
        assert_eq!(session, QuizSession::default());
    }

    #[test]
    fn test_load_while_in_progress_is_rejected() {
        let mut session = loaded(&[A]);
        let before = session.clone();
        assert_eq!(
            session.load(question_set(&[B, C])),
            Err(QuizError::InvalidState {
                state: QuizState::InProgress(0)
            })
        );
        assert_eq!(session, before);
    }

    #[test]
    fn test_perfect_run_scores_every_question() {
        let labels = [A, B, C, D, B];
        let mut session = loaded(&labels);

        for label in labels {
            let outcome = session.submit_answer(label.as_str()).unwrap();
            assert!(outcome.is_correct());
            session.advance().unwrap();
        }

        assert_eq!(session.state(), QuizState::Completed);
        assert_eq!(session.score(), labels.len());
        assert_eq!(session.streak(), labels.len());
        assert_eq!(session.best_streak(), labels.len());
    }

    #[test]
    fn test_correct_submit_increments_by_one() {
        let mut session = loaded(&[C, C]);
        session.submit_answer("C").unwrap();
        session.advance().unwrap();

        let (score, streak) = (session.score(), session.streak());
        let outcome = session.submit_answer("C").unwrap();
        assert_eq!(
            outcome,
            AnswerOutcome::Correct {
                explanation: sample_question(C).explanation
            }
        );
        assert_eq!(session.score(), score + 1);
        assert_eq!(session.streak(), streak + 1);
        assert!(session.answered());
    }

    #[test]
    fn test_wrong_label_resets_streak_and_keeps_score() {
        for wrong in ["A", "B", "D"] {
            let mut session = loaded(&[C, C]);
            session.submit_answer("C").unwrap();
            session.advance().unwrap();

            let outcome = session.submit_answer(wrong).unwrap();
            assert_eq!(
                outcome,
                AnswerOutcome::Incorrect {
                    explanation: sample_question(C).explanation,
                    correct: C,
                }
            );
            assert_eq!(session.score(), 1);
            assert_eq!(session.streak(), 0);
            assert_eq!(session.best_streak(), 1);
        }
    }

    #[test]
    fn test_label_match_is_case_sensitive() {
        let mut session = loaded(&[B]);
        let outcome = session.submit_answer("b").unwrap();
        assert!(!outcome.is_correct());
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_submit_twice_is_rejected() {
        let mut session = loaded(&[A, B]);
        session.submit_answer("A").unwrap();
        let before = session.clone();
        assert_eq!(session.submit_answer("A"), Err(QuizError::AlreadyAnswered));
        assert_eq!(session, before);
    }

    #[test]
    fn test_submit_outside_quiz_is_rejected() {
        let mut session = QuizSession::new();
        assert_eq!(
            session.submit_answer("A"),
            Err(QuizError::InvalidState {
                state: QuizState::NotStarted
            })
        );

        let mut session = loaded(&[A]);
        session.submit_answer("A").unwrap();
        session.advance().unwrap();
        let before = session.clone();
        assert_eq!(
            session.submit_answer("A"),
            Err(QuizError::InvalidState {
                state: QuizState::Completed
            })
        );
        assert_eq!(session, before);
    }

    #[test]
    fn test_advance_before_submit_is_rejected() {
        let mut session = loaded(&[A, B, C]);
        session.submit_answer("A").unwrap();
        session.advance().unwrap();
        let before = session.clone();

        assert_eq!(session.advance(), Err(QuizError::NotYetAnswered));
        assert_eq!(session, before);
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.score(), 1);
        assert_eq!(session.streak(), 1);
    }

    #[test]
    fn test_advance_outside_quiz_is_rejected() {
        let mut session = QuizSession::new();
        assert_eq!(
            session.advance(),
            Err(QuizError::InvalidState {
                state: QuizState::NotStarted
            })
        );
    }

    #[test]
    fn test_advance_clears_answered_flag() {
        let mut session = loaded(&[A, B]);
        session.submit_answer("D").unwrap();
        assert_eq!(session.advance(), Ok(QuizState::InProgress(1)));
        assert!(!session.answered());
    }

    #[test]
    fn test_restart_from_every_state_yields_fresh_session() {
        let mut not_started = QuizSession::new();
        not_started.restart();
        assert_eq!(not_started, QuizSession::default());

        let mut in_progress = loaded(&[A, B]);
        in_progress.submit_answer("A").unwrap();
        in_progress.restart();
        assert_eq!(in_progress, QuizSession::default());

        let mut completed = loaded(&[A]);
        completed.submit_answer("A").unwrap();
        completed.advance().unwrap();
        assert_eq!(completed.state(), QuizState::Completed);
        completed.restart();
        assert_eq!(completed, QuizSession::default());
        assert_eq!(completed.state(), QuizState::NotStarted);
        assert_eq!(completed.current_index(), 0);
        assert!(completed.questions().is_empty());
    }

    #[test]
    fn test_single_question_scenario() {
        let mut session = loaded(&[B]);
        session.submit_answer("B").unwrap();
        assert_eq!(session.score(), 1);
        assert_eq!(session.streak(), 1);
        assert!(session.answered());

        assert_eq!(session.advance(), Ok(QuizState::Completed));
        assert_eq!(session.score(), 1);
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn test_wrong_answer_in_the_middle_scenario() {
        let mut session = loaded(&[A, B, C]);
        for selected in ["A", "X", "C"] {
            session.submit_answer(selected).unwrap();
            session.advance().unwrap();
        }

        assert_eq!(session.state(), QuizState::Completed);
        assert_eq!(session.score(), 2);
        assert_eq!(session.streak(), 1);
        assert_eq!(session.best_streak(), 1);
        let verdicts: Vec<bool> = session.responses().iter().map(|r| r.correct).collect();
        assert_eq!(verdicts, vec![true, false, true]);
        assert_eq!(session.responses()[1].selected, "X");
    }

    #[test]
    fn test_invariants_hold_through_a_run() {
        let mut session = loaded(&[A, B, C, D]);
        for selected in ["A", "C", "C", "D"] {
            session.submit_answer(selected).unwrap();
            assert!(session.score() <= session.responses().len());
            assert!(session.streak() <= session.score());
            assert!(session.best_streak() >= session.streak());
            session.advance().unwrap();
            assert!(session.current_index() <= session.len());
        }
        assert_eq!(session.best_streak(), 2);
    }

    #[test]
    fn test_progress_ratio() {
        let mut session = loaded(&[A, B, C, D]);
        assert_eq!(session.progress_ratio(), 0.0);
        session.submit_answer("A").unwrap();
        session.advance().unwrap();
        assert_eq!(session.progress_ratio(), 0.25);
        assert_eq!(QuizSession::new().progress_ratio(), 0.0);
    }
}
