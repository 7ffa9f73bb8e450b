use crate::error::GenerationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Label of one of the four answer choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChoiceLabel {
    A,
    B,
    C,
    D,
}

impl ChoiceLabel {
    pub const ALL: [ChoiceLabel; 4] = [ChoiceLabel::A, ChoiceLabel::B, ChoiceLabel::C, ChoiceLabel::D];

    pub fn as_str(self) -> &'static str {
        match self {
            ChoiceLabel::A => "A",
            ChoiceLabel::B => "B",
            ChoiceLabel::C => "C",
            ChoiceLabel::D => "D",
        }
    }

    pub fn index(self) -> usize {
        match self {
            ChoiceLabel::A => 0,
            ChoiceLabel::B => 1,
            ChoiceLabel::C => 2,
            ChoiceLabel::D => 3,
        }
    }

    /// Label below this one, wrapping from D to A.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % 4]
    }

    /// Label above this one, wrapping from A to D.
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + 3) % 4]
    }
}

impl fmt::Display for ChoiceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChoiceLabel {
    type Err = String;

    /// Exact, case-sensitive match on the single letter.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(ChoiceLabel::A),
            "B" => Ok(ChoiceLabel::B),
            "C" => Ok(ChoiceLabel::C),
            "D" => Ok(ChoiceLabel::D),
            other => Err(format!("'{}' is not one of A, B, C, D", other)),
        }
    }
}

/// The four answer texts, keyed by label on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choices {
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "B")]
    pub b: String,
    #[serde(rename = "C")]
    pub c: String,
    #[serde(rename = "D")]
    pub d: String,
}

impl Choices {
    pub fn get(&self, label: ChoiceLabel) -> &str {
        match label {
            ChoiceLabel::A => &self.a,
            ChoiceLabel::B => &self.b,
            ChoiceLabel::C => &self.c,
            ChoiceLabel::D => &self.d,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChoiceLabel, &str)> {
        ChoiceLabel::ALL.into_iter().map(move |label| (label, self.get(label)))
    }
}

/// One generated case scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub choices: Choices,
    pub correct: ChoiceLabel,
    pub explanation: String,
}

#[derive(Debug)]
pub enum GenerationRequest {
    Generate { text: String, count: u8 },
}

#[derive(Debug)]
pub enum GenerationResponse {
    Questions(Vec<Question>),
    Failed(GenerationError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Menu,
    Generating,
    Quiz,
    RestartConfirm,
    Summary,
}

#[cfg(test)]
pub(crate) fn sample_question(correct: ChoiceLabel) -> Question {
    Question {
        question: "A 45-year-old presents with crushing chest pain. Next step?".to_string(),
        choices: Choices {
            a: "ECG".to_string(),
            b: "Chest X-ray".to_string(),
            c: "Discharge".to_string(),
            d: "Colonoscopy".to_string(),
        },
        correct,
        explanation: "An ECG is the first investigation in suspected ACS.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_parse_is_case_sensitive() {
        assert_eq!("B".parse::<ChoiceLabel>(), Ok(ChoiceLabel::B));
        assert!("b".parse::<ChoiceLabel>().is_err());
        assert!(" B".parse::<ChoiceLabel>().is_err());
        assert!("X".parse::<ChoiceLabel>().is_err());
    }

    #[test]
    fn test_label_cycling_wraps() {
        assert_eq!(ChoiceLabel::A.prev(), ChoiceLabel::D);
        assert_eq!(ChoiceLabel::D.next(), ChoiceLabel::A);
        assert_eq!(ChoiceLabel::B.next(), ChoiceLabel::C);
    }

    #[test]
    fn test_question_deserializes_from_wire_shape() {
        let json = r#"{
            "question": "Case text",
            "choices": {"A": "one", "B": "two", "C": "three", "D": "four"},
            "correct": "C",
            "explanation": "Because three."
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.correct, ChoiceLabel::C);
        assert_eq!(q.choices.get(ChoiceLabel::C), "three");
        let labels: Vec<_> = q.choices.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_question_missing_choice_is_rejected() {
        let json = r#"{
            "question": "Case text",
            "choices": {"A": "one", "B": "two", "C": "three"},
            "correct": "A",
            "explanation": "x"
        }"#;
        assert!(serde_json::from_str::<Question>(json).is_err());
    }
}
