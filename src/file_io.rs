use crate::models::Question;
use crate::session::AnswerOutcome;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

pub fn open_transcript(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

pub fn write_session_header<W: Write>(
    out: &mut W,
    document_name: &str,
    questions_total: usize,
) -> io::Result<()> {
    let started = chrono::Local::now().format("%Y-%m-%d %H:%M");
    writeln!(out, "# Case quiz: {}", document_name)?;
    writeln!(out)?;
    writeln!(out, "Started: {}  ", started)?;
    writeln!(out, "Questions: {}", questions_total)?;
    writeln!(out)?;
    out.flush()
}

pub fn write_question_entry<W: Write>(
    out: &mut W,
    number: usize,
    question: &Question,
    selected: &str,
    outcome: &AnswerOutcome,
) -> io::Result<()> {
    writeln!(out, "## Question {}", number)?;
    writeln!(out)?;
    writeln!(out, "{}", question.question)?;
    writeln!(out)?;
    for (label, text) in question.choices.iter() {
        writeln!(out, "- **{}.** {}", label, text)?;
    }
    writeln!(out)?;

    let verdict = if outcome.is_correct() {
        "correct"
    } else {
        "incorrect"
    };
    writeln!(
        out,
        "Your answer: {} ({}), correct answer: {}",
        selected, verdict, question.correct
    )?;
    writeln!(out)?;
    writeln!(out, "Explanation: {}", outcome.explanation())?;
    writeln!(out)?;
    out.flush()
}

pub fn write_final_score<W: Write>(
    out: &mut W,
    score: usize,
    total: usize,
    best_streak: usize,
) -> io::Result<()> {
    writeln!(out, "**Final score:** {} / {}  ", score, total)?;
    writeln!(out, "**Best streak:** {}", best_streak)?;
    writeln!(out)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{sample_question, ChoiceLabel};

    #[test]
    fn test_write_session_header() {
        let mut out = Vec::new();
        write_session_header(&mut out, "cardiology.pdf", 5).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("# Case quiz: cardiology.pdf\n"));
        assert!(text.contains("Questions: 5"));
        assert!(text.contains("Started: "));
    }

    #[test]
    fn test_write_incorrect_question_entry() {
        let question = sample_question(ChoiceLabel::A);
        let outcome = AnswerOutcome::Incorrect {
            explanation: question.explanation.clone(),
            correct: ChoiceLabel::A,
        };
        let mut out = Vec::new();
        write_question_entry(&mut out, 2, &question, "C", &outcome).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("## Question 2\n"));
        assert!(text.contains("- **A.** ECG"));
        assert!(text.contains("- **D.** Colonoscopy"));
        assert!(text.contains("Your answer: C (incorrect), correct answer: A"));
        assert!(text.contains("Explanation: An ECG is the first investigation"));
    }

    #[test]
    fn test_write_final_score() {
        let mut out = Vec::new();
        write_final_score(&mut out, 4, 5, 3).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("**Final score:** 4 / 5"));
        assert!(text.contains("**Best streak:** 3"));
    }

    #[test]
    fn test_open_transcript_appends() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("transcript.md");
        {
            let mut file = open_transcript(&path).unwrap();
            write_final_score(&mut file, 1, 1, 1).unwrap();
        }
        {
            let mut file = open_transcript(&path).unwrap();
            write_final_score(&mut file, 0, 1, 0).unwrap();
        }
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.matches("**Final score:**").count(), 2);
    }
}
