#[cfg(test)]
mod ui_integration_tests {
    use crate::ai::generator::TWO_QUESTIONS_JSON;
    use crate::ai::parse_questions;
    use crate::app::App;
    use crate::config::QuizConfig;
    use crate::error::GenerationError;
    use crate::models::{AppState, GenerationRequest, GenerationResponse};
    use crate::ui::draw;
    use crossbeam_channel::{Receiver, Sender};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};
    use std::fs;
    use tempfile::TempDir;

    struct Fixture {
        app: App,
        _requests: Receiver<GenerationRequest>,
        _responses: Sender<GenerationResponse>,
        _dir: TempDir,
    }

    fn fixture(files: &[(&str, &str)]) -> Fixture {
        let dir = TempDir::new().unwrap();
        for (name, contents) in files {
            fs::write(dir.path().join(name), contents).unwrap();
        }
        let config = QuizConfig {
            documents_dir: dir.path().to_path_buf(),
            ..QuizConfig::default()
        };
        let (req_tx, req_rx) = crossbeam_channel::unbounded();
        let (resp_tx, resp_rx) = crossbeam_channel::unbounded();
        Fixture {
            app: App::new(config, req_tx, resp_rx),
            _requests: req_rx,
            _responses: resp_tx,
            _dir: dir,
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn quiz_fixture() -> Fixture {
        let mut fx = fixture(&[("cardio.txt", "Chest pain workup notes")]);
        press(&mut fx.app, KeyCode::Enter);
        press(&mut fx.app, KeyCode::Char('g'));
        fx.app.process_generation_response(GenerationResponse::Questions(
            parse_questions(TWO_QUESTIONS_JSON).unwrap(),
        ));
        fx
    }

    /// Render the app once and flatten the buffer into text rows.
    fn render(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_menu_shows_documents_and_settings() {
        let fx = fixture(&[("cardio.txt", "notes"), ("derm.md", "# Skin")]);
        let screen = render(&fx.app, 120, 40);

        assert!(screen.contains("Case-Based Quiz Generator"), "{screen}");
        assert!(screen.contains("cardio.txt"), "document list missing");
        assert!(screen.contains("derm.md"), "document list missing");
        assert!(screen.contains("Questions:"), "settings panel missing");
        assert!(screen.contains("openai/gpt-4"), "model name missing");
        assert!(screen.contains("Generate"), "help line missing");
    }

    #[test]
    fn test_menu_without_documents_says_so() {
        let fx = fixture(&[]);
        let screen = render(&fx.app, 120, 40);
        assert!(screen.contains("No PDF, DOCX"), "{screen}");
    }

    #[test]
    fn test_menu_previews_opened_document() {
        let mut fx = fixture(&[("cardio.txt", "Troponin rises within hours")]);
        press(&mut fx.app, KeyCode::Enter);
        let screen = render(&fx.app, 120, 40);

        assert!(screen.contains("Preview: cardio.txt"), "{screen}");
        assert!(screen.contains("Troponin rises within hours"));
        assert!(screen.contains("Loaded cardio.txt"), "status line missing");
    }

    #[test]
    fn test_malformed_output_is_shown_raw() {
        let mut fx = fixture(&[("cardio.txt", "notes")]);
        press(&mut fx.app, KeyCode::Enter);
        press(&mut fx.app, KeyCode::Char('g'));
        fx.app
            .process_generation_response(GenerationResponse::Failed(GenerationError::Malformed {
                detail: "expected value".to_string(),
                raw: "Sorry, I cannot help".to_string(),
            }));
        let screen = render(&fx.app, 120, 40);

        assert!(screen.contains("Raw model output"), "{screen}");
        assert!(screen.contains("Sorry, I cannot help"));
    }

    #[test]
    fn test_generating_screen() {
        let mut fx = fixture(&[("cardio.txt", "notes")]);
        press(&mut fx.app, KeyCode::Enter);
        press(&mut fx.app, KeyCode::Char('g'));
        assert_eq!(fx.app.state, AppState::Generating);

        let screen = render(&fx.app, 120, 30);
        assert!(screen.contains("Generating questions"), "{screen}");
        assert!(screen.contains("cardio.txt"));
    }

    #[test]
    fn test_quiz_screen_before_answer() {
        let fx = quiz_fixture();
        let screen = render(&fx.app, 120, 50);

        assert!(
            screen.contains("Question 1 of 2 | Score: 0 / 2 | Streak: 0"),
            "{screen}"
        );
        assert!(screen.contains("> A."), "selected choice marker missing");
        assert!(screen.contains("B. Pancreatic head carcinoma"));
        assert!(screen.contains("Time left:"), "countdown missing");
        assert!(screen.contains("Submit"));
    }

    #[test]
    fn test_quiz_screen_after_wrong_answer() {
        let mut fx = quiz_fixture();
        press(&mut fx.app, KeyCode::Char('c'));
        press(&mut fx.app, KeyCode::Enter);
        let screen = render(&fx.app, 120, 50);

        assert!(screen.contains("Incorrect. Correct answer: B."), "{screen}");
        assert!(screen.contains("Next question"), "help should offer next");
        assert!(!screen.contains("Time left"), "countdown should stop");
    }

    #[test]
    fn test_restart_confirmation_screen() {
        let mut fx = quiz_fixture();
        press(&mut fx.app, KeyCode::Esc);
        let screen = render(&fx.app, 120, 30);

        assert!(screen.contains("Restart Quiz"), "{screen}");
        assert!(screen.contains("Continue Quiz"));
    }

    #[test]
    fn test_summary_screen() {
        let mut fx = quiz_fixture();
        for answer in ['b', 'd'] {
            press(&mut fx.app, KeyCode::Char(answer));
            press(&mut fx.app, KeyCode::Enter);
            press(&mut fx.app, KeyCode::Enter);
        }
        assert_eq!(fx.app.state, AppState::Summary);

        let screen = render(&fx.app, 120, 40);
        assert!(screen.contains("Quiz complete!"), "{screen}");
        assert!(screen.contains("Final Score: 1 / 2"));
        assert!(screen.contains("Best streak: 1"));
        assert!(screen.contains("Your answer: D   Correct: A"));
        assert!(screen.contains("Restart"));
    }
}
