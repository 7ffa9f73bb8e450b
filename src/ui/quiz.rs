use crate::app::App;
use crate::session::AnswerOutcome;
use crate::ui::layout::calculate_quiz_chunks;
use crate::utils::render_markdown;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;

fn key_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub fn draw_quiz(f: &mut Frame, app: &App) {
    let layout = calculate_quiz_chunks(f.area());
    let session = &app.session;
    let Some(question) = session.current_question() else {
        return;
    };

    let header = Paragraph::new(format!(
        "Question {} of {} | Score: {} / {} | Streak: {}",
        session.current_index() + 1,
        session.len(),
        session.score(),
        session.len(),
        session.streak()
    ))
    .style(key_style())
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Progress"))
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(session.progress_ratio())
        .label(format!("{} / {}", session.current_index(), session.len()));
    f.render_widget(gauge, layout.progress_area);

    let (countdown_text, countdown_style) = match app.countdown.label(Instant::now()) {
        Some(label) if app.countdown.remaining_secs(Instant::now()) == Some(0) => {
            (label, Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        }
        Some(label) => (label, Style::default().fg(Color::Yellow)),
        None => (String::new(), Style::default()),
    };
    let countdown = Paragraph::new(countdown_text)
        .style(countdown_style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(countdown, layout.countdown_area);

    let question_widget = Paragraph::new(question.question.as_str())
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Case"));
    f.render_widget(question_widget, layout.question_area);

    let answered = session.answered();
    let choices: Vec<Line> = question
        .choices
        .iter()
        .map(|(label, text)| {
            let selected = label == app.selected_choice;
            let marker = if selected { "> " } else { "  " };
            let mut style = Style::default();
            if answered && label == question.correct {
                style = style.fg(Color::Green).add_modifier(Modifier::BOLD);
            } else if answered && selected {
                style = style.fg(Color::Red).add_modifier(Modifier::BOLD);
            } else if selected {
                style = style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
            }
            Line::from(Span::styled(format!("{}{}. {}", marker, label, text), style))
        })
        .collect();
    let choices_widget = Paragraph::new(choices)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Choices"));
    f.render_widget(choices_widget, layout.choices_area);

    if let Some(outcome) = &app.last_outcome {
        let mut text = Text::default();
        match outcome {
            AnswerOutcome::Correct { .. } => text.push_line(Line::from(Span::styled(
                "✅ Correct!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ))),
            AnswerOutcome::Incorrect { correct, .. } => {
                text.push_line(Line::from(Span::styled(
                    format!("❌ Incorrect. Correct answer: {}.", correct),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )))
            }
        }
        text.push_line(Line::from(""));
        text.extend(render_markdown(outcome.explanation()));

        let feedback = Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Explanation"));
        f.render_widget(feedback, layout.feedback_area);
    } else {
        let hint = Paragraph::new("Pick an answer and press Enter to submit.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title("Explanation"));
        f.render_widget(hint, layout.feedback_area);
    }

    let help_spans = if answered {
        vec![
            Span::styled("Enter/n", key_style()),
            Span::from(" Next question  "),
            Span::styled("Esc", key_style()),
            Span::from(" Restart  "),
            Span::styled("Ctrl+C", key_style()),
            Span::from(" Exit"),
        ]
    } else {
        vec![
            Span::styled("↑/↓ a-d", key_style()),
            Span::from(" Select  "),
            Span::styled("Enter", key_style()),
            Span::from(" Submit  "),
            Span::styled("Esc", key_style()),
            Span::from(" Restart  "),
            Span::styled("Ctrl+C", key_style()),
            Span::from(" Exit"),
        ]
    };
    let help = Paragraph::new(Line::from(help_spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

pub fn draw_restart_confirmation(f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(5)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Restart Quiz")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let message = Paragraph::new("Discard this attempt and return to the menu?")
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, chunks[1]);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Yes (Restart)  "),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::from(" No (Continue Quiz)  "),
        Span::styled("Ctrl+C", key_style()),
        Span::from(" Exit App"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
