use crate::session::QuizSession;
use crate::ui::layout::calculate_summary_chunks;
use crate::utils::truncate_string;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw_summary(f: &mut Frame, session: &QuizSession) {
    let layout = calculate_summary_chunks(f.area());

    let title = Paragraph::new("🎉 Quiz complete!")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let mut summary_text = Text::default();
    summary_text.push_line(Line::from(Span::styled(
        format!("Final Score: {} / {}", session.score(), session.len()),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    summary_text.push_line(Line::from(format!(
        "Current streak: {}   Best streak: {}",
        session.streak(),
        session.best_streak()
    )));
    summary_text.push_line(Line::from(""));

    for (i, (question, response)) in session
        .questions()
        .iter()
        .zip(session.responses())
        .enumerate()
    {
        let (mark, style) = if response.correct {
            ("✓", Style::default().fg(Color::Green))
        } else {
            ("✗", Style::default().fg(Color::Red))
        };
        summary_text.push_line(Line::from(vec![
            Span::styled(format!("[{}] ", mark), style),
            Span::from(format!(
                "{}. {}",
                i + 1,
                truncate_string(&question.question, 60)
            )),
        ]));
        summary_text.push_line(Line::from(format!(
            "    Your answer: {}   Correct: {}",
            response.selected, question.correct
        )));
    }

    let summary = Paragraph::new(summary_text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Results"));
    f.render_widget(summary, layout.content_area);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "r",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Restart  "),
        Span::styled(
            "q",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}
