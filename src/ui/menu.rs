use crate::app::{App, StatusMessage};
use crate::extract::PREVIEW_CHARS;
use crate::ui::layout::calculate_menu_chunks;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

fn key_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

fn title_paragraph(title: &str) -> Paragraph<'_> {
    Paragraph::new(title)
        .style(key_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
}

pub fn draw_menu(f: &mut Frame, app: &App) {
    let layout = calculate_menu_chunks(f.area());

    f.render_widget(
        title_paragraph("🧠 Gamified Case-Based Quiz Generator"),
        layout.header_area,
    );

    let documents_block = Block::default().borders(Borders::ALL).title("Documents");
    if app.documents.is_empty() {
        let empty = Paragraph::new(format!(
            "No PDF, DOCX, TXT or MD files in '{}'",
            app.config.documents_dir.display()
        ))
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true })
        .block(documents_block);
        f.render_widget(empty, layout.documents_area);
    } else {
        let items: Vec<ListItem> = app
            .documents
            .iter()
            .map(|path| {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                let opened = app.document.as_ref().is_some_and(|d| &d.path == path);
                if opened {
                    ListItem::new(format!("{} ✓", name))
                } else {
                    ListItem::new(name)
                }
            })
            .collect();

        let list = List::new(items)
            .block(documents_block)
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");
        let mut state = ListState::default();
        state.select(Some(app.selected_document));
        f.render_stateful_widget(list, layout.documents_area, &mut state);
    }

    let settings = Paragraph::new(vec![
        Line::from(vec![
            Span::from("Questions: "),
            Span::styled(format!("◀ {} ▶", app.question_count), key_style()),
        ]),
        Line::from(Span::styled(
            format!("Model: {}", app.config.model.model),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(Block::default().borders(Borders::ALL).title("Settings"));
    f.render_widget(settings, layout.settings_area);

    let preview = if let Some(raw) = &app.raw_response {
        Paragraph::new(raw.as_str())
            .style(Style::default().fg(Color::Yellow))
            .wrap(Wrap { trim: false })
            .scroll((app.raw_scroll, 0))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Raw model output (PgUp/PgDn to scroll)"),
            )
    } else if let Some(doc) = &app.document {
        Paragraph::new(doc.preview())
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(format!(
                "Preview: {} ({}, first {} chars)",
                doc.file_name(),
                doc.format.name(),
                PREVIEW_CHARS
            )))
    } else {
        Paragraph::new("Select a document and press Enter to extract its text.")
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Preview"))
    };
    f.render_widget(preview, layout.preview_area);

    f.render_widget(status_paragraph(app.status.as_ref()), layout.status_area);

    let help = Paragraph::new(Line::from(vec![
        Span::styled("↑/↓", key_style()),
        Span::from(" Select  "),
        Span::styled("Enter", key_style()),
        Span::from(" Open  "),
        Span::styled("←/→", key_style()),
        Span::from(" Questions  "),
        Span::styled("g", key_style()),
        Span::from(" Generate  "),
        Span::styled("q", key_style()),
        Span::from(" Quit"),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

fn status_paragraph(status: Option<&StatusMessage>) -> Paragraph<'static> {
    let (text, style) = match status {
        Some(StatusMessage::Info(msg)) => (msg.clone(), Style::default().fg(Color::Green)),
        Some(StatusMessage::Error(msg)) => (
            format!("⚠ {}", msg),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        None => (String::new(), Style::default()),
    };
    Paragraph::new(text)
        .style(style)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Status"))
}

pub fn draw_generating(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(5)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(0),
        ])
        .split(f.area());

    f.render_widget(title_paragraph("Generating questions..."), chunks[0]);

    let elapsed = app
        .generation_started
        .map(|t| t.elapsed())
        .unwrap_or_default();
    let spinner = SPINNER[(elapsed.as_millis() / 100) as usize % SPINNER.len()];
    let document = app
        .document
        .as_ref()
        .map(|d| d.file_name())
        .unwrap_or_default();

    let mut text = Text::default();
    text.push_line(Line::from(format!(
        "{} Asking {} for {} questions about {}",
        spinner, app.config.model.model, app.question_count, document
    )));
    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled(
        format!("{}s elapsed · Ctrl+C to exit", elapsed.as_secs()),
        Style::default().fg(Color::DarkGray),
    )));

    let body = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(body, chunks[1]);
}
