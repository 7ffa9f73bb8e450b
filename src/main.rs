use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use interactive_case_quiz::ai::client::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use interactive_case_quiz::config::{
    DEFAULT_COUNTDOWN_SECS, DEFAULT_LOG_FILE, DEFAULT_QUESTION_COUNT,
};
use interactive_case_quiz::{
    logger, spawn_generation_worker, ui, App, ModelConfig, OpenRouterGenerator, QuizConfig,
    DEFAULT_MODEL,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

const TICK: Duration = Duration::from_millis(200);

/// Turn a PDF, DOCX, TXT or Markdown document into a timed multiple-choice case quiz.
///
/// Questions are generated through OpenRouter; set OPENROUTER_API_KEY before
/// pressing `g` in the menu.
#[derive(Parser, Debug)]
#[command(name = "case-quiz", version, about)]
struct Cli {
    /// Document to open at start-up.
    document: Option<PathBuf>,

    /// Directory listed in the document menu.
    #[arg(short, long, env = "CASE_QUIZ_DIR", default_value = ".")]
    dir: PathBuf,

    /// Number of questions to generate (1-10).
    #[arg(short = 'n', long, env = "CASE_QUIZ_COUNT", default_value_t = DEFAULT_QUESTION_COUNT,
          value_parser = clap::value_parser!(u8).range(1..=10))]
    count: u8,

    /// OpenRouter model ID.
    #[arg(short, long, env = "CASE_QUIZ_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Sampling temperature.
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
    temperature: f32,

    /// Maximum tokens in the model's answer.
    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
    max_tokens: u32,

    /// Seconds per question for the countdown; 0 hides it.
    #[arg(long, default_value_t = DEFAULT_COUNTDOWN_SECS)]
    countdown: u64,

    /// Append a Markdown transcript of each attempt to this file.
    #[arg(short, long, env = "CASE_QUIZ_TRANSCRIPT")]
    transcript: Option<PathBuf>,

    /// Log file (the terminal is taken by the UI).
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> QuizConfig {
        QuizConfig {
            documents_dir: self.dir,
            initial_document: self.document,
            question_count: self.count,
            countdown_secs: self.countdown,
            model: ModelConfig {
                model: self.model,
                temperature: Some(self.temperature),
                max_tokens: Some(self.max_tokens),
            },
            transcript_path: self.transcript,
            log_file: self.log_file,
        }
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    let config = cli.into_config();

    logger::init(&config.log_file, verbose)?;
    info!(model = %config.model.model, dir = %config.documents_dir.display(), "starting");

    let (request_tx, request_rx) = crossbeam_channel::unbounded();
    let (response_tx, response_rx) = crossbeam_channel::unbounded();
    let generator = Arc::new(OpenRouterGenerator::new(config.model.clone()));
    let worker = spawn_generation_worker(generator, response_tx, request_rx)?;

    let mut app = App::new(config, request_tx, response_rx);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!(error = %e, "terminal loop failed");
    }

    // Dropping the app closes the request channel and lets the worker exit.
    // An in-flight request is abandoned rather than awaited.
    drop(app);
    if worker.is_finished() {
        let _ = worker.join();
    }
    info!("exiting");

    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
        app.poll_generation();

        if app.should_quit {
            return Ok(());
        }
    }
}
