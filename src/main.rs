use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use n400_practice::{
    App, AppError, BookmarkStore, Cli, Config, QuestionBank, SpeechSequencer, db,
    load_question_bank,
    logger::FileLogger,
    speech::{CommandEngine, SilentEngine, SpeechBackend, SpeechEngine},
    ui,
};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn main() -> Result<(), AppError> {
    let config = Config::from(Cli::parse());
    FileLogger::open(&config.log_file, config.log_level)?.init()?;
    log::info!("Starting n400-practice with {:?} speech", config.speech_backend);

    let bank = match load_question_bank(&config.data_path) {
        Ok(bank) => {
            log::info!(
                "Loaded {} personal, {} part 9 and {} glossary items from {}",
                bank.personal.len(),
                bank.part9.len(),
                bank.glossary.len(),
                config.data_path.display()
            );
            bank
        }
        Err(e) => {
            log::error!("Failed to load {}: {}", config.data_path.display(), e);
            QuestionBank::default()
        }
    };

    let bookmarks = BookmarkStore::open(db::init_db(&config.db_path)?)?;

    let engine: Box<dyn SpeechEngine> = match config.speech_backend {
        SpeechBackend::Silent => Box::new(SilentEngine::default()),
        backend => Box::new(CommandEngine::new(backend)),
    };
    let speech = SpeechSequencer::new(engine, config.speech.clone());
    let mut app = App::new(bank, speech, bookmarks);

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
        log::error!("Exited with error: {}", e);
    }
    result
}

fn run<B: Backend, E: SpeechEngine>(
    terminal: &mut Terminal<B>,
    app: &mut App<E>,
) -> Result<(), AppError> {
    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key, Instant::now());
            }
        }
        app.tick(Instant::now());
    }
    Ok(())
}
