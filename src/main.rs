use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};
use tracing::info;
use typer::{
    app::{App, Control},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    logging::init_tracing,
    runtime::{CrosstermEventSource, FixedTicker, Runner},
    session::{Session, TICK_INTERVAL_MS},
    ui,
    word_source::{SupportedLanguage, WordSource},
};

/// one-minute typing test in your terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type the highlighted word and press space to submit it. The countdown starts with your first key; when it runs out you get your wpm, keystroke accuracy and word counts."
)]
pub struct Cli {
    /// length of a round in seconds
    #[clap(short = 's', long)]
    seconds: Option<u32>,

    /// number of words visible at once
    #[clap(short = 'w', long)]
    window_size: Option<usize>,

    /// number of grid columns
    #[clap(short = 'c', long)]
    columns: Option<u16>,

    /// built-in word list to use
    #[clap(short = 'l', long, value_enum)]
    language: Option<SupportedLanguage>,

    /// read whitespace-separated words from a file instead of a built-in list
    #[clap(short = 'f', long)]
    word_file: Option<PathBuf>,

    /// keep the word list in its original order
    #[clap(long)]
    no_shuffle: bool,

    /// persist the effective settings as the new defaults
    #[clap(long)]
    save_config: bool,

    /// log level for the log file (overridden by RUST_LOG)
    #[clap(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    /// Layer command line overrides on top of stored settings
    fn apply(&self, mut cfg: Config) -> Config {
        if let Some(secs) = self.seconds {
            cfg.duration_secs = secs;
        }
        if let Some(size) = self.window_size {
            cfg.window_size = size;
        }
        if let Some(columns) = self.columns {
            cfg.columns = columns;
        }
        if let Some(language) = self.language {
            cfg.language = language;
        }
        if self.no_shuffle {
            cfg.shuffle = false;
        }
        cfg
    }

    fn word_source(&self, cfg: &Config) -> typer::Result<WordSource> {
        let source = match &self.word_file {
            Some(path) => WordSource::from_file(path)?,
            None => cfg.language.load()?,
        };

        Ok(if cfg.shuffle {
            source.shuffled(&mut rand::thread_rng())
        } else {
            source
        })
    }

    fn build_app(&self, cfg: &Config) -> typer::Result<App> {
        let session = Session::new(self.word_source(cfg)?, cfg.session_config())?;
        Ok(App::new(session).with_columns(cfg.columns))
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let _log_guard = init_tracing(&AppDirs::log_dir(), &cli.log_level)?;

    let store = FileConfigStore::new();
    let cfg = cli.apply(store.load());
    if cli.save_config {
        store.save(&cfg)?;
        info!(path = %store.path().display(), "saved config");
    }

    let mut app = cli.build_app(&cfg)?;
    info!(
        words = app.session.source().name(),
        duration_secs = cfg.duration_secs,
        window_size = cfg.window_size,
        "starting"
    );

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let outcome = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    outcome
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let mut runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_INTERVAL_MS)),
    );

    loop {
        terminal.draw(|f| ui::draw(app, f))?;

        if app.step(&mut runner) == Control::Quit {
            info!("quit");
            return Ok(());
        }
    }
}
