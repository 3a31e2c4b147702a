use clap::Parser;
use colored::Colorize;
use crossbeam_channel::{bounded, Receiver};
use dialoguer::{theme::ColorfulTheme, BasicHistory, Input};
use std::io;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use docscout::{
    ChangeDirectory, CliOverrides, InputEvent, LineInput, SearchCoordinator, SearchError, Session,
    SessionConfig,
};

type Result<T> = std::result::Result<T, SearchError>;

/// Interactive, case-insensitive content search across document formats.
///
/// Prompts for a directory, then repeatedly accepts search terms; every
/// search scans the whole tree fresh. Ctrl+Z changes the directory,
/// Ctrl+C exits.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory to search in (prompted for interactively when omitted)
    directory: Option<PathBuf>,

    /// Number of worker threads (default: CPU cores)
    #[arg(short = 'j', long)]
    threads: Option<NonZeroUsize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Path to a configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Terminal line-input provider: themed prompt with in-session history.
struct TerminalInput {
    theme: ColorfulTheme,
    history: BasicHistory,
}

impl TerminalInput {
    fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
            history: BasicHistory::new(),
        }
    }
}

impl LineInput for TerminalInput {
    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        let entry = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt.trim_start_matches('\n'))
            .allow_empty(true)
            .history_with(&mut self.history)
            .interact_text();
        match entry {
            Ok(line) => Ok(InputEvent::Line(line)),
            // Ctrl+C aborts the prompt; a signal landing mid-read does too.
            // The session decides which of the two it was.
            Err(_) => Ok(InputEvent::Interrupted),
        }
    }
}

/// Builds the directory-change side channel. On Unix, SIGTSTP (Ctrl+Z) is
/// forwarded onto it from a dedicated thread; the session polls the channel
/// between states and the signal handler never touches session state.
fn change_directory_channel() -> Receiver<ChangeDirectory> {
    let (tx, rx) = bounded(1);

    #[cfg(unix)]
    {
        use signal_hook::consts::SIGTSTP;
        use signal_hook::iterator::Signals;

        std::thread::spawn(move || {
            let mut signals = match Signals::new([SIGTSTP]) {
                Ok(signals) => signals,
                Err(_) => return,
            };
            for _ in signals.forever() {
                match tx.try_send(ChangeDirectory) {
                    Ok(()) => {}
                    // A full buffer means a request is already pending.
                    Err(crossbeam_channel::TrySendError::Full(_)) => {}
                    Err(crossbeam_channel::TrySendError::Disconnected(_)) => break,
                }
            }
        });
    }
    #[cfg(not(unix))]
    drop(tx);

    rx
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = SessionConfig::load_from(cli.config.as_deref())
        .map_err(|e| SearchError::config_error(e.to_string()))?
        .merge_with_cli(CliOverrides {
            thread_count: cli.threads,
            log_level: cli.log_level,
            default_directory: cli.directory,
        });

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let coordinator = SearchCoordinator::new(config.thread_count)?;
    let changes = change_directory_channel();
    let mut session = Session::new(TerminalInput::new(), coordinator, changes);
    if let Some(dir) = &config.default_directory {
        session = session.with_directory(dir);
    }
    session.run()
}
