use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use connect_four::config::AppConfig;
use connect_four::controller::Prompter;
use connect_four::game::GameState;
use connect_four::ui::App;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Play Connect Four against another person at the same keyboard.
#[derive(Parser)]
#[command(name = "connect_four", about = "Two-player Connect Four in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Play in the interactive terminal UI instead of the text prompt
    #[arg(long)]
    tui: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let config_found = cli.config.exists();
    let config = if config_found {
        AppConfig::load(&cli.config)
            .with_context(|| format!("loading config from {}", cli.config.display()))?
    } else {
        AppConfig::default()
    };

    init_tracing(&config.logging.filter);
    if !config_found {
        warn!(path = %cli.config.display(), "config file not found, using defaults");
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompter = Prompter::new(stdin.lock(), stdout.lock(), config.display);
    let mut state = prompter.setup_game().context("setting up players")?;

    if cli.tui {
        drop(prompter);
        run_tui(state).context("running terminal UI")?;
    } else {
        prompter.play(&mut state).context("playing game")?;
    }
    Ok(())
}

/// Log to stderr so records never interleave with the prompts on stdout.
/// `RUST_LOG` wins over the configured filter.
fn init_tracing(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();
}

fn run_tui(state: GameState) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(state);
    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    if let Some(message) = app.game_state().end_message() {
        println!("{message}");
    }
    res
}
