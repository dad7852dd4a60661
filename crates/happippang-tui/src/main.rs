//! Happippang - a terminal client for daily shop inventory.
//!
//! Signs in against the inventory API and records per-item stock in and out
//! for a shop and date. Run with a path (`/login`, `/inventory/create`) to
//! start on that page, or with `--login`, `--logout` or `--whoami` for the
//! command-line equivalents.

mod app;
mod cli;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use happippang_core::{Config, Services};

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

const LOG_FILE_PREFIX: &str = "happippang.log";

fn env_filter() -> EnvFilter {
    // RUST_LOG controls the level (e.g. RUST_LOG=happippang_core=debug)
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Log to stderr; used by the command-line modes
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter())
        .init();
}

/// Log to a daily file under the cache directory, since stderr belongs to
/// the terminal UI. The guard must live until exit to flush the writer.
fn init_tui_tracing(config: &Config) -> Result<WorkerGuard> {
    let log_dir = config.cache_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(env_filter())
        .init();
    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let mut config = Config::load()?;

    // Check for CLI commands
    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str);
    if let Some(flag @ ("--login" | "--logout" | "--whoami")) = command {
        init_cli_tracing();
        let services = Services::from_config(&config)?;
        return match flag {
            "--login" => cli::login(&services, &mut config).await,
            "--logout" => cli::logout(&services).await,
            _ => cli::whoami(&services).await,
        };
    }
    let initial_path = command
        .filter(|arg| arg.starts_with('/'))
        .unwrap_or("/")
        .to_string();

    let _log_guard = init_tui_tracing(&config)?;
    info!(api = %config.api_base_url(), "Happippang starting");

    // Wire before touching the terminal so errors print normally
    let services = Services::from_config(&config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, services, &initial_path);

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("Happippang shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Routing, auth resolution and finished loads
        app.tick();

        // Draw UI; protected pages decide only after a frame is on screen
        terminal.draw(|f| render(f, app))?;
        app.hydrate();

        // Poll for events with timeout to allow background updates
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                if handle_input(app, key).await? {
                    return Ok(());
                }
            }
        }

        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
