use std::io;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use folio::config::AppConfig;
use folio::core::logging;
use folio::core::preference::ThemePreference;
use folio::tui::app::AppState;
use folio::tui::services::Services;

#[derive(Parser)]
#[command(
    name = "folio",
    version,
    about = "Folio - a personal portfolio that lives in your terminal"
)]
struct Cli {
    /// Config file to use instead of ~/.config/folio/config.toml.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory for preferences and logs.
    #[arg(long = "data-dir", value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Start with this theme and remember it.
    #[arg(long, value_enum)]
    theme: Option<ThemeArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for ThemePreference {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => ThemePreference::Light,
            ThemeArg::Dark => ThemePreference::Dark,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    // Reported after logging starts
    let (mut config, config_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    if let Some(dir) = cli.data_dir {
        config.data.data_dir = Some(dir);
    }

    let data_dir = config.data_dir();
    let _log_guard = logging::init_tui(&logging::default_log_dir(Some(&data_dir)));
    log::info!("{} v{} starting", folio::NAME, folio::VERSION);
    if let Some(e) = config_error {
        log::warn!("{e}, using defaults");
    }

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let services = Services::init(&config, event_tx)?;

    if let Some(theme) = cli.theme {
        if let Err(e) = services.preferences.set(theme.into()) {
            log::warn!("Could not save --theme: {e}");
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if config.tui.mouse_enabled {
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    } else {
        execute!(stdout, EnterAlternateScreen)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = AppState::new(event_rx, services, &config.tui);
    let result = app.run(&mut terminal, config.tui.tick_rate()).await;

    // Restore terminal
    disable_raw_mode()?;
    if config.tui.mouse_enabled {
        execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    } else {
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    }
    terminal.show_cursor()?;

    if let Err(e) = result {
        log::error!("Terminal error: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    log::info!("Goodbye");
    Ok(())
}
