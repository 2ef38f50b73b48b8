//! Life Calendar - Terminal-based life calendar viewer
//!
//! Shows a person's life as a grid of ~30-day months colored by life period,
//! loaded from YAML files in a data directory.

use anyhow::Result;
use clap::Parser;
use lifecal::catalog::{ensure_data_dir, resolve_config_name, scan_catalog};
use lifecal::config::Config;
use lifecal::constants::{APP_BINARY_NAME, APP_NAME};
use lifecal::logging;
use lifecal::tui::{self, AppState, Theme};
use std::path::PathBuf;

/// Life Calendar - Terminal-based life calendar viewer
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Life config to open, by name (`ada`) or file name (`ada.yaml`) in the data directory
    #[arg(value_name = "FILE")]
    file: Option<String>,

    /// Directory holding life config YAML files
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (router, _logging_guards) = logging::init(cli.verbose);

    tracing::debug!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));

    // Load or fall back to default settings
    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load settings, using defaults: {e:#}");
        Config::default()
    });

    // First run: write the defaults so there is a settings file to edit
    if !Config::exists() {
        if let Err(e) = config.save() {
            tracing::warn!("Failed to write default settings: {e:#}");
        }
    }

    let data_dir = cli
        .data_dir
        .unwrap_or_else(|| config.paths.data_dir.clone());

    if let Err(e) = ensure_data_dir(&data_dir) {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }

    let catalog = scan_catalog(&data_dir).unwrap_or_else(|e| {
        tracing::error!("{e:#}");
        Vec::new()
    });

    let theme = Theme::from_mode(config.ui.theme_mode);
    let mut app_state = AppState::new(config, data_dir.clone(), catalog, theme);

    if let Some(name) = cli.file.as_deref() {
        let path = resolve_config_name(&data_dir, name);
        if !path.is_file() {
            tracing::error!("File '{}' not found", path.display());
            std::process::exit(1);
        }
        if let Err(e) = app_state.open_file(&path) {
            tracing::error!("{e:#}");
            std::process::exit(1);
        }
    }

    // Initialize TUI; stderr belongs to the terminal from here on
    router.route_to_file();
    let mut terminal = match tui::setup_terminal() {
        Ok(terminal) => terminal,
        Err(e) => {
            router.route_to_stderr();
            return Err(e);
        }
    };

    // Run main TUI loop
    let result = tui::run_tui(&mut app_state, &mut terminal);

    // Restore terminal
    let restored = tui::restore_terminal(terminal);
    router.route_to_stderr();

    // Check for errors
    result?;
    restored
}
