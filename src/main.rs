#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::io::{self, stdout};

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{info, warn};

use resfeber::config::Settings;
use resfeber::lookup::PlaceCatalog;
use resfeber::tui::{App, AppError};
use resfeber::{logging, storage};

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load().map_err(AppError::from)?;
    let data_dir = storage::data_dir().map_err(AppError::from)?;
    let _log_guard = logging::init(&data_dir, settings.level());
    info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let catalog = match &settings.places_file {
        Some(path) => runtime
            .block_on(PlaceCatalog::load(path))
            .map_err(AppError::from)?,
        None => PlaceCatalog::builtin(),
    };
    if catalog.places().is_empty() {
        warn!("place catalog is empty; location search will find nothing");
    }

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = App::new(settings, catalog, runtime);
    let result = app.run(&mut terminal);

    let restore_result = restore_terminal();
    info!("exiting");
    match result {
        Err(e) => Err(e.into()),
        Ok(()) => restore_result.map_err(Into::into),
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn restore_terminal() -> Result<(), io::Error> {
    let raw_result = disable_raw_mode();
    let screen_result = execute!(stdout(), LeaveAlternateScreen);
    raw_result.and(screen_result)
}
