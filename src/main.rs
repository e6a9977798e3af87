mod app;
mod archive;
mod components;
mod config;
mod error;
mod event;
mod handler;
mod logging;
mod theme;
mod tui;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::{info, warn};

use crate::app::App;
use crate::archive::watcher::LibraryWatcher;
use crate::config::AppConfig;
use crate::event::{Event, EventHandler};
use crate::tui::{install_panic_hook, Tui};

/// A terminal browser for flat, path-tagged audio archives.
#[derive(Parser, Debug)]
#[command(name = "fonoteca_tui", version, about)]
struct Cli {
    /// Library file with the full record collection (JSON array)
    library: Option<PathBuf>,

    /// Explicit config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Disable the library watcher (auto-reload)
    #[arg(long)]
    no_watcher: bool,

    /// Log file path (defaults to the user data directory)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> error::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref(), None);
    let _log_guard = logging::init(cli.log_file.as_deref());

    let library_path = cli
        .library
        .clone()
        .or_else(|| config.library())
        .ok_or_else(|| {
            error::AppError::Library(
                "no library file given (pass a path or set [general] library in config)".into(),
            )
        })?;

    let library = archive::loader::load_library(&library_path)?;
    info!(count = library.tracks.len(), path = %library_path.display(), "library loaded");
    let library_path = library_path.canonicalize().unwrap_or(library_path);

    install_panic_hook();

    let mut tui = Tui::new(config.mouse_enabled())?;
    let mut app = App::new(library, &config, library_path.clone());
    let mut events = EventHandler::new(Duration::from_millis(16));
    let event_tx = events.sender();

    // Library watcher (unless --no-watcher or disabled in config)
    let _watcher = if cli.no_watcher || !config.watcher_enabled() {
        app.watcher_active = false;
        None
    } else {
        match LibraryWatcher::new(
            &library_path,
            Duration::from_millis(config.watcher_debounce_ms()),
            event_tx.clone(),
        ) {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                warn!(error = %e, "library watcher unavailable");
                app.watcher_active = false;
                app.set_status_message(format!("⚠ Watcher unavailable: {}", e));
                None
            }
        }
    };

    loop {
        tui.terminal_mut().draw(|frame| {
            ui::render(&mut app, frame);
        })?;

        match events.next().await? {
            Event::Key(key) => handler::handle_key_event(&mut app, key),
            Event::Mouse(mouse) => handler::handle_mouse_event(&mut app, mouse),
            Event::Tick => app.tick(),
            Event::Resize(_, _) => {}
            Event::LibraryChanged => app.reload_library(),
        }

        if app.should_quit {
            break;
        }
    }

    tui.restore()?;
    Ok(())
}
