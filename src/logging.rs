//! File-backed tracing setup.
//!
//! The terminal owns stdout/stderr while the TUI runs, so diagnostics go to
//! a log file. Filtering follows `FONOTECA_LOG` (tracing env-filter syntax),
//! defaulting to `info`.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Default log file location under the user data directory.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("fonoteca").join("fonoteca.log"))
}

/// Initialize the global tracing subscriber writing to `path`.
///
/// Returns the appender guard that must stay alive for the duration of the
/// process, or `None` when the log file cannot be set up — the app runs
/// without logging in that case.
pub fn init(path: Option<&Path>) -> Option<WorkerGuard> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_log_path()?,
    };
    let parent = path.parent()?;
    std::fs::create_dir_all(parent).ok()?;
    let file_name = path.file_name()?;

    let appender = tracing_appender::rolling::never(parent, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env("FONOTECA_LOG")
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init();

    match result {
        Ok(()) => Some(guard),
        Err(_) => None,
    }
}
