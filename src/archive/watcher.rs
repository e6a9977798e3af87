//! Library file watcher: turns on-disk changes to the library file into
//! reload events, debounced so editor write bursts collapse to one reload.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use tokio::sync::mpsc;
use tracing::debug;

use crate::event::Event;

/// Default debounce interval in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Watches the library file and sends `Event::LibraryChanged` when it is
/// modified or replaced.
pub struct LibraryWatcher {
    /// Handle to the debouncer (dropped to stop watching).
    _debouncer: notify_debouncer_mini::Debouncer<notify::RecommendedWatcher>,
}

impl LibraryWatcher {
    /// Watch `library_path` for changes.
    ///
    /// The parent directory is watched rather than the file itself: editors
    /// and exporters replace the file by rename, which drops a direct inode
    /// watch. Events for sibling files are filtered out by path.
    pub fn new(
        library_path: &Path,
        debounce: Duration,
        event_tx: mpsc::UnboundedSender<Event>,
    ) -> notify::Result<Self> {
        let library_path = library_path.to_path_buf();
        let watch_target = library_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| library_path.clone());

        let filter_path = library_path.clone();
        let mut debouncer = new_debouncer(
            debounce,
            move |result: Result<Vec<notify_debouncer_mini::DebouncedEvent>, notify::Error>| {
                match result {
                    Ok(events) => {
                        if events
                            .iter()
                            .filter(|e| e.kind == DebouncedEventKind::Any)
                            .any(|e| is_library_event(&e.path, &filter_path))
                        {
                            debug!("library file changed on disk");
                            let _ = event_tx.send(Event::LibraryChanged);
                        }
                    }
                    Err(_errors) => {
                        // Watcher errors are non-fatal; silently ignore
                    }
                }
            },
        )?;

        debouncer
            .watcher()
            .watch(&watch_target, notify::RecursiveMode::NonRecursive)?;

        Ok(Self {
            _debouncer: debouncer,
        })
    }
}

/// Whether an event path refers to the watched library file.
///
/// Compared by file name within the watched directory: rename-replace
/// cycles report paths that may not string-match the canonical library
/// path exactly.
fn is_library_event(event_path: &Path, library_path: &Path) -> bool {
    if event_path == library_path {
        return true;
    }
    match (event_path.file_name(), library_path.file_name()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_path_matches() {
        let library = PathBuf::from("/data/tracks.json");
        assert!(is_library_event(Path::new("/data/tracks.json"), &library));
    }

    #[test]
    fn same_file_name_matches() {
        let library = PathBuf::from("/data/tracks.json");
        assert!(is_library_event(Path::new("tracks.json"), &library));
    }

    #[test]
    fn sibling_files_do_not_match() {
        let library = PathBuf::from("/data/tracks.json");
        assert!(!is_library_event(Path::new("/data/other.json"), &library));
        assert!(!is_library_event(Path::new("/data/tracks.json.bak"), &library));
    }

    #[test]
    fn directory_event_does_not_match() {
        let library = PathBuf::from("/data/tracks.json");
        assert!(!is_library_event(Path::new("/data"), &library));
    }
}
