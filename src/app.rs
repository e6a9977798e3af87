use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::archive::history::{now_epoch, HistoryStore, JsonFileStore, KvStore, MemoryStore};
use crate::archive::index::{list_children, list_roots};
use crate::archive::loader::{self, Library};
use crate::archive::nav::{Mode, NavigationState};
use crate::archive::record::TrackRecord;
use crate::archive::roots::RootRegistry;
use crate::archive::search::{search, Scope};
use crate::config::AppConfig;
use crate::theme::{resolve_theme, ThemeColors};

/// Which pane owns keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Search,
}

/// Raw search input buffer with a byte-offset cursor.
///
/// This is the display buffer only — the effective query applied to the
/// record set lags behind it by the debounce interval.
#[derive(Debug, Default)]
pub struct SearchInput {
    pub value: String,
    pub cursor: usize,
}

impl SearchInput {
    /// Insert a character at the current cursor position.
    pub fn insert_char(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character before the cursor (backspace).
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            let prev_char = self.value[..self.cursor]
                .chars()
                .next_back()
                .expect("cursor > 0 guarantees at least one char");
            self.cursor -= prev_char.len_utf8();
            self.value.remove(self.cursor);
        }
    }

    /// Move cursor left by one character.
    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            let prev_char = self.value[..self.cursor]
                .chars()
                .next_back()
                .expect("cursor > 0 guarantees at least one char");
            self.cursor -= prev_char.len_utf8();
        }
    }

    /// Move cursor right by one character.
    pub fn move_right(&mut self) {
        if self.cursor < self.value.len() {
            let next_char = self.value[self.cursor..]
                .chars()
                .next()
                .expect("cursor < len guarantees at least one char");
            self.cursor += next_char.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn set(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.value.len();
    }
}

/// A single row in the rendered listing. Folders always precede tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEntry {
    Folder { path: String, name: String },
    Track { id: String, label: String },
}

impl ListEntry {
    pub fn label(&self) -> &str {
        match self {
            ListEntry::Folder { name, .. } => name,
            ListEntry::Track { label, .. } => label,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, ListEntry::Folder { .. })
    }
}

/// Main application state.
pub struct App {
    pub records: Vec<TrackRecord>,
    pub roots: RootRegistry,
    pub nav: NavigationState,
    /// Full (unpaginated) current listing, folders first.
    pub entries: Vec<ListEntry>,
    pub selected_index: usize,
    pub scroll_offset: usize,
    pub focus: Focus,
    pub input: SearchInput,
    pub history: HistoryStore,
    pub theme: ThemeColors,
    pub status_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub watcher_active: bool,
    library_path: PathBuf,
    kv: Box<dyn KvStore>,
    debounce: Duration,
    /// Pending application of the raw input buffer as the effective query.
    /// Overwritten by each keystroke — superseded, never queued.
    query_deadline: Option<Instant>,
}

impl App {
    /// Create a new App over the given library, persisting state to the
    /// default on-disk location.
    pub fn new(library: Library, config: &AppConfig, library_path: PathBuf) -> Self {
        let kv: Box<dyn KvStore> = match JsonFileStore::default_path() {
            Some(path) => Box::new(JsonFileStore::open(path)),
            None => Box::new(MemoryStore::default()),
        };
        Self::with_store(library, config, library_path, kv)
    }

    /// Create a new App with an explicit persistence collaborator.
    pub fn with_store(
        library: Library,
        config: &AppConfig,
        library_path: PathBuf,
        kv: Box<dyn KvStore>,
    ) -> Self {
        let mut roots = RootRegistry::new(config.fixed_roots());
        roots.set_custom(library.custom_roots);
        let history = HistoryStore::load(kv.as_ref(), now_epoch());

        let mut app = Self {
            records: library.tracks,
            roots,
            nav: NavigationState::new(config.page_size()),
            entries: Vec::new(),
            selected_index: 0,
            scroll_offset: 0,
            focus: Focus::List,
            input: SearchInput::default(),
            history,
            theme: resolve_theme(&config.theme),
            status_message: None,
            should_quit: false,
            watcher_active: true,
            library_path,
            kv,
            debounce: Duration::from_millis(config.search_debounce_ms()),
            query_deadline: None,
        };
        app.refresh();
        app
    }

    /// Recompute the current listing from the record set and navigation
    /// state. Cheap and total — nothing is cached across record
    /// replacements, so the listing can never be stale.
    pub fn refresh(&mut self) {
        let target = self.nav.target_path().to_string();
        let listing = match self.nav.mode() {
            Mode::Browsing if target.is_empty() => list_roots(&self.records, &self.roots),
            Mode::Browsing => list_children(&self.records, &target),
            Mode::Searching => search(&self.records, self.nav.query(), self.nav.scope(), &target),
        };
        self.entries = listing
            .folders
            .into_iter()
            .map(|f| ListEntry::Folder {
                path: f.path,
                name: f.name,
            })
            .chain(listing.tracks.into_iter().map(|t| ListEntry::Track {
                id: t.id,
                label: t.label,
            }))
            .collect();
        self.clamp_selection();
    }

    /// The visible prefix of the listing under the current render limit.
    pub fn visible_entries(&self) -> &[ListEntry] {
        self.nav.pagination.visible(&self.entries)
    }

    /// Whether more entries exist beyond the render limit.
    pub fn has_more(&self) -> bool {
        self.nav.pagination.has_more(self.entries.len())
    }

    /// How many entries are hidden behind the render limit.
    pub fn hidden_count(&self) -> usize {
        self.entries.len().saturating_sub(self.visible_entries().len())
    }

    /// Reveal one more page of results.
    pub fn load_more(&mut self) {
        self.nav.pagination.load_more(self.entries.len());
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_entries().len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }

    // ── Selection ───────────────────────────────────────────────────────────

    pub fn select_next(&mut self) {
        let len = self.visible_entries().len();
        if len > 0 && self.selected_index < len - 1 {
            self.selected_index += 1;
        }
    }

    pub fn select_previous(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        let len = self.visible_entries().len();
        if len > 0 {
            self.selected_index = len - 1;
        }
    }

    /// Update the scroll offset to ensure the selected item is visible.
    pub fn update_scroll(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + visible_height {
            self.scroll_offset = self.selected_index - visible_height + 1;
        }
    }

    // ── Navigation ──────────────────────────────────────────────────────────

    /// Enter the selected folder, or show track details for a track row.
    pub fn activate_selected(&mut self) {
        let Some(entry) = self.visible_entries().get(self.selected_index).cloned() else {
            return;
        };
        match entry {
            ListEntry::Folder { path, .. } => {
                // A folder click always lands back in browse mode there.
                self.input.clear();
                self.query_deadline = None;
                self.nav.navigate_into(&path, &self.roots);
                self.selected_index = 0;
                self.scroll_offset = 0;
                self.refresh();
            }
            ListEntry::Track { id, label } => {
                let performer = self
                    .records
                    .iter()
                    .find(|r| r.id == id)
                    .and_then(|r| r.performer.as_deref());
                match performer {
                    Some(p) => self.set_status_message(format!("♪ {} — {}", label, p)),
                    None => self.set_status_message(format!("♪ {}", label)),
                }
            }
        }
    }

    /// Go up one level. Valid only while browsing below a root's top level.
    pub fn navigate_up(&mut self) {
        let before = self.nav.current_path().to_string();
        self.nav.navigate_up();
        if self.nav.current_path() != before {
            self.selected_index = 0;
            self.scroll_offset = 0;
            self.refresh();
        }
    }

    /// Activate a root by name. Idempotent: re-selecting the active root
    /// still resets path, query, and scope.
    pub fn select_root(&mut self, root: &str) {
        self.input.clear();
        self.query_deadline = None;
        self.nav.select_root(root);
        self.selected_index = 0;
        self.scroll_offset = 0;
        self.refresh();
    }

    /// Cycle through the registry's roots relative to the active one.
    pub fn cycle_root(&mut self, delta: isize) {
        if self.roots.is_empty() {
            return;
        }
        let names: Vec<String> = self.roots.all().map(str::to_string).collect();
        let next = match self.nav.active_root() {
            Some(active) => {
                let idx = names.iter().position(|n| n == active).unwrap_or(0) as isize;
                (idx + delta).rem_euclid(names.len() as isize) as usize
            }
            None => {
                if delta >= 0 {
                    0
                } else {
                    names.len() - 1
                }
            }
        };
        self.select_root(&names[next]);
    }

    // ── Search ──────────────────────────────────────────────────────────────

    /// Restart the debounce window after a raw input edit. The effective
    /// query updates only after the quiet interval elapses.
    pub fn on_query_input(&mut self) {
        self.query_deadline = Some(Instant::now() + self.debounce);
    }

    /// Periodic tick: apply a due debounced query and expire old status
    /// messages.
    pub fn tick(&mut self) {
        if let Some(deadline) = self.query_deadline {
            if Instant::now() >= deadline {
                self.query_deadline = None;
                self.nav.set_query(&self.input.value);
                self.selected_index = 0;
                self.scroll_offset = 0;
                self.refresh();
            }
        }
        self.clear_expired_status();
    }

    /// Commit the search: apply the buffered query immediately and record
    /// the term in history.
    pub fn commit_search(&mut self) {
        self.query_deadline = None;
        let term = self.input.value.trim().to_string();
        self.nav.set_query(&self.input.value);
        self.selected_index = 0;
        self.scroll_offset = 0;
        self.refresh();
        if !term.is_empty() {
            self.history.record(&term, now_epoch());
            self.history.save(self.kv.as_mut());
            info!(term = %term, scope = self.nav.scope().label(), "search committed");
        }
    }

    /// Clear the search buffer and return to browsing at the current
    /// location.
    pub fn clear_search(&mut self) {
        self.input.clear();
        self.query_deadline = None;
        self.nav.set_query("");
        self.selected_index = 0;
        self.scroll_offset = 0;
        self.refresh();
    }

    /// Toggle between local and global scope. No-op unless searching.
    pub fn toggle_scope(&mut self) {
        let next = self.nav.scope().toggled();
        self.nav.set_scope(next);
        self.refresh();
    }

    /// Whether the recent-searches overlay should be shown: search focused
    /// with an empty buffer.
    pub fn show_history(&self) -> bool {
        self.focus == Focus::Search && self.input.value.is_empty()
    }

    /// Re-run a recent search term by its position in the displayed list.
    pub fn use_history_entry(&mut self, index: usize) {
        let term = self
            .history
            .display(now_epoch())
            .get(index)
            .map(|(term, _)| term.to_string());
        if let Some(term) = term {
            self.input.set(&term);
            self.commit_search();
        }
    }

    // ── Library ─────────────────────────────────────────────────────────────

    /// Replace the working set wholesale. Derived listings and the custom
    /// root list are recomputed, never carried over.
    pub fn replace_library(&mut self, library: Library) {
        self.records = library.tracks;
        self.roots.set_custom(library.custom_roots);
        self.nav.rederive_root(&self.roots);
        self.refresh();
    }

    /// Reload the library file. A failed reload keeps the previous record
    /// set.
    pub fn reload_library(&mut self) {
        match loader::load_library(&self.library_path) {
            Ok(library) => {
                let count = library.tracks.len();
                self.replace_library(library);
                info!(count, "library reloaded");
                self.set_status_message(format!("Library reloaded: {} tracks", count));
            }
            Err(e) => {
                warn!(error = %e, "library reload failed");
                self.set_status_message(format!("⚠ Reload failed: {}", e));
            }
        }
    }

    // ── Status ──────────────────────────────────────────────────────────────

    /// Set a status message with current timestamp.
    pub fn set_status_message(&mut self, msg: String) {
        self.status_message = Some((msg, Instant::now()));
    }

    /// Clear the status message if it has been displayed for more than 3 seconds.
    pub fn clear_expired_status(&mut self) {
        if let Some((_, ref created)) = self.status_message {
            if created.elapsed().as_secs() > 3 {
                self.status_message = None;
            }
        }
    }

    /// Quit the application.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Effective scope for display purposes.
    pub fn scope(&self) -> Scope {
        self.nav.scope()
    }
}
