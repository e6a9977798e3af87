//! Recent-search history: a small bounded recency list with a load-time TTL,
//! persisted through a caller-supplied key-value collaborator.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Key under which the recent-search list is persisted.
pub const HISTORY_KEY: &str = "recent_searches";
/// Maximum number of retained entries.
pub const MAX_ENTRIES: usize = 5;
/// Entries at least this old are dropped at load time.
pub const TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Seconds since the Unix epoch.
pub fn now_epoch() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Simple key-value persistence collaborator.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory `KvStore`, used in tests and as a fallback when no state file
/// location is available.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// `KvStore` backed by a single JSON object file. A missing or unreadable
/// file starts empty; write failures are logged and otherwise ignored.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl JsonFileStore {
    pub fn open(path: PathBuf) -> Self {
        let values = std::fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        Self { path, values }
    }

    /// Default on-disk location under the user data directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("fonoteca").join("state.json"))
    }
}

impl KvStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match serde_json::to_string(&self.values) {
            Ok(raw) => {
                if let Err(e) = std::fs::write(&self.path, raw) {
                    warn!(path = %self.path.display(), error = %e, "failed to persist state");
                }
            }
            Err(e) => warn!(error = %e, "failed to serialize state"),
        }
    }
}

/// A single recorded search term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub term: String,
    /// Seconds since the Unix epoch when the term was committed.
    pub timestamp: u64,
}

/// Coarse age label for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBucket {
    JustNow,
    MinutesAgo(u64),
    HoursAgo(u64),
}

impl AgeBucket {
    pub fn from_age(age_secs: u64) -> Self {
        match age_secs {
            0..=59 => AgeBucket::JustNow,
            60..=3599 => AgeBucket::MinutesAgo(age_secs / 60),
            _ => AgeBucket::HoursAgo(age_secs / 3600),
        }
    }
}

impl fmt::Display for AgeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgeBucket::JustNow => write!(f, "just now"),
            AgeBucket::MinutesAgo(m) => write!(f, "{}m ago", m),
            AgeBucket::HoursAgo(h) => write!(f, "{}h ago", h),
        }
    }
}

/// Bounded, deduplicated recent-search list.
///
/// Newest first. Duplicate terms (case-insensitive) move to the front
/// instead of growing the list. Expired entries are physically purged only
/// at load time; reads just filter them out.
#[derive(Debug, Default)]
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// Load from the collaborator, pruning entries past the TTL. Absent or
    /// corrupt raw data loads as an empty history, never an error.
    pub fn load(kv: &dyn KvStore, now: u64) -> Self {
        let raw = kv.get(HISTORY_KEY);
        Self {
            entries: Self::parse_and_prune(raw.as_deref(), now),
        }
    }

    fn parse_and_prune(raw: Option<&str>, now: u64) -> Vec<HistoryEntry> {
        let Some(raw) = raw else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<HistoryEntry>>(raw) {
            Ok(entries) => entries.into_iter().filter(|e| !expired(e, now)).collect(),
            Err(e) => {
                warn!(error = %e, "discarding unreadable search history");
                Vec::new()
            }
        }
    }

    /// Record a committed search term. Empty-after-trim terms are ignored;
    /// an existing entry with the same term (case-insensitive) is removed
    /// before the new one is prepended; the list is truncated to the
    /// maximum count.
    pub fn record(&mut self, term: &str, now: u64) {
        let term = term.trim();
        if term.is_empty() {
            return;
        }
        let lowered = term.to_lowercase();
        self.entries.retain(|e| e.term.to_lowercase() != lowered);
        self.entries.insert(
            0,
            HistoryEntry {
                term: term.to_string(),
                timestamp: now,
            },
        );
        self.entries.truncate(MAX_ENTRIES);
    }

    /// Entries newer than `now - TTL`, newest first. Does not purge.
    pub fn recent(&self, now: u64) -> Vec<&HistoryEntry> {
        self.entries.iter().filter(|e| !expired(e, now)).collect()
    }

    /// `(term, age bucket)` pairs for display, newest first.
    pub fn display(&self, now: u64) -> Vec<(&str, AgeBucket)> {
        self.recent(now)
            .into_iter()
            .map(|e| {
                (
                    e.term.as_str(),
                    AgeBucket::from_age(now.saturating_sub(e.timestamp)),
                )
            })
            .collect()
    }

    /// Persist the working set through the collaborator.
    pub fn save(&self, kv: &mut dyn KvStore) {
        match serde_json::to_string(&self.entries) {
            Ok(raw) => kv.set(HISTORY_KEY, &raw),
            Err(e) => warn!(error = %e, "failed to serialize search history"),
        }
    }
}

fn expired(entry: &HistoryEntry, now: u64) -> bool {
    now.saturating_sub(entry.timestamp) >= TTL.as_secs()
}
