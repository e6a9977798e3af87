use serde::Deserialize;

/// A single audio-track record from the flat library collection.
///
/// Records are immutable once loaded; the working set is only ever replaced
/// wholesale by the loader. The `path` is a logical location, not a
/// filesystem path: segments are separated by `/` and the first segment
/// names the root namespace the record lives under.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrackRecord {
    /// Opaque unique identifier.
    pub id: String,
    /// Slash-delimited logical location of the record.
    pub path: String,
    /// Human-readable label used for matching and display.
    pub display_name: String,
    /// Performer credit, if known.
    #[serde(default)]
    pub performer: Option<String>,
    /// Track title, as distinct from the derived display name.
    #[serde(default)]
    pub title: Option<String>,
}

impl TrackRecord {
    /// Text fields eligible for query matching, display name first.
    pub fn searchable_fields(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.display_name.as_str())
            .chain(self.performer.as_deref())
            .chain(self.title.as_deref())
    }
}

/// A derived folder view node, identified by its full path string.
///
/// Never persisted — recomputed from the record set every time a listing is
/// needed. A folder exists at path P iff at least one record's path has P as
/// a proper segment-wise prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderNode {
    /// Full slash-delimited path of the folder.
    pub path: String,
    /// Display name: the last path segment, original casing.
    pub name: String,
}

impl FolderNode {
    /// Build a node from a full folder path.
    pub fn new(path: String) -> Self {
        let name = path
            .rsplit('/')
            .find(|s| !s.is_empty())
            .unwrap_or(path.as_str())
            .to_string();
        Self { path, name }
    }
}

/// A derived track view node: the record's id plus its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackNode {
    pub id: String,
    pub label: String,
}
