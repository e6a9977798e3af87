//! Free-text matching over the record pool.
//!
//! A query matches tracks through their display name, performer, or title,
//! and matches folders through the path segments records travel through.
//! Matching is folded (case- and diacritic-insensitive) on both sides.

use std::collections::HashSet;

use crate::archive::index::{
    folded_segments, segments, sort_folders, sort_tracks, starts_with_folded, Listing,
};
use crate::archive::normalize::fold;
use crate::archive::record::{FolderNode, TrackNode, TrackRecord};

/// Search scope relative to the current folder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scope {
    /// Only descendants of the current folder.
    #[default]
    Local,
    /// The entire record set, regardless of current folder.
    Global,
}

impl Scope {
    pub fn toggled(self) -> Self {
        match self {
            Scope::Local => Scope::Global,
            Scope::Global => Scope::Local,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Scope::Local => "local",
            Scope::Global => "global",
        }
    }
}

/// Match `query` against the scoped record pool.
///
/// Track matches are records whose folded display name or searchable field
/// contains the folded query. Folder matches come from walking each record's
/// path: any non-root segment containing the query marks the accumulated
/// prefix as a folder match; in local scope that prefix must itself start
/// with `target_path`. Deduplicated by folded path, first occurrence keeps
/// its casing. Output is deterministically ordered (folders by path, tracks
/// by label) with folders first.
///
/// An empty-after-trim query or an empty pool yields an empty listing, not
/// an error.
pub fn search(
    records: &[TrackRecord],
    query: &str,
    scope: Scope,
    target_path: &str,
) -> Listing {
    let needle = fold(query.trim());
    if needle.is_empty() {
        return Listing::default();
    }
    let target = folded_segments(target_path);

    let mut seen: HashSet<String> = HashSet::new();
    let mut folders: Vec<FolderNode> = Vec::new();
    let mut tracks: Vec<TrackNode> = Vec::new();

    for record in records {
        let segs = segments(&record.path);
        if scope == Scope::Local && !starts_with_folded(&segs, &target) {
            continue;
        }

        if record
            .searchable_fields()
            .any(|field| fold(field).contains(&needle))
        {
            tracks.push(TrackNode {
                id: record.id.clone(),
                label: record.display_name.clone(),
            });
        }

        // The root segment is never a matchable folder.
        for depth in 1..segs.len() {
            if !fold(segs[depth]).contains(&needle) {
                continue;
            }
            // In local scope the accumulated prefix must start with the
            // target; the pool filter already guarantees that for any
            // prefix at least as deep as the target.
            if scope == Scope::Local && depth + 1 < target.len() {
                continue;
            }
            let folder_path = segs[..depth + 1].join("/");
            if seen.insert(fold(&folder_path)) {
                folders.push(FolderNode::new(folder_path));
            }
        }
    }

    sort_folders(&mut folders);
    sort_tracks(&mut tracks);
    Listing { folders, tracks }
}
