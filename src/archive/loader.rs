//! Library loading: the external record provider and root-name registry
//! feed.
//!
//! The library file is either a JSON object with `custom_roots` and
//! `tracks`, or a bare JSON array of tracks. Loading is replace-only: the
//! returned collection supersedes the previous working set wholesale, with
//! no incremental diffing. Records are not validated — a record whose path
//! starts with no declared root loads fine and simply never surfaces in
//! any root's browse view.

use std::path::Path;

use serde::Deserialize;

use crate::archive::record::TrackRecord;
use crate::error::{AppError, Result};

/// The full library payload: externally managed custom root names plus the
/// flat record collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Library {
    /// Custom root namespaces, created and renamed outside this app.
    #[serde(default)]
    pub custom_roots: Vec<String>,
    /// The flat, path-tagged record collection.
    #[serde(default)]
    pub tracks: Vec<TrackRecord>,
}

/// Read the library from a JSON file.
pub fn load_library(path: &Path) -> Result<Library> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| AppError::Library(format!("{}: {}", path.display(), e)))?;
    parse_library(&raw).map_err(|e| AppError::Library(format!("{}: {}", path.display(), e)))
}

/// A bare array is accepted as a tracks-only library.
fn parse_library(raw: &str) -> serde_json::Result<Library> {
    if let Ok(tracks) = serde_json::from_str::<Vec<TrackRecord>>(raw) {
        return Ok(Library {
            custom_roots: Vec::new(),
            tracks,
        });
    }
    serde_json::from_str::<Library>(raw)
}
