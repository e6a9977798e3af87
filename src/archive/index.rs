//! Derives folder/track listings on demand from the flat record set.
//!
//! There is no persisted hierarchy: every listing is recomputed from the
//! current records, so a wholesale record replacement can never leave a
//! stale tree behind.

use std::collections::HashSet;

use crate::archive::normalize::fold;
use crate::archive::record::{FolderNode, TrackNode, TrackRecord};
use crate::archive::roots::RootRegistry;

/// Split a logical path into its segments, dropping empty ones.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Fold each segment of a path for prefix comparison.
pub fn folded_segments(path: &str) -> Vec<String> {
    segments(path).into_iter().map(fold).collect()
}

/// Whether `segs` starts with all of the (already folded) `prefix` segments.
pub fn starts_with_folded(segs: &[&str], prefix: &[String]) -> bool {
    prefix.len() <= segs.len()
        && prefix
            .iter()
            .zip(segs)
            .all(|(folded, seg)| *folded == fold(seg))
}

/// A derived listing: folder children and track children of one location.
/// Folders always precede tracks when the listing is flattened for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub folders: Vec<FolderNode>,
    pub tracks: Vec<TrackNode>,
}

#[allow(dead_code)]
impl Listing {
    pub fn len(&self) -> usize {
        self.folders.len() + self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.tracks.is_empty()
    }
}

/// Compute the direct children of `target_path`.
///
/// A record whose path has exactly the target's depth is a track child; a
/// deeper record contributes the folder at one level below the target. A
/// folder discovered through many records appears once — first occurrence
/// decides its displayed casing. The declared-root level is listed by
/// `list_roots`, which additionally constrains to known root names.
pub fn list_children(records: &[TrackRecord], target_path: &str) -> Listing {
    let target = folded_segments(target_path);
    let mut seen: HashSet<String> = HashSet::new();
    let mut folders: Vec<FolderNode> = Vec::new();
    let mut tracks: Vec<TrackNode> = Vec::new();

    for record in records {
        let segs = segments(&record.path);
        if !starts_with_folded(&segs, &target) {
            continue;
        }
        if segs.len() == target.len() {
            tracks.push(TrackNode {
                id: record.id.clone(),
                label: record.display_name.clone(),
            });
        } else {
            let child_path = segs[..target.len() + 1].join("/");
            if seen.insert(fold(&child_path)) {
                folders.push(FolderNode::new(child_path));
            }
        }
    }

    sort_folders(&mut folders);
    sort_tracks(&mut tracks);
    Listing { folders, tracks }
}

/// Compute the implicit root level: the union of fixed and custom roots
/// with at least one matching record, as folder children. A record whose
/// first segment matches no declared root never surfaces here — that is a
/// silent exclusion, not an error.
pub fn list_roots(records: &[TrackRecord], roots: &RootRegistry) -> Listing {
    let mut folders: Vec<FolderNode> = roots
        .all()
        .filter(|root| {
            let prefix = [fold(root)];
            records
                .iter()
                .any(|record| starts_with_folded(&segments(&record.path), &prefix))
        })
        .map(|root| FolderNode::new(root.to_string()))
        .collect();
    sort_folders(&mut folders);
    Listing {
        folders,
        tracks: Vec::new(),
    }
}

/// Order folders by path, comparing the folded form with the original string
/// as tie-break so the ordering is total and deterministic.
pub(crate) fn sort_folders(folders: &mut [FolderNode]) {
    folders.sort_by(|a, b| {
        fold(&a.path)
            .cmp(&fold(&b.path))
            .then_with(|| a.path.cmp(&b.path))
    });
}

/// Order tracks by display label, folded comparison, id as final tie-break.
pub(crate) fn sort_tracks(tracks: &mut [TrackNode]) {
    tracks.sort_by(|a, b| {
        fold(&a.label)
            .cmp(&fold(&b.label))
            .then_with(|| a.label.cmp(&b.label))
            .then_with(|| a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::record::TrackRecord;

    fn record(id: &str, path: &str, name: &str) -> TrackRecord {
        TrackRecord {
            id: id.to_string(),
            path: path.to_string(),
            display_name: name.to_string(),
            performer: None,
            title: None,
        }
    }

    fn sample_records() -> Vec<TrackRecord> {
        vec![
            record("a", "Música 1/Trova", "Longina"),
            record("b", "Música 1/Trova/Clasicos", "Guantanamera"),
            record("c", "Música 1/Trova/Clasicos", "Ávalon"),
            record("d", "Música 1/Son", "Chan Chan"),
            record("e", "Efectos/Ambiente", "Lluvia"),
            record("f", "Música 2", "Himno"),
        ]
    }

    #[test]
    fn segments_drop_empty_parts() {
        assert_eq!(segments("Música 1/Trova"), vec!["Música 1", "Trova"]);
        assert_eq!(segments("/a//b/"), vec!["a", "b"]);
        assert!(segments("").is_empty());
        assert!(segments("/").is_empty());
    }

    #[test]
    fn spec_example_listing() {
        let records = vec![
            record("a", "Música 1/Trova", "Longina"),
            record("b", "Música 1/Trova/Clasicos", "Guantanamera"),
        ];
        let listing = list_children(&records, "Música 1");
        let folder_paths: Vec<&str> = listing.folders.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(folder_paths, vec!["Música 1/Trova"]);
        assert!(listing.tracks.is_empty());
    }

    #[test]
    fn equal_depth_records_are_track_children() {
        let listing = list_children(&sample_records(), "Música 1/Trova");
        let labels: Vec<&str> = listing.tracks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["Longina"]);
        let folders: Vec<&str> = listing.folders.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(folders, vec!["Música 1/Trova/Clasicos"]);
    }

    #[test]
    fn folders_are_deduplicated() {
        let listing = list_children(&sample_records(), "Música 1/Trova");
        // two records live under Clasicos but the folder appears once
        assert_eq!(listing.folders.len(), 1);
    }

    #[test]
    fn first_occurrence_decides_folder_casing() {
        let records = vec![
            record("a", "Música 1/TROVA/x", "Uno"),
            record("b", "Música 1/Trova/y", "Dos"),
        ];
        let listing = list_children(&records, "Música 1");
        assert_eq!(listing.folders.len(), 1);
        assert_eq!(listing.folders[0].path, "Música 1/TROVA");
    }

    #[test]
    fn target_prefix_matching_is_fold_insensitive() {
        let listing = list_children(&sample_records(), "musica 1/trova");
        assert_eq!(listing.tracks.len(), 1);
        assert_eq!(listing.folders.len(), 1);
    }

    #[test]
    fn shorter_paths_are_excluded() {
        // record "f" has path "Música 2" — shorter than the target depth
        let listing = list_children(&sample_records(), "Música 2/Baladas");
        assert!(listing.is_empty());
    }

    #[test]
    fn empty_target_lists_depth_one_prefixes() {
        let listing = list_children(&sample_records(), "");
        let roots: Vec<&str> = listing.folders.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(roots, vec!["Efectos", "Música 1", "Música 2"]);
        assert!(listing.tracks.is_empty());
    }

    #[test]
    fn list_roots_covers_declared_roots_with_records() {
        let mut roots = RootRegistry::new(vec![
            "Música 1".to_string(),
            "Música 2".to_string(),
            "Programas".to_string(),
        ]);
        roots.set_custom(vec!["Efectos".to_string()]);
        let listing = list_roots(&sample_records(), &roots);
        let names: Vec<&str> = listing.folders.iter().map(|f| f.path.as_str()).collect();
        // "Programas" has no matching records and is absent
        assert_eq!(names, vec!["Efectos", "Música 1", "Música 2"]);
        assert!(listing.tracks.is_empty());
    }

    #[test]
    fn list_roots_silently_excludes_undeclared_prefixes() {
        let mut records = sample_records();
        records.push(record("x", "Desconocido/Pista", "Huérfana"));
        let roots = RootRegistry::new(vec!["Música 1".to_string()]);
        let listing = list_roots(&records, &roots);
        let names: Vec<&str> = listing.folders.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(names, vec!["Música 1"]);
    }

    #[test]
    fn folders_sorted_by_path_tracks_by_label() {
        let listing = list_children(&sample_records(), "Música 1/Trova/Clasicos");
        let labels: Vec<&str> = listing.tracks.iter().map(|t| t.label.as_str()).collect();
        // "Ávalon" folds to "avalon" and sorts before "guantanamera"
        assert_eq!(labels, vec!["Ávalon", "Guantanamera"]);

        let listing = list_children(&sample_records(), "Música 1");
        let folders: Vec<&str> = listing.folders.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(folders, vec!["Música 1/Son", "Música 1/Trova"]);
    }

    #[test]
    fn no_duplicate_folder_paths_in_result() {
        let listing = list_children(&sample_records(), "");
        let mut paths: Vec<&String> = listing.folders.iter().map(|f| &f.path).collect();
        let before = paths.len();
        paths.dedup();
        assert_eq!(paths.len(), before);
    }

    #[test]
    fn browse_completeness_over_subtree() {
        // every record under the prefix is reachable as a track child of
        // exactly one folder discovered by recursive listing
        let records = sample_records();
        let mut reachable: Vec<String> = Vec::new();
        let mut stack = vec!["Música 1".to_string()];
        while let Some(path) = stack.pop() {
            let listing = list_children(&records, &path);
            reachable.extend(listing.tracks.iter().map(|t| t.id.clone()));
            stack.extend(listing.folders.iter().map(|f| f.path.clone()));
        }
        reachable.sort();
        let mut expected: Vec<String> = records
            .iter()
            .filter(|r| r.path.starts_with("Música 1"))
            .map(|r| r.id.clone())
            .collect();
        expected.sort();
        assert_eq!(reachable, expected);
    }

    #[test]
    fn empty_record_set_yields_empty_listing() {
        let listing = list_children(&[], "Música 1");
        assert!(listing.is_empty());
        assert_eq!(listing.len(), 0);
    }
}
