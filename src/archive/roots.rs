//! Root namespaces: the fixed set declared at boot plus custom roots
//! supplied by the library.

use crate::archive::index::segments;
use crate::archive::normalize::fold;

/// Registry of top-level namespaces.
///
/// A record belongs to a root purely by path prefix: the first path segment
/// is the root name. Resolution tries fixed roots before custom ones, first
/// match wins, so a custom root colliding with a fixed name is shadowed.
#[derive(Debug, Clone, Default)]
pub struct RootRegistry {
    fixed: Vec<String>,
    custom: Vec<String>,
}

impl RootRegistry {
    pub fn new(fixed: Vec<String>) -> Self {
        Self {
            fixed,
            custom: Vec::new(),
        }
    }

    pub fn fixed(&self) -> &[String] {
        &self.fixed
    }

    pub fn custom(&self) -> &[String] {
        &self.custom
    }

    /// All roots in resolution order: fixed first, then custom.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.fixed
            .iter()
            .map(String::as_str)
            .chain(self.custom.iter().map(String::as_str))
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.fixed.len() + self.custom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixed.is_empty() && self.custom.is_empty()
    }

    /// Replace the custom root list, e.g. after a library reload. Names
    /// shadowed by a fixed root are dropped.
    pub fn set_custom(&mut self, names: Vec<String>) {
        self.custom = names
            .into_iter()
            .filter(|name| !self.fixed.iter().any(|f| fold(f) == fold(name)))
            .collect();
    }

    /// Which root a path belongs to: the first root (fixed tried before
    /// custom) whose name matches the path's first segment.
    pub fn resolve(&self, path: &str) -> Option<&str> {
        let segs = segments(path);
        let first = fold(segs.first()?);
        self.all().find(|root| fold(root) == first)
    }

    /// Rename a custom root. Fixed roots cannot be renamed; returns whether
    /// a rename happened. The caller must re-derive any navigation state
    /// whose active root was the renamed one.
    pub fn rename_custom(&mut self, old: &str, new: &str) -> bool {
        let folded = fold(old);
        if let Some(slot) = self.custom.iter_mut().find(|c| fold(c) == folded) {
            *slot = new.to_string();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> RootRegistry {
        let mut roots = RootRegistry::new(vec!["Música 1".to_string(), "Efectos".to_string()]);
        roots.set_custom(vec!["Nocturnos".to_string()]);
        roots
    }

    #[test]
    fn custom_roots_are_kept() {
        let roots = registry();
        assert_eq!(roots.custom(), &["Nocturnos".to_string()]);
        assert_eq!(roots.len(), 3);
    }

    #[test]
    fn fixed_roots_shadow_custom_names() {
        let mut roots = RootRegistry::new(vec!["Música 1".to_string()]);
        roots.set_custom(vec!["música 1".to_string(), "Nocturnos".to_string()]);
        assert_eq!(roots.custom(), &["Nocturnos".to_string()]);
    }

    #[test]
    fn resolve_matches_first_segment() {
        let roots = registry();
        assert_eq!(roots.resolve("Nocturnos/Jazz/Clasicos"), Some("Nocturnos"));
        assert_eq!(roots.resolve("Efectos"), Some("Efectos"));
        assert_eq!(roots.resolve("Desconocido/x"), None);
        assert_eq!(roots.resolve(""), None);
    }

    #[test]
    fn resolve_is_fold_insensitive() {
        let roots = registry();
        assert_eq!(roots.resolve("MÚSICA 1/Son"), Some("Música 1"));
    }

    #[test]
    fn fixed_roots_resolve_before_custom_on_collision() {
        let mut roots = RootRegistry::new(vec!["Trova".to_string()]);
        roots.set_custom(vec!["Antigua".to_string()]);
        // a custom root renamed into collision with a fixed root is shadowed
        assert!(roots.rename_custom("Antigua", "trova"));
        assert_eq!(roots.resolve("Trova/y"), Some("Trova"));
    }

    #[test]
    fn rename_custom_changes_name() {
        let mut roots = registry();
        assert!(roots.rename_custom("Nocturnos", "Trasnoche"));
        assert_eq!(roots.custom(), &["Trasnoche".to_string()]);
        assert_eq!(roots.resolve("Nocturnos/Jazz"), None);
        assert_eq!(roots.resolve("Trasnoche/Jazz"), Some("Trasnoche"));
    }

    #[test]
    fn rename_does_not_touch_fixed() {
        let mut roots = registry();
        assert!(!roots.rename_custom("Música 1", "Otra"));
        assert_eq!(roots.fixed()[0], "Música 1");
    }

    #[test]
    fn set_custom_replaces_previous_set() {
        let mut roots = registry();
        roots.set_custom(vec!["Archivo Viejo".to_string()]);
        assert_eq!(roots.custom(), &["Archivo Viejo".to_string()]);
    }

    #[test]
    fn all_iterates_fixed_then_custom() {
        let roots = registry();
        let names: Vec<&str> = roots.all().collect();
        assert_eq!(names, vec!["Música 1", "Efectos", "Nocturnos"]);
    }
}
