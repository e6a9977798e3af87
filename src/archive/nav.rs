//! Navigation state: where the operator is in the virtual tree and what,
//! if anything, they are searching for.

use crate::archive::pagination::Pagination;
use crate::archive::roots::RootRegistry;
use crate::archive::search::Scope;

/// Mode derived from the state: a non-empty effective query means searching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browsing,
    Searching,
}

/// Current root namespace, subpath, effective query, and scope.
///
/// Invariants: `current_path` is empty or starts with the active root;
/// clearing the query resets the scope to local; every transition resets
/// the render limit to the initial page size.
#[derive(Debug)]
pub struct NavigationState {
    active_root: Option<String>,
    current_path: String,
    query: String,
    scope: Scope,
    pub pagination: Pagination,
}

impl NavigationState {
    pub fn new(page_size: usize) -> Self {
        Self {
            active_root: None,
            current_path: String::new(),
            query: String::new(),
            scope: Scope::Local,
            pagination: Pagination::new(page_size),
        }
    }

    pub fn mode(&self) -> Mode {
        if self.query.trim().is_empty() {
            Mode::Browsing
        } else {
            Mode::Searching
        }
    }

    pub fn active_root(&self) -> Option<&str> {
        self.active_root.as_deref()
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// The path listings and local searches are computed against: the
    /// current path, or the bare root name when at a root's top level.
    pub fn target_path(&self) -> &str {
        if !self.current_path.is_empty() {
            &self.current_path
        } else {
            self.active_root.as_deref().unwrap_or("")
        }
    }

    /// Enter a folder. Any active search is implicitly cleared — a folder
    /// click always lands back in browse mode at that location — and the
    /// active root is re-derived from the folder's path.
    pub fn navigate_into(&mut self, folder_path: &str, roots: &RootRegistry) {
        self.query.clear();
        self.scope = Scope::Local;
        self.current_path = folder_path.to_string();
        self.active_root = roots.resolve(folder_path).map(str::to_string);
        self.pagination.reset();
    }

    /// Remove the last path segment, or clear to root level when only one
    /// segment remains. Valid only while browsing with a non-empty path.
    pub fn navigate_up(&mut self) {
        if self.mode() != Mode::Browsing || self.current_path.is_empty() {
            return;
        }
        match self.current_path.rfind('/') {
            Some(idx) => self.current_path.truncate(idx),
            None => self.current_path.clear(),
        }
        self.pagination.reset();
    }

    /// Activate a root. Always valid, including re-selecting the active
    /// root: path, query, and scope reset either way.
    pub fn select_root(&mut self, root: &str) {
        self.active_root = Some(root.to_string());
        self.current_path.clear();
        self.query.clear();
        self.scope = Scope::Local;
        self.pagination.reset();
    }

    /// Apply an effective query. Empty-after-trim transitions back to
    /// browsing and resets the scope; otherwise the previous scope is
    /// preserved.
    pub fn set_query(&mut self, query: &str) {
        if query.trim().is_empty() {
            self.query.clear();
            self.scope = Scope::Local;
        } else {
            self.query = query.to_string();
        }
        self.pagination.reset();
    }

    /// Change the search scope. No-op unless currently searching.
    pub fn set_scope(&mut self, scope: Scope) {
        if self.mode() != Mode::Searching {
            return;
        }
        self.scope = scope;
        self.pagination.reset();
    }

    /// Re-derive the active root from the current location, e.g. after a
    /// custom root was renamed externally.
    pub fn rederive_root(&mut self, roots: &RootRegistry) {
        let probe = if !self.current_path.is_empty() {
            self.current_path.clone()
        } else {
            match &self.active_root {
                Some(root) => root.clone(),
                None => return,
            }
        };
        self.active_root = roots.resolve(&probe).map(str::to_string);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roots() -> RootRegistry {
        let mut registry = RootRegistry::new(vec!["Música 1".to_string()]);
        registry.set_custom(vec!["Nocturnos".to_string()]);
        registry
    }

    #[test]
    fn starts_browsing_with_no_root() {
        let nav = NavigationState::new(50);
        assert_eq!(nav.mode(), Mode::Browsing);
        assert!(nav.active_root().is_none());
        assert_eq!(nav.target_path(), "");
    }

    #[test]
    fn select_root_resets_everything() {
        let mut nav = NavigationState::new(50);
        nav.select_root("Música 1");
        nav.navigate_into("Música 1/Trova", &roots());
        nav.set_query("son");
        nav.pagination.load_more(500);

        nav.select_root("Música 1");
        assert_eq!(nav.active_root(), Some("Música 1"));
        assert_eq!(nav.current_path(), "");
        assert_eq!(nav.query(), "");
        assert_eq!(nav.scope(), Scope::Local);
        assert_eq!(nav.pagination.limit(), 50);
        assert_eq!(nav.target_path(), "Música 1");
    }

    #[test]
    fn navigate_into_clears_search_and_rederives_root() {
        let mut nav = NavigationState::new(50);
        nav.select_root("Música 1");
        nav.set_query("jazz");
        nav.set_scope(Scope::Global);

        nav.navigate_into("Nocturnos/Jazz", &roots());
        assert_eq!(nav.mode(), Mode::Browsing);
        assert_eq!(nav.query(), "");
        assert_eq!(nav.scope(), Scope::Local);
        assert_eq!(nav.active_root(), Some("Nocturnos"));
        assert_eq!(nav.current_path(), "Nocturnos/Jazz");
    }

    #[test]
    fn navigate_up_pops_one_segment() {
        let mut nav = NavigationState::new(50);
        nav.navigate_into("Música 1/Trova/Clasicos", &roots());
        nav.navigate_up();
        assert_eq!(nav.current_path(), "Música 1/Trova");
        nav.navigate_up();
        assert_eq!(nav.current_path(), "Música 1");
        nav.navigate_up();
        assert_eq!(nav.current_path(), "");
        assert_eq!(nav.active_root(), Some("Música 1"));
    }

    #[test]
    fn navigate_up_invalid_outside_browsing() {
        let mut nav = NavigationState::new(50);
        nav.navigate_into("Música 1/Trova", &roots());
        nav.set_query("son");
        nav.navigate_up();
        assert_eq!(nav.current_path(), "Música 1/Trova");
    }

    #[test]
    fn navigate_up_noop_on_empty_path() {
        let mut nav = NavigationState::new(50);
        nav.select_root("Música 1");
        nav.navigate_up();
        assert_eq!(nav.current_path(), "");
    }

    #[test]
    fn set_query_empty_resets_scope() {
        let mut nav = NavigationState::new(50);
        nav.select_root("Música 1");
        nav.set_query("son");
        nav.set_scope(Scope::Global);
        nav.set_query("   ");
        assert_eq!(nav.mode(), Mode::Browsing);
        assert_eq!(nav.scope(), Scope::Local);
    }

    #[test]
    fn set_query_preserves_scope_while_searching() {
        let mut nav = NavigationState::new(50);
        nav.select_root("Música 1");
        nav.set_query("son");
        nav.set_scope(Scope::Global);
        nav.set_query("trova");
        assert_eq!(nav.scope(), Scope::Global);
    }

    #[test]
    fn set_scope_noop_when_browsing() {
        let mut nav = NavigationState::new(50);
        nav.select_root("Música 1");
        nav.set_scope(Scope::Global);
        assert_eq!(nav.scope(), Scope::Local);
    }

    #[test]
    fn transitions_reset_render_limit() {
        let registry = roots();
        let mut nav = NavigationState::new(50);
        nav.select_root("Música 1");

        nav.pagination.load_more(500);
        nav.navigate_into("Música 1/Trova", &registry);
        assert_eq!(nav.pagination.limit(), 50);

        nav.pagination.load_more(500);
        nav.navigate_up();
        assert_eq!(nav.pagination.limit(), 50);

        nav.pagination.load_more(500);
        nav.set_query("son");
        assert_eq!(nav.pagination.limit(), 50);

        nav.pagination.load_more(500);
        nav.set_scope(Scope::Global);
        assert_eq!(nav.pagination.limit(), 50);
    }

    #[test]
    fn rederive_root_after_rename() {
        let mut registry = roots();
        let mut nav = NavigationState::new(50);
        nav.navigate_into("Nocturnos/Jazz", &registry);
        assert_eq!(nav.active_root(), Some("Nocturnos"));

        registry.rename_custom("Nocturnos", "Trasnoche");
        nav.rederive_root(&registry);
        assert_eq!(nav.active_root(), None);
    }

    #[test]
    fn target_path_prefers_current_path() {
        let mut nav = NavigationState::new(50);
        nav.navigate_into("Música 1/Trova", &roots());
        assert_eq!(nav.target_path(), "Música 1/Trova");
    }
}
