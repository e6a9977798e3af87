//! The virtual hierarchy core: path-tagged records, derived folder listings,
//! scoped search, navigation state, pagination, and search history.

pub mod history;
pub mod index;
pub mod loader;
pub mod nav;
pub mod normalize;
pub mod pagination;
pub mod record;
pub mod roots;
pub mod search;
pub mod watcher;
