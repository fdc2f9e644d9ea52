//! Core services: tree building, search, document loading and debounced sessions.

pub mod oas;
pub mod search;
pub mod session;
pub mod tree;

pub use oas::{load_service, service_from_document};
pub use search::{search_openapi, search_with_config, SearchConfig, SearchHit};
pub use session::{SearchSession, SearchState};
pub use tree::{compute_api_tree, compute_tag_groups, TagGroup, TagGroups, TreeConfig};
