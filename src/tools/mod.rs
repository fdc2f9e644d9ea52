//! MCP tool implementations.

mod search;
mod toc;

// search
pub use search::{execute_search, SearchInput, SearchOutput};

// toc
pub use toc::{execute_groups, execute_toc, GroupSummary, GroupsOutput, TocInput, TocOutput};
