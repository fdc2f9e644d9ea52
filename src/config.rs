//! # Configuration constants
//!
//! Names and limits shared by the tree builder, the search and the
//! surfaces around them.

/// Category used for operations without an explicit tag group. Always sorted last.
pub const DEFAULT_CATEGORY: &str = "Endpoints";

/// Divider title above schema leaves.
pub const SCHEMAS_TITLE: &str = "Schemas";

/// Title of the overview entry.
pub const OVERVIEW_TITLE: &str = "Overview";

/// Slug and id of the overview entry.
pub const OVERVIEW_SLUG: &str = "/";

/// Extension naming the category of an ungrouped operation.
pub const TAGS_GROUP_EXTENSION: &str = "x-tagsGroup";

/// Extension naming the category of a tag group.
pub const TAG_GROUPS_EXTENSION: &str = "x-tagGroups";

/// Extension marking an operation or schema as internal.
pub const INTERNAL_EXTENSION: &str = "x-internal";

/// Separator between group and leaf titles in search results.
pub const TITLE_SEPARATOR: &str = " - ";

/// Default number of search results.
pub const DEFAULT_SEARCH_LIMIT: usize = 50;

/// Maximum allowed number of search results.
pub const MAX_SEARCH_LIMIT: usize = 500;

/// Score bonus for anything that is not a schema.
pub const NON_SCHEMA_BONUS: u32 = 3;

/// Characters of description kept in a result preview.
pub const PREVIEW_CHARS: usize = 120;

/// Default debounce delay for interactive search, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Maximum MCP response size in bytes.
pub const MAX_RESPONSE_BYTES: usize = 512 * 1024;
