//! Table-of-contents MCP tools.

use crate::model::{ServiceNode, TocItem};
use crate::services::tree::{self, TagGroups, TreeConfig};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input for the toc tool.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct TocInput {
    /// Leave out the "Schemas" section
    #[serde(default)]
    pub hide_schemas: bool,
    /// Drop operations and schemas flagged internal
    #[serde(default)]
    pub hide_internal: bool,
}

impl From<&TocInput> for TreeConfig {
    fn from(input: &TocInput) -> Self {
        Self {
            hide_schemas: input.hide_schemas,
            hide_internal: input.hide_internal,
        }
    }
}

/// Output for the toc tool.
#[derive(Debug, Serialize)]
pub struct TocOutput {
    /// API title
    pub service: String,
    /// API version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Slug to open first
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_slug: Option<String>,
    /// Navigable leaves in the tree
    pub leaf_count: usize,
    /// The table of contents
    pub tree: Vec<TocItem>,
}

/// Executes the toc tool.
#[must_use]
pub fn execute_toc(service: &ServiceNode, input: &TocInput) -> TocOutput {
    let toc = tree::compute_api_tree(service, input.into());

    // Skip the overview so the first real page is suggested
    let first_slug = toc
        .iter()
        .position(|item| !matches!(item, TocItem::Overview))
        .and_then(|start| tree::find_first_node_slug(&toc[start..]))
        .map(str::to_string);

    TocOutput {
        service: service.name.clone(),
        version: service.version.clone(),
        first_slug,
        leaf_count: tree::leaf_count(&toc),
        tree: toc,
    }
}

/// Output for the tag_groups tool.
#[derive(Debug, Serialize)]
pub struct GroupsOutput {
    /// Tag groups in display order
    pub groups: Vec<GroupSummary>,
    /// URIs of operations without a tag
    pub ungrouped: Vec<String>,
}

/// One tag group.
#[derive(Debug, Serialize)]
pub struct GroupSummary {
    pub title: String,
    pub category: String,
    /// Whether the service declares the tag
    pub declared: bool,
    /// Operation URIs in document order
    pub operations: Vec<String>,
}

/// Executes the tag_groups tool.
#[must_use]
pub fn execute_groups(service: &ServiceNode) -> GroupsOutput {
    let TagGroups { groups, ungrouped } = tree::compute_tag_groups(service);

    GroupsOutput {
        groups: groups
            .iter()
            .map(|g| GroupSummary {
                title: g.title.clone(),
                category: g.category().to_string(),
                declared: g.is_declared(),
                operations: g.items.iter().map(|op| op.uri.clone()).collect(),
            })
            .collect(),
        ungrouped: ungrouped.iter().map(|op| op.uri.clone()).collect(),
    }
}
