//! Table-of-contents construction.
//!
//! Operations are grouped by their first tag (case-insensitive), groups are
//! placed under categories taken from vendor extensions, and schemas get
//! their own section at the end.

use crate::config::{
    DEFAULT_CATEGORY, SCHEMAS_TITLE, TAGS_GROUP_EXTENSION, TAG_GROUPS_EXTENSION,
};
use crate::model::{OperationNode, ServiceChildNode, ServiceNode, TocGroup, TocItem, TocNode};
use ahash::AHashMap;

/// Operations sharing one tag.
#[derive(Debug, Clone, PartialEq)]
pub struct TagGroup<'a> {
    /// Display title: the declared casing when the service declares the tag
    pub title: String,
    pub items: Vec<&'a OperationNode>,
    /// Category label from `x-tagGroups`, empty when none was given
    pub tag_groups: String,
    /// Position of the tag in the service's declared tag list
    declared_at: Option<usize>,
}

impl TagGroup<'_> {
    /// The category this group is listed under.
    #[must_use]
    pub fn category(&self) -> &str {
        if self.tag_groups.is_empty() {
            DEFAULT_CATEGORY
        } else {
            &self.tag_groups
        }
    }

    /// Whether the service declares this group's tag.
    #[must_use]
    pub fn is_declared(&self) -> bool {
        self.declared_at.is_some()
    }
}

/// Result of [`compute_tag_groups`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagGroups<'a> {
    /// Tagged groups, declared tags first in declaration order
    pub groups: Vec<TagGroup<'a>>,
    /// Operations without a tag, in document order
    pub ungrouped: Vec<&'a OperationNode>,
}

/// Options for [`compute_api_tree`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeConfig {
    /// Leave out the "Schemas" section
    pub hide_schemas: bool,
    /// Drop operations and schemas flagged internal
    pub hide_internal: bool,
}

/// Partitions the service's operations into tag groups.
///
/// Tags are compared lowercase. A group takes its title from the service's
/// declared tag list when the tag is declared there, otherwise from the
/// first operation that used it. Groups for declared tags come first in
/// declaration order; the rest follow in first-seen order.
#[must_use]
pub fn compute_tag_groups(service: &ServiceNode) -> TagGroups<'_> {
    let declared: Vec<String> = service.tags.iter().map(|t| t.to_lowercase()).collect();

    let mut groups: Vec<TagGroup<'_>> = Vec::new();
    let mut by_tag: AHashMap<String, usize> = AHashMap::new();
    let mut ungrouped = Vec::new();

    for op in service.operations() {
        let Some(tag) = op.primary_tag() else {
            ungrouped.push(op);
            continue;
        };

        let tag_id = tag.to_lowercase();
        let idx = match by_tag.get(&tag_id) {
            Some(&idx) => {
                groups[idx].items.push(op);
                idx
            }
            None => {
                let declared_at = declared.iter().position(|t| *t == tag_id);
                let title = declared_at
                    .map(|i| service.tags[i].clone())
                    .unwrap_or_else(|| tag.to_string());
                groups.push(TagGroup {
                    title,
                    items: vec![op],
                    tag_groups: String::new(),
                    declared_at,
                });
                by_tag.insert(tag_id, groups.len() - 1);
                groups.len() - 1
            }
        };

        if let Some(tag_groups) = op.extension_str(TAG_GROUPS_EXTENSION) {
            groups[idx].tag_groups = tag_groups.to_string();
        }
    }

    // Stable: undeclared groups keep their first-seen order
    groups.sort_by_key(|g| (g.declared_at.is_none(), g.declared_at));

    TagGroups { groups, ungrouped }
}

/// Builds the full table of contents for a service.
///
/// Layout: the overview, then one divider per category followed by its
/// ungrouped operations and tag groups, then the schemas. Categories appear
/// in first-use order except `Endpoints`, which is always last. Categories
/// left empty by `hide_internal` are omitted.
#[must_use]
pub fn compute_api_tree(service: &ServiceNode, config: TreeConfig) -> Vec<TocItem> {
    let mut tree = vec![TocItem::Overview];
    let mut categories = Categories::default();

    let TagGroups { groups, ungrouped } = compute_tag_groups(service);

    // Ungrouped operations sit above tag groups
    for op in ungrouped {
        if config.hide_internal && op.internal {
            continue;
        }
        let category = op
            .extension_str(TAGS_GROUP_EXTENSION)
            .unwrap_or(DEFAULT_CATEGORY);
        categories.push(category, TocItem::Node(TocNode::from_operation(op)));
    }

    for group in &groups {
        let items: Vec<TocNode> = group
            .items
            .iter()
            .filter(|op| !(config.hide_internal && op.internal))
            .map(|op| TocNode::from_operation(op))
            .collect();
        if items.is_empty() {
            continue;
        }
        categories.push(
            group.category(),
            TocItem::Group(TocGroup {
                title: group.title.clone(),
                items,
            }),
        );
    }

    for (title, items) in categories.into_ordered() {
        tree.push(TocItem::Divider { title });
        tree.extend(items);
    }

    if !config.hide_schemas {
        let schemas: Vec<TocItem> = service
            .schemas()
            .filter(|s| !(config.hide_internal && s.internal))
            .map(|s| TocItem::Node(TocNode::from_schema(s)))
            .collect();
        if !schemas.is_empty() {
            tree.push(TocItem::divider(SCHEMAS_TITLE));
            tree.extend(schemas);
        }
    }

    tracing::debug!(
        "Built tree with {} entries ({} tag groups) for '{}'",
        tree.len(),
        groups.len(),
        service.name
    );

    tree
}

/// Category buckets in first-use order.
#[derive(Default)]
struct Categories {
    order: Vec<(String, Vec<TocItem>)>,
    index: AHashMap<String, usize>,
}

impl Categories {
    fn push(&mut self, category: &str, item: TocItem) {
        match self.index.get(category) {
            Some(&idx) => self.order[idx].1.push(item),
            None => {
                self.index.insert(category.to_string(), self.order.len());
                self.order.push((category.to_string(), vec![item]));
            }
        }
    }

    /// Consumes the buckets with the default category moved to the end.
    fn into_ordered(self) -> impl Iterator<Item = (String, Vec<TocItem>)> {
        let (named, default): (Vec<_>, Vec<_>) = self
            .order
            .into_iter()
            .partition(|(title, _)| title != DEFAULT_CATEGORY);
        named.into_iter().chain(default)
    }
}

/// Returns the first navigable slug, descending into groups.
#[must_use]
pub fn find_first_node_slug(tree: &[TocItem]) -> Option<&str> {
    tree.iter().find_map(|item| match item {
        TocItem::Group(group) => group.items.first().map(|node| node.slug.as_str()),
        other => other.slug(),
    })
}

/// Whether a service child is flagged internal.
#[must_use]
pub fn is_internal(node: &ServiceChildNode) -> bool {
    match node {
        ServiceChildNode::HttpOperation(op) => op.internal,
        ServiceChildNode::Model(schema) => schema.internal,
    }
}

/// Number of navigable leaves (overview excluded).
#[must_use]
pub fn leaf_count(tree: &[TocItem]) -> usize {
    tree.iter()
        .map(|item| match item {
            TocItem::Node(_) => 1,
            TocItem::Group(group) => group.items.len(),
            TocItem::Overview | TocItem::Divider { .. } => 0,
        })
        .sum()
}
