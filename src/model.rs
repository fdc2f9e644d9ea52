//! Service description and table-of-contents data model.
//!
//! Both sides serialize to JSON: the service description is what the
//! OpenAPI loader produces (or what a caller hands over directly), the
//! table of contents is what navigation and search consume.

use crate::config::{OVERVIEW_SLUG, OVERVIEW_TITLE};
use crate::types::NodeType;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Root of a parsed API description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceNode {
    /// API title
    #[serde(default)]
    pub name: String,
    /// API version, if declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Declared tag names, in declaration order
    #[serde(default)]
    pub tags: Vec<String>,
    /// Operations and schemas, in document order
    #[serde(default)]
    pub children: Vec<ServiceChildNode>,
}

impl ServiceNode {
    /// Iterates over HTTP operations in document order.
    pub fn operations(&self) -> impl Iterator<Item = &OperationNode> {
        self.children.iter().filter_map(|child| match child {
            ServiceChildNode::HttpOperation(op) => Some(op),
            ServiceChildNode::Model(_) => None,
        })
    }

    /// Iterates over schemas in document order.
    pub fn schemas(&self) -> impl Iterator<Item = &SchemaNode> {
        self.children.iter().filter_map(|child| match child {
            ServiceChildNode::Model(schema) => Some(schema),
            ServiceChildNode::HttpOperation(_) => None,
        })
    }
}

/// A child of the service: an operation or a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServiceChildNode {
    HttpOperation(OperationNode),
    Model(SchemaNode),
}

impl ServiceChildNode {
    #[must_use]
    pub fn node_type(&self) -> NodeType {
        match self {
            Self::HttpOperation(_) => NodeType::HttpOperation,
            Self::Model(_) => NodeType::Model,
        }
    }

    #[must_use]
    pub fn uri(&self) -> &str {
        match self {
            Self::HttpOperation(op) => &op.uri,
            Self::Model(schema) => &schema.uri,
        }
    }
}

impl From<OperationNode> for ServiceChildNode {
    fn from(op: OperationNode) -> Self {
        Self::HttpOperation(op)
    }
}

impl From<SchemaNode> for ServiceChildNode {
    fn from(schema: SchemaNode) -> Self {
        Self::Model(schema)
    }
}

/// An HTTP operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationNode {
    pub uri: String,
    pub name: String,
    /// Lowercase HTTP method
    pub method: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub internal: bool,
    /// Tags in declaration order; only the first one groups the operation
    #[serde(default)]
    pub tags: Vec<String>,
    /// `x-*` vendor extensions
    #[serde(default)]
    pub extensions: Map<String, Value>,
}

impl OperationNode {
    /// The tag this operation is grouped under, if any.
    ///
    /// An empty first tag counts as no tag.
    #[must_use]
    pub fn primary_tag(&self) -> Option<&str> {
        self.tags.first().map(String::as_str).filter(|t| !t.is_empty())
    }

    /// A non-empty string extension value.
    #[must_use]
    pub fn extension_str(&self, key: &str) -> Option<&str> {
        self.extensions
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// A schema (data model).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaNode {
    pub uri: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub internal: bool,
}

/// One entry of the table of contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TocItem {
    /// The overview page, always first.
    Overview,
    /// A non-clickable category heading.
    Divider { title: String },
    /// A navigable leaf.
    Node(TocNode),
    /// A titled group of leaves (one tag).
    Group(TocGroup),
}

impl TocItem {
    #[must_use]
    pub fn divider(title: impl Into<String>) -> Self {
        Self::Divider {
            title: title.into(),
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Overview => OVERVIEW_TITLE,
            Self::Divider { title } => title,
            Self::Node(node) => &node.title,
            Self::Group(group) => &group.title,
        }
    }

    /// The slug this entry navigates to; dividers and groups have none.
    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        match self {
            Self::Overview => Some(OVERVIEW_SLUG),
            Self::Node(node) => Some(&node.slug),
            Self::Divider { .. } | Self::Group(_) => None,
        }
    }
}

/// A navigable leaf pointing to one operation or schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TocNode {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// HTTP method for operations, empty for schemas
    #[serde(default)]
    pub meta: String,
    #[serde(default)]
    pub description: String,
}

impl TocNode {
    #[must_use]
    pub fn from_operation(op: &OperationNode) -> Self {
        Self {
            id: op.uri.clone(),
            slug: op.uri.clone(),
            title: op.name.clone(),
            node_type: NodeType::HttpOperation,
            meta: op.method.clone(),
            description: op.description.clone(),
        }
    }

    #[must_use]
    pub fn from_schema(schema: &SchemaNode) -> Self {
        Self {
            id: schema.uri.clone(),
            slug: schema.uri.clone(),
            title: schema.name.clone(),
            node_type: NodeType::Model,
            meta: String::new(),
            description: schema.description.clone(),
        }
    }
}

/// A titled group of leaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TocGroup {
    pub title: String,
    pub items: Vec<TocNode>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_service_deserializes_with_defaults() {
        let service: ServiceNode = serde_json::from_value(json!({
            "tags": ["Pets"],
            "children": [
                { "type": "http_operation", "uri": "/paths/~1pets/get", "name": "List pets", "method": "get" },
                { "type": "model", "uri": "/schemas/Pet", "name": "Pet" }
            ]
        }))
        .unwrap();

        assert_eq!(service.operations().count(), 1);
        assert_eq!(service.schemas().count(), 1);
        let op = service.operations().next().unwrap();
        assert_eq!(op.description, "");
        assert!(!op.internal);
        assert_eq!(op.primary_tag(), None);
    }

    #[test]
    fn test_empty_first_tag_is_untagged() {
        let op = OperationNode {
            tags: vec![String::new(), "pets".into()],
            ..Default::default()
        };
        assert_eq!(op.primary_tag(), None);
    }

    #[test]
    fn test_extension_str_ignores_non_strings() {
        let mut op = OperationNode::default();
        op.extensions.insert("x-tagGroups".into(), json!("Admin"));
        op.extensions.insert("x-tagsGroup".into(), json!(42));
        op.extensions.insert("x-empty".into(), json!(""));
        assert_eq!(op.extension_str("x-tagGroups"), Some("Admin"));
        assert_eq!(op.extension_str("x-tagsGroup"), None);
        assert_eq!(op.extension_str("x-empty"), None);
    }

    #[test]
    fn test_toc_item_serialization_shape() {
        let overview = serde_json::to_value(TocItem::Overview).unwrap();
        assert_eq!(overview, json!({ "kind": "overview" }));

        let node = TocItem::Node(TocNode {
            id: "/schemas/Pet".into(),
            slug: "/schemas/Pet".into(),
            title: "Pet".into(),
            node_type: NodeType::Model,
            meta: String::new(),
            description: String::new(),
        });
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["kind"], "node");
        assert_eq!(value["type"], "model");

        let back: TocItem = serde_json::from_value(value).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn test_toc_item_slugs() {
        assert_eq!(TocItem::Overview.slug(), Some("/"));
        assert_eq!(TocItem::divider("Endpoints").slug(), None);
        assert_eq!(TocItem::divider("Endpoints").title(), "Endpoints");
    }
}
