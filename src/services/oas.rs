//! OpenAPI / Swagger document conversion.
//!
//! Turns an OpenAPI 3.x or Swagger 2.0 JSON document into a [`ServiceNode`]:
//! one operation per path + method, one schema per named definition. URIs
//! follow JSON-pointer style (`/paths/~1pets~1{id}/get`, `/schemas/Pet`)
//! so they double as stable slugs.

use crate::config::INTERNAL_EXTENSION;
use crate::error::{OasError, OasResult};
use crate::model::{OperationNode, SchemaNode, ServiceChildNode, ServiceNode};
use serde_json::{Map, Value};
use std::path::Path;

/// HTTP methods recognised inside a path item.
const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Document flavour, decided by the version field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flavor {
    OpenApi3,
    Swagger2,
}

impl Flavor {
    fn detect(root: &Map<String, Value>) -> Option<Self> {
        if root.contains_key("openapi") {
            Some(Self::OpenApi3)
        } else if root.contains_key("swagger") {
            Some(Self::Swagger2)
        } else {
            None
        }
    }

    fn schemas<'a>(self, root: &'a Map<String, Value>) -> Option<&'a Value> {
        match self {
            Self::OpenApi3 => root.get("components").and_then(|c| c.get("schemas")),
            Self::Swagger2 => root.get("definitions"),
        }
    }
}

/// Whether a JSON document looks like an OpenAPI or Swagger description.
#[must_use]
pub fn is_oas_document(doc: &Value) -> bool {
    doc.as_object().and_then(Flavor::detect).is_some()
}

/// Converts an OpenAPI 3.x / Swagger 2.0 document into a service description.
///
/// # Errors
///
/// Returns `OasError::UnsupportedFormat` when the version field is missing,
/// and `OasError::InvalidField` when `paths`, `tags` or the schema map have
/// the wrong JSON type. Individual malformed operations or schemas are
/// skipped with a warning.
pub fn service_from_document(doc: &Value) -> OasResult<ServiceNode> {
    let root = doc
        .as_object()
        .ok_or_else(|| OasError::invalid("$", "expected a JSON object"))?;
    let flavor = Flavor::detect(root).ok_or(OasError::UnsupportedFormat)?;

    let info = root.get("info");
    let name = info
        .and_then(|i| i.get("title"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let version = info
        .and_then(|i| i.get("version"))
        .and_then(Value::as_str)
        .map(str::to_string);

    let tags = declared_tags(root.get("tags"))?;

    let mut children: Vec<ServiceChildNode> = Vec::new();
    children.extend(operations(root.get("paths"))?.into_iter().map(Into::into));
    children.extend(schemas(flavor.schemas(root))?.into_iter().map(Into::into));

    tracing::debug!(
        "Converted {:?} document '{}': {} tags, {} nodes",
        flavor,
        name,
        tags.len(),
        children.len()
    );

    Ok(ServiceNode {
        name,
        version,
        tags,
        children,
    })
}

/// Loads a service description from a JSON file.
///
/// OpenAPI / Swagger documents are converted; anything else is read as a
/// serialized [`ServiceNode`].
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_service(path: &Path) -> crate::Result<ServiceNode> {
    let content = std::fs::read_to_string(path)?;
    let doc: Value = serde_json::from_str(&content)?;

    let service = if is_oas_document(&doc) {
        service_from_document(&doc)?
    } else {
        serde_json::from_value(doc)?
    };

    tracing::info!(
        "Loaded service '{}' from {} ({} nodes)",
        service.name,
        path.display(),
        service.children.len()
    );
    Ok(service)
}

/// Escapes one JSON-pointer reference token.
#[must_use]
pub fn escape_pointer(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

fn declared_tags(tags: Option<&Value>) -> OasResult<Vec<String>> {
    let Some(tags) = tags else {
        return Ok(Vec::new());
    };
    let tags = tags
        .as_array()
        .ok_or_else(|| OasError::invalid("tags", "expected an array"))?;

    Ok(tags
        .iter()
        .filter_map(|tag| {
            let name = tag.get("name").and_then(Value::as_str);
            if name.is_none() {
                tracing::warn!("Skipping tag without a name: {}", tag);
            }
            name.map(str::to_string)
        })
        .collect())
}

fn operations(paths: Option<&Value>) -> OasResult<Vec<OperationNode>> {
    let Some(paths) = paths else {
        return Ok(Vec::new());
    };
    let paths = paths
        .as_object()
        .ok_or_else(|| OasError::invalid("paths", "expected an object"))?;

    let mut ops = Vec::new();
    for (path, item) in paths {
        let Some(item) = item.as_object() else {
            tracing::warn!("Skipping path item '{}': not an object", path);
            continue;
        };

        for (method, operation) in item {
            if !HTTP_METHODS.contains(&method.as_str()) {
                continue;
            }
            match operation.as_object() {
                Some(operation) => ops.push(operation_node(path, method, operation)),
                None => tracing::warn!("Skipping {} {}: not an object", method, path),
            }
        }
    }
    Ok(ops)
}

fn operation_node(path: &str, method: &str, operation: &Map<String, Value>) -> OperationNode {
    let text = |key: &str| {
        operation
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    };

    let name = text("summary")
        .or_else(|| text("operationId"))
        .unwrap_or(path)
        .to_string();

    let tags = operation
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let extensions: Map<String, Value> = operation
        .iter()
        .filter(|(key, _)| key.starts_with("x-"))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    OperationNode {
        uri: format!("/paths/{}/{}", escape_pointer(path), method),
        name,
        method: method.to_string(),
        description: text("description").unwrap_or_default().to_string(),
        internal: is_flagged_internal(operation),
        tags,
        extensions,
    }
}

fn schemas(definitions: Option<&Value>) -> OasResult<Vec<SchemaNode>> {
    let Some(definitions) = definitions else {
        return Ok(Vec::new());
    };
    let definitions = definitions
        .as_object()
        .ok_or_else(|| OasError::invalid("schemas", "expected an object"))?;

    let mut nodes = Vec::with_capacity(definitions.len());
    for (key, schema) in definitions {
        let Some(schema) = schema.as_object() else {
            tracing::warn!("Skipping schema '{}': not an object", key);
            continue;
        };
        let text = |field: &str| {
            schema
                .get(field)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        };
        nodes.push(SchemaNode {
            uri: format!("/schemas/{}", escape_pointer(key)),
            name: text("title").unwrap_or(key.as_str()).to_string(),
            description: text("description").unwrap_or_default().to_string(),
            internal: is_flagged_internal(schema),
        });
    }
    Ok(nodes)
}

fn is_flagged_internal(object: &Map<String, Value>) -> bool {
    object
        .get(INTERNAL_EXTENSION)
        .and_then(Value::as_bool)
        .unwrap_or(false)
}
