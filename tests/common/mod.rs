//! Common test utilities for apitoc integration tests.
//!
//! Provides a small petstore API both as an OpenAPI document on disk and as
//! an in-memory `ServiceNode`, plus a generator for large services.

#![allow(dead_code)] // Test utilities may not all be used in every test file

use apitoc::model::{OperationNode, SchemaNode, ServiceNode};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// OpenAPI 3 petstore with one item per layout rule:
/// - `/health` is untagged with an `x-tagsGroup` category
/// - `/version` is untagged with no category
/// - `/pets` uses the declared `Pets` tag in two casings
/// - `/store/inventory` carries an `x-tagGroups` category
/// - `/users/{id}` is internal under an undeclared tag
pub const PETSTORE_OAS: &str = r#"{
  "openapi": "3.0.3",
  "info": { "title": "Petstore", "version": "1.0.0" },
  "tags": [{ "name": "Pets" }, { "name": "Store" }],
  "paths": {
    "/health": {
      "get": { "summary": "Health check", "x-tagsGroup": "Ops" }
    },
    "/version": {
      "get": { "operationId": "getVersion" }
    },
    "/pets": {
      "parameters": [],
      "get": {
        "summary": "List pets",
        "tags": ["pets"],
        "description": "Returns all pets from the system"
      },
      "post": {
        "summary": "Create a pet",
        "tags": ["Pets"],
        "description": "Adds a new pet to the store"
      }
    },
    "/store/inventory": {
      "get": {
        "summary": "Get inventory",
        "tags": ["store"],
        "x-tagGroups": "Commerce",
        "description": "Returns pet inventories by status"
      }
    },
    "/users/{id}": {
      "delete": { "summary": "Delete user", "tags": ["Users"], "x-internal": true }
    }
  },
  "components": {
    "schemas": {
      "Pet": { "type": "object", "description": "A pet for sale" },
      "Order": { "type": "object", "title": "Purchase order" },
      "Audit": { "type": "object", "x-internal": true }
    }
  }
}"#;

/// A temp directory holding API description files.
pub struct TestEnv {
    pub dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Writes a file and returns its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes the petstore document into a fresh environment.
pub fn petstore_env() -> (TestEnv, PathBuf) {
    let env = TestEnv::new();
    let path = env.write_file("petstore.json", PETSTORE_OAS);
    (env, path)
}

/// The petstore as a parsed document.
pub fn petstore_document() -> serde_json::Value {
    serde_json::from_str(PETSTORE_OAS).expect("petstore fixture is valid JSON")
}

/// The petstore converted to a service.
pub fn petstore() -> ServiceNode {
    apitoc::services::service_from_document(&petstore_document()).expect("petstore fixture converts")
}

pub fn operation(path: &str, method: &str, name: &str, tags: &[&str]) -> OperationNode {
    OperationNode {
        uri: format!("/paths/{}/{}", apitoc::services::oas::escape_pointer(path), method),
        name: name.to_string(),
        method: method.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        ..Default::default()
    }
}

pub fn schema(name: &str, description: &str) -> SchemaNode {
    SchemaNode {
        uri: format!("/schemas/{name}"),
        name: name.to_string(),
        description: description.to_string(),
        internal: false,
    }
}

/// A service with `count` operations spread over ten tags, plus one schema
/// per ten operations.
pub fn large_service(count: usize) -> ServiceNode {
    let tags: Vec<String> = (0..10).map(|i| format!("Resource{i}")).collect();
    let mut children = Vec::with_capacity(count + count / 10);

    for i in 0..count {
        let tag = &tags[i % tags.len()];
        let mut op = operation(
            &format!("/widgets/{i}"),
            if i % 2 == 0 { "get" } else { "post" },
            &format!("Widget operation {i}"),
            &[tag.as_str()],
        );
        op.description = format!("Manages widget {i} in {tag}");
        if i % 7 == 0 {
            op.extensions
                .insert("x-tagGroups".into(), json!(format!("Area{}", i % 3)));
        }
        children.push(op.into());
    }
    for i in 0..count / 10 {
        children.push(schema(&format!("Widget{i}"), "A widget model").into());
    }

    ServiceNode {
        name: "Widgets".into(),
        version: Some("2.0".into()),
        tags,
        children,
    }
}
