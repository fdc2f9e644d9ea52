//! Sad path tests for error handling and edge cases.
//!
//! Tests missing files, malformed documents, and partial recovery.

mod common;

use apitoc::services::{compute_api_tree, load_service, service_from_document, TreeConfig};
use apitoc::{OasError, ServerError};
use common::TestEnv;
use serde_json::json;

// ============================================================================
// File Loading Tests
// ============================================================================

#[test]
fn test_missing_file() {
    let env = TestEnv::new();
    let err = load_service(&env.path("missing.json")).unwrap_err();

    assert!(matches!(err, ServerError::Io(_)));
    assert_eq!(err.code(), "IO_ERROR");
}

#[test]
fn test_malformed_json() {
    let env = TestEnv::new();
    let path = env.write_file("broken.json", "{ \"openapi\": \"3.0.0\", ");
    let err = load_service(&path).unwrap_err();

    assert!(matches!(err, ServerError::Json(_)));
    assert_eq!(err.code(), "JSON_ERROR");
}

#[test]
fn test_json_that_is_not_a_service() {
    let env = TestEnv::new();
    let path = env.write_file("string.json", "\"just a string\"");
    assert!(matches!(load_service(&path), Err(ServerError::Json(_))));
}

#[test]
fn test_wrong_field_type_in_oas_document() {
    let env = TestEnv::new();
    let path = env.write_file("bad.json", r#"{ "swagger": "2.0", "tags": {} }"#);
    let err = load_service(&path).unwrap_err();

    match &err {
        ServerError::Oas(OasError::InvalidField { field, .. }) => assert_eq!(field, "tags"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.code(), "INVALID_FIELD");
}

// ============================================================================
// Document Conversion Tests
// ============================================================================

#[test]
fn test_unsupported_format() {
    let err = service_from_document(&json!({ "info": { "title": "No version" } })).unwrap_err();
    assert!(matches!(err, OasError::UnsupportedFormat));
}

#[test]
fn test_malformed_entries_are_skipped() {
    let doc = json!({
        "openapi": "3.0.0",
        "tags": [{ "description": "no name" }, { "name": "pets" }],
        "paths": {
            "/broken": 5,
            "/pets": { "get": "not an object", "post": { "summary": "Create" } }
        },
        "components": { "schemas": { "Bad": [], "Pet": {} } }
    });
    let service = service_from_document(&doc).unwrap();

    assert_eq!(service.tags, vec!["pets"]);
    assert_eq!(service.operations().count(), 1);
    assert_eq!(service.schemas().count(), 1);
}

#[test]
fn test_missing_sections_give_empty_service() {
    let service = service_from_document(&json!({ "openapi": "3.1.0" })).unwrap();

    assert!(service.name.is_empty());
    assert!(service.children.is_empty());
    assert_eq!(compute_api_tree(&service, TreeConfig::default()).len(), 1);
}

#[test]
fn test_non_string_extensions_are_ignored() {
    let doc = json!({
        "openapi": "3.0.0",
        "paths": {
            "/a": { "get": { "tags": ["a"], "x-tagGroups": 42 } },
            "/b": { "get": { "x-tagsGroup": ["Ops"] } },
            "/c": { "get": { "tags": [""] } }
        }
    });
    let service = service_from_document(&doc).unwrap();
    let tree = compute_api_tree(&service, TreeConfig::default());

    // Every category falls back to the default
    let dividers: Vec<&str> = tree
        .iter()
        .filter_map(|item| match item {
            apitoc::TocItem::Divider { title } => Some(title.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(dividers, vec!["Endpoints"]);
}

#[test]
fn test_server_load_propagates_errors() {
    let env = TestEnv::new();
    let result = apitoc::server::ApitocServer::load(&env.path("nope.json"), TreeConfig::default());
    assert!(result.is_err());
}
