//! Integration tests for tool execution.
//!
//! Loads the petstore from disk and drives the public tool API end-to-end.

mod common;

use apitoc::server::ApitocServer;
use apitoc::services::{compute_api_tree, load_service, TreeConfig};
use apitoc::tools::*;
use common::{petstore, petstore_env, TestEnv};
use serde_json::{json, Value};

#[test]
fn test_load_service_from_oas_file() {
    let (_env, path) = petstore_env();
    let service = load_service(&path).unwrap();

    assert_eq!(service.name, "Petstore");
    assert_eq!(service.version.as_deref(), Some("1.0.0"));
    assert_eq!(service.tags, vec!["Pets", "Store"]);
    assert_eq!(service.operations().count(), 6);
    assert_eq!(service.schemas().count(), 3);

    // Document order survives loading
    let uris: Vec<&str> = service.operations().map(|op| op.uri.as_str()).collect();
    assert_eq!(
        uris,
        vec![
            "/paths/~1health/get",
            "/paths/~1version/get",
            "/paths/~1pets/get",
            "/paths/~1pets/post",
            "/paths/~1store~1inventory/get",
            "/paths/~1users~1{id}/delete",
        ]
    );
}

#[test]
fn test_load_service_from_serialized_service() {
    let env = TestEnv::new();
    let serialized = serde_json::to_string(&petstore()).unwrap();
    let path = env.write_file("service.json", &serialized);

    assert_eq!(load_service(&path).unwrap(), petstore());
}

#[test]
fn test_toc_tool() {
    let service = petstore();
    let out = execute_toc(&service, &TocInput::default());

    assert_eq!(out.service, "Petstore");
    assert_eq!(out.version.as_deref(), Some("1.0.0"));
    assert_eq!(out.leaf_count, 9);
    assert_eq!(out.first_slug.as_deref(), Some("/paths/~1health/get"));

    let hidden = execute_toc(
        &service,
        &TocInput {
            hide_schemas: true,
            hide_internal: true,
        },
    );
    assert_eq!(hidden.leaf_count, 5);
}

#[test]
fn test_toc_output_json_shape() {
    let out = execute_toc(&petstore(), &TocInput::default());
    let value: Value = serde_json::to_value(&out).unwrap();
    let tree = value["tree"].as_array().unwrap();

    assert_eq!(tree[0], json!({ "kind": "overview" }));
    assert_eq!(tree[1], json!({ "kind": "divider", "title": "Ops" }));
    assert_eq!(tree[2]["kind"], "node");
    assert_eq!(tree[2]["type"], "http_operation");
    assert_eq!(tree[2]["meta"], "get");
    assert_eq!(tree[4]["kind"], "group");
    assert_eq!(tree[4]["title"], "Store");
    assert_eq!(tree[4]["items"][0]["title"], "Get inventory");
}

#[test]
fn test_groups_tool() {
    let out = execute_groups(&petstore());

    let titles: Vec<&str> = out.groups.iter().map(|g| g.title.as_str()).collect();
    assert_eq!(titles, vec!["Pets", "Store", "Users"]);
    assert_eq!(out.groups[0].operations.len(), 2);
    assert_eq!(out.groups[1].category, "Commerce");
    assert!(!out.groups[2].declared);
    assert_eq!(out.ungrouped, vec!["/paths/~1health/get", "/paths/~1version/get"]);
}

#[test]
fn test_search_tool() {
    let tree = compute_api_tree(&petstore(), TreeConfig::default());
    let out = execute_search(
        &tree,
        SearchInput {
            query: "pets".into(),
            limit: 2,
        },
    )
    .unwrap();

    assert_eq!(out.total_returned, 2);
    assert_eq!(out.results[0].title, "Pets - List pets");
    assert_eq!(out.query, "pets");
    assert!(!out.score_guide.is_empty());
}

#[test]
fn test_search_tool_rejects_blank_query() {
    let tree = compute_api_tree(&petstore(), TreeConfig::default());
    let err = execute_search(
        &tree,
        SearchInput {
            query: "  ".into(),
            limit: 10,
        },
    )
    .unwrap_err();
    assert!(err.contains("empty"));
}

#[test]
fn test_search_input_default_limit() {
    let input: SearchInput = serde_json::from_value(json!({ "query": "pets" })).unwrap();
    assert_eq!(input.limit, apitoc::config::DEFAULT_SEARCH_LIMIT);
}

#[test]
fn test_server_loads_and_hides_internal() {
    let (_env, path) = petstore_env();
    let config = TreeConfig {
        hide_schemas: false,
        hide_internal: true,
    };
    let server = ApitocServer::load(&path, config).unwrap();

    assert_eq!(server.service().name, "Petstore");
    assert_eq!(server.service().operations().count(), 6);
}
