//! MCP server implementation using rmcp.

use crate::config::MAX_RESPONSE_BYTES;
use crate::model::{ServiceNode, TocItem};
use crate::services::tree::{compute_api_tree, TreeConfig};
use crate::tools;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// Truncates a JSON response string at a clean boundary before the limit,
/// appending a truncation notice. Works with both compact and pretty JSON.
fn truncate_response(mut json: String) -> String {
    if json.len() <= MAX_RESPONSE_BYTES {
        return json;
    }
    let original_len = json.len();
    // Find clean cut: last comma (JSON record boundary), then newline, then byte limit
    let search_region = &json[..json.floor_char_boundary(MAX_RESPONSE_BYTES)];
    let cut_point = search_region
        .rfind(',')
        .or_else(|| search_region.rfind('\n'))
        .unwrap_or(search_region.len());
    let safe_cut = json.floor_char_boundary(cut_point + 1);
    json.truncate(safe_cut);
    json.push_str(&format!(
        "...\n[TRUNCATED: response exceeded {} bytes, showing first {}]",
        original_len, safe_cut
    ));
    json
}

/// Helper to run a blocking tool operation and return structured MCP results.
///
/// Uses `spawn_blocking()` so large trees don't stall the transport and returns either:
/// - `CallToolResult::success()` with JSON content for success
/// - `CallToolResult::error()` with error details for tool errors
/// - `McpError::internal_error()` for panics/JoinErrors
async fn run_tool<T, E, F>(name: &'static str, f: F) -> Result<CallToolResult, McpError>
where
    T: Serialize + Send + 'static,
    E: std::fmt::Display + Send + 'static,
    F: FnOnce() -> Result<T, E> + Send + 'static,
{
    let start = std::time::Instant::now();
    let result = tokio::task::spawn_blocking(f).await;

    match result {
        Ok(Ok(output)) => {
            let json = serde_json::to_string(&output)
                .map_err(|e| McpError::internal_error(e.to_string(), None))?;
            let json = truncate_response(json);
            tracing::debug!("[{}] {:?} | {} bytes", name, start.elapsed(), json.len());
            Ok(CallToolResult::success(vec![Content::text(json)]))
        }
        Ok(Err(e)) => {
            tracing::debug!("[{}] {:?} | error: {}", name, start.elapsed(), e);
            Ok(CallToolResult::error(vec![Content::text(e.to_string())]))
        }
        Err(e) => Err(McpError::internal_error(e.to_string(), None)),
    }
}

/// MCP server for browsing one API description.
#[derive(Clone)]
pub struct ApitocServer {
    service: Arc<ServiceNode>,
    /// Tree searched by the `search` tool, built once at startup
    search_tree: Arc<Vec<TocItem>>,
    tool_router: ToolRouter<Self>,
}

impl ApitocServer {
    /// Creates a server for a loaded service.
    ///
    /// `config` decides which nodes the `search` tool can find.
    pub fn new(service: ServiceNode, config: TreeConfig) -> Self {
        let search_tree = Arc::new(compute_api_tree(&service, config));
        Self {
            service: Arc::new(service),
            search_tree,
            tool_router: Self::tool_router(),
        }
    }

    /// Loads a service description file and creates a server for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or converted.
    pub fn load(path: &Path, config: TreeConfig) -> Result<Self, crate::ServerError> {
        let service = crate::services::load_service(path)?;
        Ok(Self::new(service, config))
    }

    pub fn service(&self) -> &ServiceNode {
        &self.service
    }
}

// Tool implementations using rmcp macros
#[tool_router]
impl ApitocServer {
    /// Get the navigation tree.
    #[tool(description = "Get the API table of contents: an overview entry, category dividers, \
        operations grouped by tag, then schemas.\n\n\
        Options: hide_schemas=true drops the Schemas section, hide_internal=true drops internal nodes.\n\n\
        Tip: Use 'search' to find a specific operation or schema by name.")]
    async fn toc(
        &self,
        Parameters(input): Parameters<tools::TocInput>,
    ) -> Result<CallToolResult, McpError> {
        let service = Arc::clone(&self.service);
        run_tool("toc", move || {
            Ok::<_, String>(tools::execute_toc(&service, &input))
        })
        .await
    }

    /// Search operations and schemas.
    #[tool(description = "Search operations and schemas by title, tag, category, HTTP method or description.\n\n\
        Examples: 'pets', 'delete', 'create order'\n\
        Results are ranked; operations rank above schemas matching the same fields. At most 50 by default.")]
    async fn search(
        &self,
        Parameters(input): Parameters<tools::SearchInput>,
    ) -> Result<CallToolResult, McpError> {
        let tree = Arc::clone(&self.search_tree);
        run_tool("search", move || tools::execute_search(&tree, input)).await
    }

    /// List tag groups.
    #[tool(description = "List tag groups in display order with their category and operation URIs, \
        plus operations that have no tag.")]
    async fn tag_groups(&self) -> Result<CallToolResult, McpError> {
        let service = Arc::clone(&self.service);
        run_tool("tag_groups", move || {
            Ok::<_, String>(tools::execute_groups(&service))
        })
        .await
    }
}

// Implement ServerHandler trait
#[tool_handler]
impl ServerHandler for ApitocServer {
    fn get_info(&self) -> ServerInfo {
        let title = if self.service.name.is_empty() {
            "an API".to_string()
        } else {
            format!("'{}'", self.service.name)
        };

        let instructions = format!(
            "apitoc: navigation and search for {title}.\n\n\
             WORKFLOW:\n\
             1. toc -> see the structure (categories, tag groups, schemas)\n\
             2. search -> find operations or schemas by keyword\n\
             3. tag_groups -> inspect how operations are grouped\n\n\
             Slugs in results are JSON-pointer style URIs, e.g. /paths/~1pets/get."
        );

        ServerInfo {
            instructions: Some(instructions),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
