//! Search MCP tool.

use crate::config::{DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT};
use crate::model::TocItem;
use crate::services::search::{search_with_config, SearchConfig, SearchHit};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input for the search tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchInput {
    /// Words to look for in titles, tags, methods and descriptions
    pub query: String,
    /// Maximum results to return (default: 50)
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}

/// Output for the search tool.
#[derive(Debug, Serialize)]
pub struct SearchOutput {
    /// Ranked results
    pub results: Vec<SearchHit>,
    /// Number of results returned
    pub total_returned: usize,
    /// Query that was executed
    pub query: String,
    /// Score interpretation guide
    pub score_guide: &'static str,
}

/// Score guide text for search results
const SCORE_GUIDE: &str =
    "Scores count matching fields; operations always get +3, so 3 means an operation matched nothing";

/// Executes the search tool.
///
/// # Errors
///
/// Returns an error string if the query is blank.
pub fn execute_search(tree: &[TocItem], input: SearchInput) -> Result<SearchOutput, String> {
    if input.query.trim().is_empty() {
        return Err("Query is empty. Pass one or more words to search for.".to_string());
    }

    let config = SearchConfig::default().with_limit(input.limit.min(MAX_SEARCH_LIMIT));
    let results = search_with_config(&input.query, tree, &config);

    Ok(SearchOutput {
        total_returned: results.len(),
        results,
        query: input.query,
        score_guide: SCORE_GUIDE,
    })
}

impl From<crate::services::SearchState> for SearchOutput {
    fn from(state: crate::services::SearchState) -> Self {
        Self {
            total_returned: state.results.len(),
            results: state.results,
            query: state.query,
            score_guide: SCORE_GUIDE,
        }
    }
}
