//! Fuzzy search over a table of contents.
//!
//! The tree is flattened into leaf candidates that remember the divider
//! (category) and group they sit under. A candidate scores one point per
//! field that contains the query or is contained in it, case-insensitively.
//! Anything that is not a schema gets a fixed bonus whether or not a field
//! matched, so operations always survive and outrank schemas that match the
//! same fields.

use crate::config::{
    DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT, NON_SCHEMA_BONUS, PREVIEW_CHARS, TITLE_SEPARATOR,
};
use crate::model::{TocItem, TocNode};
use crate::types::{NodeType, Score};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("BUG: invalid WHITESPACE_RE regex literal"));

/// Configuration for search ranking.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum results to return
    pub limit: usize,
    /// Bonus added to matching non-schema items
    pub non_schema_bonus: u32,
    /// Description characters kept in result previews
    pub preview_chars: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SEARCH_LIMIT,
            non_schema_bonus: NON_SCHEMA_BONUS,
            preview_chars: PREVIEW_CHARS,
        }
    }
}

impl SearchConfig {
    /// Returns a config with the given limit, clamped to [`MAX_SEARCH_LIMIT`].
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.min(MAX_SEARCH_LIMIT);
        self
    }
}

/// A tree leaf flattened for search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchCandidate<'a> {
    pub node: &'a TocNode,
    /// Title of the closest divider above the leaf, empty if none
    pub category: &'a str,
    /// Title of the enclosing group, if any
    pub group: Option<&'a str>,
}

impl SearchCandidate<'_> {
    /// Group and leaf titles joined with `" - "`.
    #[must_use]
    pub fn full_title(&self) -> String {
        match self.group.filter(|g| !g.is_empty()) {
            Some(group) => format!("{group}{TITLE_SEPARATOR}{}", self.node.title),
            None => self.node.title.clone(),
        }
    }
}

/// A ranked search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub slug: String,
    /// Group chain and leaf title, e.g. `"Pets - List pets"`
    pub title: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// HTTP method for operations, empty for schemas
    pub summary: String,
    pub category: String,
    pub description: String,
    /// Shortened description for result lists
    pub preview: String,
    pub score: Score,
}

/// Flattens a tree into search candidates, skipping the overview.
#[must_use]
pub fn collect_candidates(tree: &[TocItem]) -> Vec<SearchCandidate<'_>> {
    let mut category = "";
    let mut candidates = Vec::new();

    for item in tree {
        match item {
            TocItem::Overview => {}
            TocItem::Divider { title } => category = title.as_str(),
            TocItem::Node(node) => candidates.push(SearchCandidate {
                node,
                category,
                group: None,
            }),
            TocItem::Group(group) => {
                candidates.extend(group.items.iter().map(|node| SearchCandidate {
                    node,
                    category,
                    group: Some(group.title.as_str()),
                }));
            }
        }
    }

    candidates
}

/// Scores one candidate against a query.
///
/// Empty fields never match, and an empty query matches no field. The
/// non-schema bonus is added regardless.
#[must_use]
pub fn search_score(query: &str, candidate: &SearchCandidate<'_>, config: &SearchConfig) -> Score {
    let node = candidate.node;
    let bonus = if node.node_type.is_schema() {
        0
    } else {
        config.non_schema_bonus
    };

    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Score::new(bonus);
    }

    let title = candidate.full_title();
    let fields = title
        .split(TITLE_SEPARATOR)
        .chain([
            candidate.category,
            node.meta.as_str(),
            node.node_type.as_str(),
            node.description.as_str(),
        ]);

    let matches = fields
        .filter(|field| !field.is_empty())
        .map(str::to_lowercase)
        .filter(|field| field.contains(&query) || query.contains(field.as_str()))
        .count();

    Score::new(u32::try_from(matches).unwrap_or(u32::MAX)).boosted(bonus)
}

/// Searches a tree with the default configuration (top 50).
#[must_use]
pub fn search_openapi(query: &str, tree: &[TocItem]) -> Vec<SearchHit> {
    search_with_config(query, tree, &SearchConfig::default())
}

/// Searches a tree: scores every leaf, drops zero scores, sorts by score
/// (ties keep tree order) and keeps the top `config.limit`.
///
/// A blank query is no search at all and returns nothing.
#[must_use]
pub fn search_with_config(query: &str, tree: &[TocItem], config: &SearchConfig) -> Vec<SearchHit> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let candidates = collect_candidates(tree);
    let total = candidates.len();

    let mut scored: Vec<_> = candidates
        .into_iter()
        .map(|c| (search_score(query, &c, config), c))
        .filter(|(score, _)| !score.is_zero())
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let hits: Vec<SearchHit> = scored
        .into_iter()
        .take(config.limit.min(MAX_SEARCH_LIMIT))
        .map(|(score, c)| to_hit(&c, score, config))
        .collect();

    tracing::debug!(
        "Search '{}' matched {} of {} leaves",
        query,
        hits.len(),
        total
    );

    hits
}

fn to_hit(candidate: &SearchCandidate<'_>, score: Score, config: &SearchConfig) -> SearchHit {
    let node = candidate.node;
    SearchHit {
        id: node.id.clone(),
        slug: node.slug.clone(),
        title: candidate.full_title(),
        node_type: node.node_type,
        summary: node.meta.clone(),
        category: candidate.category.to_string(),
        description: node.description.clone(),
        preview: truncate_description(&node.description, config.preview_chars),
        score,
    }
}

/// Shortens a description to `max_chars` characters.
///
/// When cut, whitespace runs collapse to single spaces and `...` is
/// appended. Short descriptions are returned unchanged.
#[must_use]
pub fn truncate_description(description: &str, max_chars: usize) -> String {
    match description.char_indices().nth(max_chars) {
        None => description.to_string(),
        Some((cut, _)) => {
            let mut preview = WHITESPACE_RE.replace_all(&description[..cut], " ").into_owned();
            preview.push_str("...");
            preview
        }
    }
}
