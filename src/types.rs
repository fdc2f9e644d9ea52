//! Type-safe newtypes for apitoc.
//!
//! These newtypes provide compile-time safety and semantic clarity
//! for core domain concepts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a navigable node in the table of contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    /// An HTTP operation (path + method).
    HttpOperation,
    /// A schema / data model.
    Model,
    /// The synthetic overview page at `/`.
    Overview,
}

impl NodeType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HttpOperation => "http_operation",
            Self::Model => "model",
            Self::Overview => "overview",
        }
    }

    #[must_use]
    pub const fn is_schema(self) -> bool {
        matches!(self, Self::Model)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for NodeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http_operation" => Ok(Self::HttpOperation),
            "model" => Ok(Self::Model),
            "overview" => Ok(Self::Overview),
            other => Err(format!(
                "Invalid node type: '{}'. Valid types: http_operation, model, overview",
                other
            )),
        }
    }
}

/// Search relevance score.
///
/// A count of matching fields plus bonuses, so it is an integer.
/// Zero means "no match" and such candidates are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(u32);

impl Score {
    /// No relevance.
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Adds a bonus, saturating at `u32::MAX`.
    #[must_use]
    pub const fn boosted(self, bonus: u32) -> Self {
        Self(self.0.saturating_add(bonus))
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Score {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

// Compile-time assertions for thread safety.
// The loaded service and tree are shared across tokio tasks.
#[cfg(test)]
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<NodeType>();
    assert_send_sync::<Score>();
    assert_send_sync::<crate::model::ServiceNode>();
    assert_send_sync::<crate::model::TocItem>();
};
