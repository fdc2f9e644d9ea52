//! apitoc: table of contents and search for API documentation.
//!
//! This library turns a parsed API description into a navigable tree and
//! searches it:
//! - Tag grouping (case-insensitive, declared tag order first)
//! - Category dividers from vendor extensions, `Endpoints` last
//! - Field-count search scoring with an operation bonus
//! - Debounced sessions for interactive input
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │        CLI (clap)   /   MCP Server (rmcp)   │
//! └─────────────────┬───────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────┐
//! │                  Tools                       │
//! │          toc, search, tag_groups             │
//! └─────────────────┬───────────────────────────┘
//!                   │
//!    ┌──────────────▼──────────────┐
//!    │  OpenAPI / Swagger loader   │
//!    └──────────────┬──────────────┘
//!                   │ ServiceNode
//!    ┌──────────────▼──────────────┐
//!    │        Tree builder         │
//!    └──────────────┬──────────────┘
//!                   │ Vec<TocItem>
//!    ┌──────────────▼──────────────┐
//!    │   Search (+ debounced       │
//!    │   SearchSession)            │
//!    └─────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod fmt;
pub mod model;
pub mod server;
pub mod services;
pub mod tools;
pub mod types;

pub use error::{OasError, Result, ServerError};
pub use model::{OperationNode, SchemaNode, ServiceChildNode, ServiceNode, TocItem, TocNode};
pub use services::{
    compute_api_tree, compute_tag_groups, load_service, search_openapi, SearchSession, TreeConfig,
};
pub use types::{NodeType, Score};
