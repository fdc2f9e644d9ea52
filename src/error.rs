//! Error types for apitoc.
//!
//! Tree building and search never fail; errors only come from loading
//! service descriptions and from the server/CLI edges.

use thiserror::Error;

/// Top-level server error.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Service description error: {0}")]
    Oas(#[from] OasError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors converting an OpenAPI / Swagger document.
#[derive(Error, Debug)]
pub enum OasError {
    #[error("Unsupported document: expected an 'openapi' or 'swagger' version field")]
    UnsupportedFormat,

    #[error("Invalid field '{field}': {reason}")]
    InvalidField { field: String, reason: String },
}

/// Result type alias for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;

/// Result type alias for document conversion.
pub type OasResult<T> = std::result::Result<T, OasError>;

// Error code implementations for machine-readable error responses
impl ServerError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Oas(e) => e.code(),
            Self::Io(_) => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }
}

impl OasError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedFormat => "UNSUPPORTED_FORMAT",
            Self::InvalidField { .. } => "INVALID_FIELD",
        }
    }

    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// Conversion to rmcp tool errors
impl From<ServerError> for rmcp::ErrorData {
    fn from(err: ServerError) -> Self {
        rmcp::ErrorData::internal_error(err.to_string(), None)
    }
}
