//! Error types for schema handling.

use thiserror::Error;

/// Schema-specific errors.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The schema document could not be parsed.
    #[error("failed to parse schema document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type alias for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
