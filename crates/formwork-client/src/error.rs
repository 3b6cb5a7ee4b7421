//! Error types for the form client.

use thiserror::Error;

/// Client-side errors.
///
/// Validation failures are not errors; they live in the field-errors
/// map and never cross this boundary.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The form schema or prior answers could not be loaded.
    #[error("failed to load form: {0}")]
    Load(String),

    /// Token fetch or refresh failed.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The transport layer failed outright.
    #[error("transport error: {0}")]
    Transport(String),

    /// An operation needs a loaded form session.
    #[error("no active form session")]
    NoSession,
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
