//! Error types for agui-bridge-core.

use thiserror::Error;

/// The main error type for core operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A value that does not form a valid event.
    #[error("Invalid event: {0}")]
    InvalidEvent(String),
}

/// Result type alias using CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;
