//! Common error types for update-noti.

use thiserror::Error;

/// Common error type for update-noti operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No supported package manager found")]
    NoPackageManager,

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using common Error.
pub type Result<T> = std::result::Result<T, Error>;
