//! Grocery list source errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Grocery list source is not initialized")]
    NotInitialized,

    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Invalid row {row}: {message}")]
    InvalidRow { row: usize, message: String },

    #[error("HTTP error: {0}")]
    Http(String),
}
