//! Notification errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Invalid address '{address}': {message}")]
    InvalidAddress { address: String, message: String },

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("Transport error: {0}")]
    Transport(String),
}
