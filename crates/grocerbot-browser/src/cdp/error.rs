//! CDP error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CdpError {
    /// Nothing answered on the debugging endpoint.
    #[error("Chrome not reachable at {0}")]
    Unavailable(String),

    #[error("WebSocket handshake failed: {0}")]
    Handshake(String),

    #[error("WebSocket transport error: {0}")]
    Transport(String),

    /// Chrome rejected a command.
    #[error("{method} failed: {message} (code {code})")]
    Remote {
        method: String,
        code: i64,
        message: String,
    },

    #[error("Malformed CDP payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Stale element: {0}")]
    StaleElement(String),

    #[error("Script threw: {0}")]
    Script(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    /// The socket went away while a reply was outstanding.
    #[error("CDP connection closed")]
    Closed,

    #[error("Unexpected reply: {0}")]
    MalformedReply(String),
}

impl CdpError {
    /// Chrome answers `-32000` when a node or remote object no longer exists.
    pub fn is_missing_object(&self) -> bool {
        matches!(self, CdpError::Remote { code: -32000, .. })
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for CdpError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        CdpError::Transport(e.to_string())
    }
}

impl From<reqwest::Error> for CdpError {
    fn from(e: reqwest::Error) -> Self {
        CdpError::Http(e.to_string())
    }
}
