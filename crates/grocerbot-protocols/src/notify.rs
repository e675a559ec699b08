//! Notification protocol.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::NotifyError;

/// An HTML email to deliver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    /// Display form of the sender, e.g. `Grocerbot <bot@example.com>`.
    pub sender_display: String,
    pub recipient: String,
    pub subject: String,
    pub html_body: String,
}

/// Best-effort message delivery.
///
/// Transport options (host, credentials) belong to the implementation's
/// construction, not to each call.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError>;
}
