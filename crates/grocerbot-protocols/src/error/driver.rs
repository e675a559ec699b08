//! Browser session errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Browser session is not open. Call init() first")]
    SessionNotReady,

    #[error("Browser session is already open")]
    SessionAlreadyOpen,

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Element is no longer attached to the page: {0}")]
    StaleElement(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    #[error("Browser action failed: {0}")]
    ActionFailed(String),
}

impl DriverError {
    /// True for errors caused by a page control that is missing or gone.
    pub fn is_missing_element(&self) -> bool {
        matches!(self, Self::ElementNotFound(_) | Self::StaleElement(_))
    }
}
