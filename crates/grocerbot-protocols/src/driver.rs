//! Browser page driver protocol.
//!
//! A [`PageDriver`] owns exactly one automated page. Everything above it
//! (item resolution, cart manipulation) talks to the storefront only through
//! these primitives, which keeps that logic testable against a fake page.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::DriverError;

/// Opaque reference to an element on the page.
///
/// Handles are transient: the page may replace or detach the underlying node
/// at any time (for example after an add-to-cart click), after which any
/// operation on the handle fails with [`DriverError::StaleElement`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementHandle {
    id: String,
    selector: String,
}

impl ElementHandle {
    pub fn new(id: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            selector: selector.into(),
        }
    }

    /// Driver-specific identifier (a CDP remote object id, a fake node key, ...).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Selector the element was located with.
    pub fn selector(&self) -> &str {
        &self.selector
    }
}

/// Primitive operations over a single browser page.
///
/// Every operation except [`init`](PageDriver::init) fails with
/// [`DriverError::SessionNotReady`] while no session is open. Operations that
/// act on a selector fail with [`DriverError::ElementNotFound`] when the
/// selector matches nothing; callers rely on that error to tell page layouts
/// apart, so implementations must never swallow it.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Open the session. Fails with [`DriverError::SessionAlreadyOpen`] when live.
    async fn init(&mut self) -> Result<(), DriverError>;

    /// Close the session and release the page.
    async fn close(&mut self) -> Result<(), DriverError>;

    /// Whether a session is currently open.
    fn is_open(&self) -> bool;

    /// Navigate to a URL and wait for the document to load.
    async fn navigate(&self, url: &str) -> Result<(), DriverError>;

    /// First element matching `selector` in the document.
    async fn locate(&self, selector: &str) -> Result<Option<ElementHandle>, DriverError>;

    /// First element matching `selector` inside `parent`.
    async fn locate_within(
        &self,
        parent: &ElementHandle,
        selector: &str,
    ) -> Result<Option<ElementHandle>, DriverError>;

    /// All elements matching `selector` inside `parent`, in document order.
    async fn locate_all_within(
        &self,
        parent: &ElementHandle,
        selector: &str,
    ) -> Result<Vec<ElementHandle>, DriverError>;

    /// Rendered text of an element.
    async fn read_text(&self, element: &ElementHandle) -> Result<String, DriverError>;

    /// Attribute `name` of the first element matching `selector` inside `element`.
    ///
    /// Fails with [`DriverError::ElementNotFound`] when `selector` matches
    /// nothing; returns `None` when the attribute is absent.
    async fn read_attribute(
        &self,
        element: &ElementHandle,
        selector: &str,
        name: &str,
    ) -> Result<Option<String>, DriverError>;

    /// Click the first element matching `selector`.
    async fn click(&self, selector: &str, click_count: u32) -> Result<(), DriverError>;

    /// Click a previously located element.
    async fn click_element(&self, element: &ElementHandle, click_count: u32) -> Result<(), DriverError>;

    /// Type text into the first element matching `selector`.
    async fn type_text(&self, selector: &str, text: &str) -> Result<(), DriverError>;

    /// Clear the text of the input matching `selector`.
    async fn clear_text(&self, selector: &str) -> Result<(), DriverError>;

    /// Set the selected value of the `<select>` matching `selector`.
    async fn select_option(&self, selector: &str, value: &str) -> Result<(), DriverError>;

    /// Current page URL.
    async fn current_url(&self) -> Result<String, DriverError>;

    /// Yield for a fixed duration.
    async fn pause(&self, duration: Duration) -> Result<(), DriverError>;

    /// Capture the visible page as PNG bytes.
    async fn screenshot(&self) -> Result<Vec<u8>, DriverError>;

    /// Whether `selector` matches anything in the document.
    async fn element_exists(&self, selector: &str) -> Result<bool, DriverError> {
        Ok(self.locate(selector).await?.is_some())
    }

    /// Whether `selector` matches anything inside `parent`.
    async fn element_exists_within(
        &self,
        parent: &ElementHandle,
        selector: &str,
    ) -> Result<bool, DriverError> {
        Ok(self.locate_within(parent, selector).await?.is_some())
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
