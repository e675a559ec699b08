//! `PageDriver` implementation for `BrowserSession`.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use grocerbot_protocols::{DriverError, ElementHandle, PageDriver};
use tracing::debug;

use super::adapter_core::BrowserSession;
use super::adapter_types::{driver_error, element_error};

impl BrowserSession {
    /// Resolve a document selector to a remote object id, or `ElementNotFound`.
    async fn require(&self, selector: &str) -> Result<String, DriverError> {
        self.page()?
            .query_selector(selector)
            .await
            .map_err(driver_error)?
            .ok_or_else(|| DriverError::ElementNotFound(selector.to_string()))
    }
}

#[async_trait]
impl PageDriver for BrowserSession {
    async fn init(&mut self) -> Result<(), DriverError> {
        self.open().await
    }

    async fn close(&mut self) -> Result<(), DriverError> {
        self.shutdown().await
    }

    fn is_open(&self) -> bool {
        self.live.is_some()
    }

    async fn navigate(&self, url: &str) -> Result<(), DriverError> {
        debug!("Navigating to {}", url);
        self.page()?.navigate(url).await.map_err(driver_error)
    }

    async fn locate(&self, selector: &str) -> Result<Option<ElementHandle>, DriverError> {
        let object_id = self
            .page()?
            .query_selector(selector)
            .await
            .map_err(driver_error)?;
        Ok(object_id.map(|id| ElementHandle::new(id, selector)))
    }

    async fn locate_within(
        &self,
        parent: &ElementHandle,
        selector: &str,
    ) -> Result<Option<ElementHandle>, DriverError> {
        let object_id = self
            .page()?
            .query_selector_within(parent.id(), selector)
            .await
            .map_err(|e| element_error(e, parent.selector()))?;
        Ok(object_id.map(|id| ElementHandle::new(id, selector)))
    }

    async fn locate_all_within(
        &self,
        parent: &ElementHandle,
        selector: &str,
    ) -> Result<Vec<ElementHandle>, DriverError> {
        let object_ids = self
            .page()?
            .query_selector_all_within(parent.id(), selector)
            .await
            .map_err(|e| element_error(e, parent.selector()))?;
        Ok(object_ids
            .into_iter()
            .map(|id| ElementHandle::new(id, selector))
            .collect())
    }

    async fn read_text(&self, element: &ElementHandle) -> Result<String, DriverError> {
        self.page()?
            .inner_text(element.id())
            .await
            .map_err(|e| element_error(e, element.selector()))
    }

    async fn read_attribute(
        &self,
        element: &ElementHandle,
        selector: &str,
        name: &str,
    ) -> Result<Option<String>, DriverError> {
        self.page()?
            .attribute_within(element.id(), selector, name)
            .await
            .map_err(|e| element_error(e, element.selector()))?
            .ok_or_else(|| DriverError::ElementNotFound(selector.to_string()))
    }

    async fn click(&self, selector: &str, click_count: u32) -> Result<(), DriverError> {
        let object_id = self.require(selector).await?;
        self.page()?
            .click_element(&object_id, click_count)
            .await
            .map_err(|e| element_error(e, selector))
    }

    async fn click_element(&self, element: &ElementHandle, click_count: u32) -> Result<(), DriverError> {
        self.page()?
            .click_element(element.id(), click_count)
            .await
            .map_err(|e| element_error(e, element.selector()))
    }

    async fn type_text(&self, selector: &str, text: &str) -> Result<(), DriverError> {
        let object_id = self.require(selector).await?;
        let page = self.page()?;
        page.focus(&object_id)
            .await
            .map_err(|e| element_error(e, selector))?;
        page.insert_text(text).await.map_err(driver_error)
    }

    async fn clear_text(&self, selector: &str) -> Result<(), DriverError> {
        // Triple-click selects the whole value; Backspace deletes it.
        self.click(selector, 3).await?;
        self.page()?.press_key("Backspace").await.map_err(driver_error)
    }

    async fn select_option(&self, selector: &str, value: &str) -> Result<(), DriverError> {
        self.page()?
            .select_value(selector, value)
            .await
            .map_err(driver_error)
    }

    async fn current_url(&self) -> Result<String, DriverError> {
        self.page()?.current_url().await.map_err(driver_error)
    }

    async fn pause(&self, duration: Duration) -> Result<(), DriverError> {
        self.page()?;
        tokio::time::sleep(duration).await;
        Ok(())
    }

    async fn screenshot(&self) -> Result<Vec<u8>, DriverError> {
        let encoded = self
            .page()?
            .capture_png()
            .await
            .map_err(driver_error)?;
        base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| DriverError::ActionFailed(format!("Invalid screenshot data: {}", e)))
    }
}
