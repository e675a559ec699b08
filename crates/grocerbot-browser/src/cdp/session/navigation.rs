use std::time::Duration;

use serde_json::json;
use tracing::debug;

use crate::cdp::error::CdpError;

use super::core::PageSession;

const LOAD_TIMEOUT: Duration = Duration::from_secs(30);
const READY_STATE_POLL: Duration = Duration::from_millis(100);

impl PageSession {
    /// Load `url` and return once `document.readyState` is `complete`.
    pub async fn navigate(&self, url: &str) -> Result<(), CdpError> {
        let reply = self.call("Page.navigate", Some(json!({"url": url}))).await?;
        if let Some(reason) = reply.get("errorText").and_then(|v| v.as_str()) {
            return Err(CdpError::Navigation(format!("{}: {}", url, reason)));
        }

        tokio::time::timeout(LOAD_TIMEOUT, self.until_loaded())
            .await
            .map_err(|_| CdpError::Timeout(format!("loading {}", url)))??;
        debug!("Loaded {}", url);
        Ok(())
    }

    async fn until_loaded(&self) -> Result<(), CdpError> {
        while self.evaluate("document.readyState").await?.as_str() != Some("complete") {
            tokio::time::sleep(READY_STATE_POLL).await;
        }
        Ok(())
    }

    pub async fn current_url(&self) -> Result<String, CdpError> {
        let href = self.evaluate("window.location.href").await?;
        Ok(href.as_str().unwrap_or_default().to_string())
    }
}
