use std::sync::Arc;

use serde_json::{Value, json};
use tracing::debug;

use crate::cdp::channel::Channel;
use crate::cdp::error::CdpError;

/// Domains every page session turns on before use.
const DOMAINS: [&str; 4] = ["Page", "DOM", "Runtime", "Network"];

/// Commands scoped to one tab.
pub struct PageSession {
    target_id: String,
    session_id: String,
    channel: Arc<Channel>,
}

impl PageSession {
    pub(crate) async fn attach(
        channel: Arc<Channel>,
        target_id: String,
        session_id: String,
    ) -> Result<Self, CdpError> {
        let session = Self {
            target_id,
            session_id,
            channel,
        };
        for domain in DOMAINS {
            session.call(&format!("{}.enable", domain), None).await?;
        }
        debug!("Attached session {} to {}", session.session_id, session.target_id);
        Ok(session)
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.channel
            .request(method, params, Some(&self.session_id))
            .await
    }

    /// Fixed desktop viewport, no device emulation.
    pub async fn set_viewport(&self, width: u32, height: u32) -> Result<(), CdpError> {
        self.call(
            "Emulation.setDeviceMetricsOverride",
            Some(json!({
                "width": width,
                "height": height,
                "deviceScaleFactor": 1,
                "mobile": false,
            })),
        )
        .await?;
        Ok(())
    }

    /// Stop serving search results from the HTTP cache.
    pub async fn disable_cache(&self) -> Result<(), CdpError> {
        self.call("Network.setCacheDisabled", Some(json!({"cacheDisabled": true})))
            .await?;
        Ok(())
    }

    /// PNG capture of the viewport, base64 as Chrome sends it.
    pub async fn capture_png(&self) -> Result<String, CdpError> {
        let shot = self
            .call("Page.captureScreenshot", Some(json!({"format": "png"})))
            .await?;
        match shot.get("data").and_then(Value::as_str) {
            Some(data) => Ok(data.to_string()),
            None => Err(CdpError::MalformedReply("captureScreenshot without data".into())),
        }
    }
}
