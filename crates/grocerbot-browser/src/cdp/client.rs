//! Browser-level CDP connection.

use std::sync::Arc;

use serde_json::{Value, json};
use tokio::task::JoinHandle;
use tracing::debug;

use super::channel::Channel;
use super::error::CdpError;
use super::protocol::{NewTarget, VersionInfo};
use super::session::PageSession;

/// Connection to one Chrome instance.
///
/// Page sessions created here share its socket; dropping the client stops
/// the reply reader, after which their commands fail with
/// [`CdpError::Closed`].
pub struct CdpClient {
    endpoint: String,
    browser: String,
    channel: Arc<Channel>,
    reader: JoinHandle<()>,
}

impl CdpClient {
    /// Connect to Chrome's debugging endpoint (e.g. `http://localhost:9222`).
    pub async fn connect(endpoint: &str) -> Result<Self, CdpError> {
        let endpoint = endpoint.trim_end_matches('/').to_string();
        let version = Self::version(&endpoint).await?;
        debug!("Attaching to {} at {}", version.browser, endpoint);

        let (channel, reader) = Channel::open(&version.socket_url).await?;
        Ok(Self {
            endpoint,
            browser: version.browser,
            channel,
            reader,
        })
    }

    /// Query `/json/version`; fails with `Unavailable` if nothing listens.
    pub async fn version(endpoint: &str) -> Result<VersionInfo, CdpError> {
        let url = format!("{}/json/version", endpoint);
        let unavailable = |e: reqwest::Error| CdpError::Unavailable(format!("{}: {}", endpoint, e));
        reqwest::get(&url)
            .await
            .map_err(unavailable)?
            .json()
            .await
            .map_err(unavailable)
    }

    /// Product string reported by Chrome, e.g. `Chrome/126.0.6478.126`.
    pub fn browser(&self) -> &str {
        &self.browser
    }

    /// Browser-level command (no target session).
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.channel.request(method, params, None).await
    }

    /// Open a blank tab and attach a flattened session to it.
    pub async fn open_tab(&self) -> Result<PageSession, CdpError> {
        // /json/new only accepts PUT on current Chrome
        let target: NewTarget = reqwest::Client::new()
            .put(format!("{}/json/new", self.endpoint))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!("Opened tab {} ({})", target.id, target.url);

        let attached = self
            .call(
                "Target.attachToTarget",
                Some(json!({"targetId": target.id, "flatten": true})),
            )
            .await?;
        let session_id = attached["sessionId"]
            .as_str()
            .ok_or_else(|| CdpError::MalformedReply("attachToTarget without sessionId".into()))?;

        PageSession::attach(Arc::clone(&self.channel), target.id, session_id.to_string()).await
    }

    pub async fn close_tab(&self, target_id: &str) -> Result<(), CdpError> {
        self.call("Target.closeTarget", Some(json!({"targetId": target_id})))
            .await?;
        Ok(())
    }
}

impl Drop for CdpClient {
    fn drop(&mut self) {
        self.reader.abort();
    }
}
