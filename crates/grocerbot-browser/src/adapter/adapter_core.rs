//! Session lifecycle: open one tab, close it again.

use grocerbot_protocols::DriverError;
use tokio::process::Child;
use tracing::{debug, info, warn};

use crate::cdp::{CdpClient, PageSession};

use super::BrowserSessionConfig;
use super::adapter_types::driver_error;
use super::chrome;

/// Everything that exists only between `init` and `close`.
pub(super) struct LiveSession {
    pub(super) client: CdpClient,
    pub(super) page: PageSession,
    /// Set when this session started Chrome and must stop it.
    pub(super) chrome: Option<Child>,
}

/// A single automated Chrome page.
pub struct BrowserSession {
    pub(super) config: BrowserSessionConfig,
    pub(super) live: Option<LiveSession>,
}

impl BrowserSession {
    /// Create a closed session. Nothing is launched until `init`.
    pub fn new(config: BrowserSessionConfig) -> Self {
        Self { config, live: None }
    }

    pub fn config(&self) -> &BrowserSessionConfig {
        &self.config
    }

    pub(super) async fn open(&mut self) -> Result<(), DriverError> {
        if self.live.is_some() {
            return Err(DriverError::SessionAlreadyOpen);
        }

        let endpoint = self.config.endpoint();
        let chrome = if chrome::is_listening(&endpoint).await {
            info!("Reusing Chrome already listening on {}", endpoint);
            None
        } else {
            Some(chrome::launch(&self.config).await?)
        };

        let client = CdpClient::connect(&endpoint).await.map_err(driver_error)?;
        let page = client.open_tab().await.map_err(driver_error)?;
        page.set_viewport(self.config.viewport_width, self.config.viewport_height)
            .await
            .map_err(driver_error)?;
        page.disable_cache().await.map_err(driver_error)?;

        info!(
            "Browser session open on {} (tab {})",
            client.browser(),
            page.target_id()
        );
        self.live = Some(LiveSession {
            client,
            page,
            chrome,
        });
        Ok(())
    }

    /// Close our tab, and Chrome itself if this session started it.
    pub(super) async fn shutdown(&mut self) -> Result<(), DriverError> {
        let LiveSession {
            client,
            page,
            chrome,
        } = self.live.take().ok_or(DriverError::SessionNotReady)?;

        if let Err(e) = client.close_tab(page.target_id()).await {
            warn!("Failed to close tab {}: {}", page.target_id(), e);
        }
        drop(page);
        drop(client);

        if let Some(mut child) = chrome {
            if let Err(e) = child.kill().await {
                debug!("Chrome had already exited: {}", e);
            }
        }
        info!("Browser session closed");
        Ok(())
    }

    /// The open page, or `SessionNotReady`.
    pub(super) fn page(&self) -> Result<&PageSession, DriverError> {
        match &self.live {
            Some(live) => Ok(&live.page),
            None => Err(DriverError::SessionNotReady),
        }
    }
}
