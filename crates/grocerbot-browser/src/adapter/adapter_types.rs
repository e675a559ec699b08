//! Browser session configuration and error mapping.

use std::path::PathBuf;

use grocerbot_protocols::DriverError;

use crate::cdp::CdpError;

/// Browser session configuration.
#[derive(Debug, Clone)]
pub struct BrowserSessionConfig {
    /// Chrome debugging port.
    pub debug_port: u16,
    /// Viewport width applied to the page.
    pub viewport_width: u32,
    /// Viewport height applied to the page.
    pub viewport_height: u32,
    /// Profile directory for persistent login state.
    pub profile_dir: Option<PathBuf>,
    /// Whether to run Chrome in headless mode.
    pub headless: bool,
    /// Explicit Chrome executable; searched for when unset.
    pub chrome_path: Option<PathBuf>,
}

impl Default for BrowserSessionConfig {
    fn default() -> Self {
        Self {
            debug_port: 9222,
            viewport_width: 1280,
            viewport_height: 1024,
            profile_dir: None,
            headless: true,
            chrome_path: None,
        }
    }
}

impl BrowserSessionConfig {
    /// Get the profile directory, falling back to `~/.grocerbot/browser-profile`.
    pub fn get_profile_dir(&self) -> PathBuf {
        self.profile_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".grocerbot")
                .join("browser-profile")
        })
    }

    /// Get the CDP endpoint URL.
    pub fn endpoint(&self) -> String {
        format!("http://localhost:{}", self.debug_port)
    }
}

pub(super) fn driver_error(e: CdpError) -> DriverError {
    match e {
        CdpError::Unavailable(msg) | CdpError::Handshake(msg) => DriverError::LaunchFailed(msg),
        CdpError::Navigation(msg) => DriverError::NavigationFailed(msg),
        CdpError::ElementNotFound(msg) => DriverError::ElementNotFound(msg),
        CdpError::StaleElement(msg) => DriverError::StaleElement(msg),
        CdpError::Closed => DriverError::SessionNotReady,
        other => DriverError::ActionFailed(other.to_string()),
    }
}

/// Map an error raised while acting on a located element.
///
/// Chrome reports a collected or detached remote object as a `-32000`
/// protocol error; surface that as a stale handle.
pub(super) fn element_error(e: CdpError, selector: &str) -> DriverError {
    if e.is_missing_object() {
        DriverError::StaleElement(selector.to_string())
    } else {
        driver_error(e)
    }
}

impl From<CdpError> for DriverError {
    fn from(e: CdpError) -> Self {
        driver_error(e)
    }
}
