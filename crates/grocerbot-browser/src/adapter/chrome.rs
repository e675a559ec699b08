//! Finding, starting and waiting for a debuggable Chrome.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use grocerbot_protocols::DriverError;
use tokio::process::{Child, Command};
use tracing::{info, warn};

use crate::cdp::CdpClient;

use super::BrowserSessionConfig;

const STARTUP_POLL: Duration = Duration::from_millis(200);
const STARTUP_ATTEMPTS: u32 = 30;

#[cfg(target_os = "macos")]
const INSTALL_PATHS: &[&str] = &[
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "/Applications/Chromium.app/Contents/MacOS/Chromium",
];

#[cfg(target_os = "linux")]
const INSTALL_PATHS: &[&str] = &[
    "/usr/bin/google-chrome",
    "/usr/bin/google-chrome-stable",
    "/usr/bin/chromium",
    "/usr/bin/chromium-browser",
    "/snap/bin/chromium",
];

#[cfg(target_os = "windows")]
const INSTALL_PATHS: &[&str] = &[
    r"C:\Program Files\Google\Chrome\Application\chrome.exe",
    r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
];

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
const INSTALL_PATHS: &[&str] = &[];

/// The configured executable, else the first standard install that exists.
pub(super) fn executable(config: &BrowserSessionConfig) -> Option<PathBuf> {
    if let Some(path) = &config.chrome_path {
        return Some(path.clone());
    }
    INSTALL_PATHS.iter().map(PathBuf::from).find(|p| p.exists())
}

pub(super) fn launch_args(config: &BrowserSessionConfig, profile_dir: &Path) -> Vec<String> {
    let mut args = vec![
        format!("--remote-debugging-port={}", config.debug_port),
        format!("--user-data-dir={}", profile_dir.display()),
        format!(
            "--window-size={},{}",
            config.viewport_width, config.viewport_height
        ),
        "--no-first-run".to_string(),
        "--no-default-browser-check".to_string(),
        "--disable-background-networking".to_string(),
        "--disable-sync".to_string(),
        "--disable-translate".to_string(),
    ];
    if config.headless {
        args.push("--headless=new".to_string());
    }
    args
}

pub(super) async fn is_listening(endpoint: &str) -> bool {
    CdpClient::version(endpoint).await.is_ok()
}

/// Start Chrome and wait for its debugging endpoint to answer.
///
/// The child is killed if it is dropped, so a failed start leaves nothing
/// behind.
pub(super) async fn launch(config: &BrowserSessionConfig) -> Result<Child, DriverError> {
    let program = executable(config).ok_or_else(|| {
        DriverError::LaunchFailed("no Chrome executable found; set browser.chrome_path".into())
    })?;
    let profile_dir = config.get_profile_dir();
    if let Err(e) = std::fs::create_dir_all(&profile_dir) {
        warn!("Failed to create profile directory {}: {}", profile_dir.display(), e);
    }

    info!(
        "Launching {} (profile {})",
        program.display(),
        profile_dir.display()
    );
    let child = Command::new(&program)
        .args(launch_args(config, &profile_dir))
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| DriverError::LaunchFailed(format!("{}: {}", program.display(), e)))?;

    let endpoint = config.endpoint();
    for _ in 0..STARTUP_ATTEMPTS {
        tokio::time::sleep(STARTUP_POLL).await;
        if is_listening(&endpoint).await {
            info!("Chrome listening on {} (pid {:?})", endpoint, child.id());
            return Ok(child);
        }
    }
    Err(DriverError::LaunchFailed(format!(
        "Chrome did not open {} within {:?}",
        endpoint,
        STARTUP_POLL * STARTUP_ATTEMPTS
    )))
}
