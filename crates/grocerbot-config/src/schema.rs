//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub shopper: ShopperConfig,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub email: EmailConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Browser launch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default = "default_debug_port")]
    pub debug_port: u16,

    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,

    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,

    #[serde(default = "default_true")]
    pub headless: bool,

    /// Chrome user-data directory. Defaults to `~/.grocerbot/browser-profile`.
    #[serde(default)]
    pub profile_dir: Option<String>,

    /// Explicit Chrome executable. Auto-detected when unset.
    #[serde(default)]
    pub chrome_path: Option<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            debug_port: default_debug_port(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            headless: true,
            profile_dir: None,
            chrome_path: None,
        }
    }
}

fn default_debug_port() -> u16 {
    9222
}

fn default_viewport_width() -> u32 {
    1280
}

fn default_viewport_height() -> u32 {
    1024
}

fn default_true() -> bool {
    true
}

/// How the shopper waits for asynchronous page updates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaitMode {
    /// Sleep for the full bucket duration.
    Fixed,
    /// Poll for a ready selector, bounded by the bucket duration.
    #[default]
    Poll,
}

/// Storefront account and shopping behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopperConfig {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,

    #[serde(default = "default_entry_url")]
    pub entry_url: String,

    #[serde(default)]
    pub wait: WaitMode,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_screenshot_dir")]
    pub screenshot_dir: String,
}

impl Default for ShopperConfig {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            entry_url: default_entry_url(),
            wait: WaitMode::default(),
            poll_interval_ms: default_poll_interval_ms(),
            screenshot_dir: default_screenshot_dir(),
        }
    }
}

fn default_entry_url() -> String {
    "https://shop.lowesfoods.com/".to_string()
}

fn default_poll_interval_ms() -> u64 {
    250
}

fn default_screenshot_dir() -> String {
    "screenshots".to_string()
}

/// Google Sheets list source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub spreadsheet_id: String,

    #[serde(default = "default_range")]
    pub range: String,

    #[serde(default)]
    pub client_id: String,

    #[serde(default)]
    pub client_secret: String,

    #[serde(default)]
    pub refresh_token: String,

    #[serde(default = "default_token_endpoint")]
    pub token_endpoint: String,

    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: String::new(),
            range: default_range(),
            client_id: String::new(),
            client_secret: String::new(),
            refresh_token: String::new(),
            token_endpoint: default_token_endpoint(),
            api_base: default_api_base(),
        }
    }
}

fn default_range() -> String {
    "A1:C50".to_string()
}

fn default_token_endpoint() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

fn default_api_base() -> String {
    "https://sheets.googleapis.com".to_string()
}

/// Trip summary email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Display form of the sender, e.g. `Grocerbot <bot@example.com>`.
    #[serde(default)]
    pub sender_display: String,

    #[serde(default)]
    pub recipient: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            sender_display: String::new(),
            recipient: String::new(),
        }
    }
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

/// Log output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_dir")]
    pub dir: String,

    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    #[serde(default = "default_max_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            file_prefix: default_file_prefix(),
            max_files: default_max_files(),
        }
    }
}

fn default_log_dir() -> String {
    "log".to_string()
}

fn default_file_prefix() -> String {
    "grocerbot".to_string()
}

fn default_max_files() -> usize {
    30
}
