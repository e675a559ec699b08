//! Builds the trip collaborators from the loaded configuration.

use std::path::PathBuf;
use std::time::Duration;

use grocerbot_browser::{BrowserSession, BrowserSessionConfig};
use grocerbot_config::{
    BrowserConfig, Config, ConfigLoader, EmailConfig, ShopperConfig, SourceConfig,
    ValidationResult, WaitMode,
};
use grocerbot_notify::{EmailNotifier, SmtpSettings};
use grocerbot_protocols::Notifier;
use grocerbot_sheets::{SheetsConfig, SheetsGrocerySource};
use grocerbot_shopper::{FixedWait, PollUntilPresent, Shopper, TripSettings, WaitStrategy};

/// Map the `[browser]` table onto the session configuration.
pub(crate) fn browser_config(config: &BrowserConfig, headed: bool) -> BrowserSessionConfig {
    BrowserSessionConfig {
        debug_port: config.debug_port,
        viewport_width: config.viewport_width,
        viewport_height: config.viewport_height,
        profile_dir: config
            .profile_dir
            .as_deref()
            .map(|p| PathBuf::from(ConfigLoader::expand_path(p))),
        headless: config.headless && !headed,
        chrome_path: config
            .chrome_path
            .as_deref()
            .map(|p| PathBuf::from(ConfigLoader::expand_path(p))),
    }
}

pub(crate) fn wait_strategy(config: &ShopperConfig) -> Box<dyn WaitStrategy> {
    match config.wait {
        WaitMode::Fixed => Box::new(FixedWait),
        WaitMode::Poll => Box::new(PollUntilPresent::new(Duration::from_millis(
            config.poll_interval_ms,
        ))),
    }
}

/// The shopper over a fresh (not yet opened) browser session.
pub(crate) fn build_shopper(config: &Config, headed: bool) -> Shopper<BrowserSession> {
    let session = BrowserSession::new(browser_config(&config.browser, headed));
    Shopper::new(session, wait_strategy(&config.shopper))
        .with_entry_url(config.shopper.entry_url.clone())
        .with_screenshot_dir(ConfigLoader::expand_path(&config.shopper.screenshot_dir))
}

pub(crate) fn build_source(config: &SourceConfig) -> SheetsGrocerySource {
    let mut sheets = SheetsConfig::new(
        config.spreadsheet_id.clone(),
        config.client_id.clone(),
        config.client_secret.clone(),
        config.refresh_token.clone(),
    );
    sheets.range = config.range.clone();
    sheets.token_endpoint = config.token_endpoint.clone();
    sheets.api_base = config.api_base.clone();
    SheetsGrocerySource::new(sheets)
}

/// `None` when mail is switched off.
pub(crate) fn build_notifier(config: &EmailConfig) -> anyhow::Result<Option<Box<dyn Notifier>>> {
    if !config.enabled {
        return Ok(None);
    }
    let notifier = EmailNotifier::new(SmtpSettings {
        host: config.smtp_host.clone(),
        port: config.smtp_port,
        username: config.username.clone(),
        password: config.password.clone(),
    })?;
    Ok(Some(Box::new(notifier)))
}

pub(crate) fn trip_settings(config: &Config) -> TripSettings {
    TripSettings {
        email: config.shopper.email.clone(),
        password: config.shopper.password.clone(),
        sender_display: config.email.sender_display.clone(),
        recipient: config.email.recipient.clone(),
    }
}

/// Validation errors that block a run touching only the given config tables.
pub(crate) fn blocking_errors<'a>(
    result: &'a ValidationResult,
    tables: &'a [&str],
) -> impl Iterator<Item = &'a grocerbot_config::ValidationError> + 'a {
    result.errors.iter().filter(move |e| {
        tables
            .iter()
            .any(|t| e.path.split('.').next() == Some(*t))
    })
}
