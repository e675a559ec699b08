//! Process-level command surface.

use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use chrono::Local;
use grocerbot_protocols::{CatalogItem, PageDriver};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cart::CartController;
use crate::error::ShopperError;
use crate::resolver::ItemResolver;
use crate::selectors::Selectors;
use crate::wait::WaitStrategy;

/// Storefront entry page.
pub const DEFAULT_ENTRY_URL: &str = "https://shop.lowesfoods.com/";

fn one() -> NonZeroU32 {
    NonZeroU32::MIN
}

/// A discrete shopper command.
///
/// ```json
/// {"command": "add_to_cart", "name": "milk", "quantity": 2}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    Login {
        email: String,
        password: String,
    },
    ClearCart,
    AddToCart {
        name: String,
        #[serde(default = "one")]
        quantity: NonZeroU32,
    },
    ShowCart,
    Screenshot,
}

/// What a command produced.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Done,
    Added(Option<CatalogItem>),
    CartUrl(String),
    Screenshot(PathBuf),
}

/// Owns the page driver for one process run.
pub struct Shopper<D: PageDriver> {
    driver: D,
    waits: Box<dyn WaitStrategy>,
    selectors: Selectors,
    entry_url: String,
    screenshot_dir: PathBuf,
}

impl<D: PageDriver> Shopper<D> {
    pub fn new(driver: D, waits: Box<dyn WaitStrategy>) -> Self {
        Self {
            driver,
            waits,
            selectors: Selectors::default(),
            entry_url: DEFAULT_ENTRY_URL.to_string(),
            screenshot_dir: PathBuf::from("screenshots"),
        }
    }

    pub fn with_selectors(mut self, selectors: Selectors) -> Self {
        self.selectors = selectors;
        self
    }

    pub fn with_entry_url(mut self, url: impl Into<String>) -> Self {
        self.entry_url = url.into();
        self
    }

    pub fn with_screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.screenshot_dir = dir.into();
        self
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn entry_url(&self) -> &str {
        &self.entry_url
    }

    /// Open the browser session.
    pub async fn init(&mut self) -> Result<(), ShopperError> {
        info!("Initializing shopper");
        self.driver.init().await?;
        Ok(())
    }

    /// Close the browser session if it is open.
    pub async fn shutdown(&mut self) -> Result<(), ShopperError> {
        if self.driver.is_open() {
            info!("Shutting down shopper");
            self.driver.close().await?;
        }
        Ok(())
    }

    pub fn resolver(&self) -> ItemResolver<'_> {
        ItemResolver::new(&self.driver, self.waits.as_ref(), &self.selectors)
    }

    pub fn cart(&self) -> CartController<'_> {
        CartController::new(&self.driver, self.waits.as_ref(), &self.selectors)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(), ShopperError> {
        self.cart().login(&self.entry_url, email, password).await
    }

    /// Capture the page and write it under the screenshot directory.
    pub async fn save_screenshot(&self) -> Result<PathBuf, ShopperError> {
        let png = self.driver.screenshot().await?;
        let path = screenshot_path(&self.screenshot_dir);
        tokio::fs::create_dir_all(&self.screenshot_dir).await?;
        tokio::fs::write(&path, png).await?;
        info!("Saved screenshot to {}", path.display());
        Ok(path)
    }

    /// Execute one command against the open session.
    pub async fn process_command(&self, command: Command) -> Result<CommandOutcome, ShopperError> {
        match command {
            Command::Login { email, password } => {
                self.login(&email, &password).await?;
                Ok(CommandOutcome::Done)
            }
            Command::ClearCart => {
                self.cart().empty_cart().await?;
                Ok(CommandOutcome::Done)
            }
            Command::AddToCart { name, quantity } => {
                let item = self.cart().add_item(&name, quantity).await?;
                Ok(CommandOutcome::Added(item))
            }
            Command::ShowCart => Ok(CommandOutcome::CartUrl(self.cart().show_cart().await?)),
            Command::Screenshot => Ok(CommandOutcome::Screenshot(self.save_screenshot().await?)),
        }
    }
}

fn screenshot_path(dir: &Path) -> PathBuf {
    dir.join(format!(
        "screenshot-{}.png",
        Local::now().format("%Y%m%d-%H%M%S%.3f")
    ))
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
