//! Cart manipulation and account login.

use std::num::NonZeroU32;

use grocerbot_protocols::{CatalogItem, DriverError, PageDriver};
use tracing::{debug, info};

use crate::error::ShopperError;
use crate::resolver::{Candidate, ItemResolver};
use crate::selectors::Selectors;
use crate::wait::{Pause, WaitStrategy};

/// Drives the storefront cart through a borrowed page driver.
pub struct CartController<'a> {
    driver: &'a dyn PageDriver,
    waits: &'a dyn WaitStrategy,
    selectors: &'a Selectors,
    resolver: ItemResolver<'a>,
}

impl<'a> CartController<'a> {
    pub fn new(
        driver: &'a dyn PageDriver,
        waits: &'a dyn WaitStrategy,
        selectors: &'a Selectors,
    ) -> Self {
        Self {
            driver,
            waits,
            selectors,
            resolver: ItemResolver::new(driver, waits, selectors),
        }
    }

    pub fn resolver(&self) -> &ItemResolver<'a> {
        &self.resolver
    }

    /// Search for `name` and add `quantity` of the selected result.
    ///
    /// Returns `None` without touching the cart when the search finds nothing.
    pub async fn add_item(
        &self,
        name: &str,
        quantity: NonZeroU32,
    ) -> Result<Option<CatalogItem>, ShopperError> {
        info!("Attempting to add {} of {} to cart", quantity, name);

        let Some(candidate) = self.resolver.search_and_select(name).await? else {
            return Ok(None);
        };
        Ok(Some(self.add_candidate(candidate, quantity).await?))
    }

    /// Add `quantity` of an already selected search result.
    ///
    /// Uses the candidate's add button when it has one, otherwise its weight
    /// dropdown.
    pub async fn add_candidate(
        &self,
        candidate: Candidate,
        quantity: NonZeroU32,
    ) -> Result<CatalogItem, ShopperError> {
        let has_add_button = self
            .driver
            .element_exists_within(&candidate.element, &self.selectors.add_button)
            .await?;

        if has_add_button {
            self.click_add(&candidate, quantity).await?;
        } else {
            self.select_weight(&candidate, quantity).await?;
        }

        Ok(candidate.into_item())
    }

    /// Click the add button `quantity` times.
    ///
    /// The page swaps the button out after every click, so it is located
    /// again before each one.
    async fn click_add(&self, candidate: &Candidate, quantity: NonZeroU32) -> Result<(), ShopperError> {
        let selector = &self.selectors.add_button;
        for n in 1..=quantity.get() {
            let button = self
                .driver
                .locate_within(&candidate.element, selector)
                .await?
                .ok_or_else(|| DriverError::ElementNotFound(selector.clone()))?;
            self.driver.click_element(&button, 1).await?;
            debug!("Clicked add for {} ({}/{})", candidate.item.title, n, quantity);
        }
        Ok(())
    }

    /// Set the weight dropdown to `quantity` in one selection.
    async fn select_weight(&self, candidate: &Candidate, quantity: NonZeroU32) -> Result<(), ShopperError> {
        let s = self.selectors;
        let id = self
            .driver
            .read_attribute(&candidate.element, &s.weight_select, "id")
            .await?
            .filter(|id| !id.is_empty())
            .ok_or_else(|| DriverError::ElementNotFound(format!("{}[id]", s.weight_select)))?;

        let value = s.weight_option_value(quantity.get());
        self.driver
            .select_option(&s.weight_select_by_id(&id), &value)
            .await?;
        debug!("Selected {} for {}", value, candidate.item.title);
        Ok(())
    }

    /// Open the cart view and return its URL.
    pub async fn show_cart(&self) -> Result<String, ShopperError> {
        info!("Opening the shopping cart");
        self.driver.click(&self.selectors.cart_nav, 1).await?;
        self.waits
            .wait(self.driver, Pause::Mid, Some(&self.selectors.cart_empty))
            .await?;
        Ok(self.driver.current_url().await?)
    }

    /// Remove everything from the cart.
    pub async fn empty_cart(&self) -> Result<(), ShopperError> {
        info!("Emptying cart");
        let s = self.selectors;
        self.show_cart().await?;
        self.driver.click(&s.cart_empty, 1).await?;
        self.waits
            .wait(self.driver, Pause::Nano, Some(&s.cart_empty_confirm))
            .await?;
        self.driver.click(&s.cart_empty_confirm, 1).await?;
        self.waits.wait(self.driver, Pause::Mini, None).await?;
        Ok(())
    }

    /// Sign in from the storefront entry page.
    pub async fn login(&self, entry_url: &str, email: &str, password: &str) -> Result<(), ShopperError> {
        info!("Logging into account {}", email);
        let s = self.selectors;

        self.driver.navigate(entry_url).await?;
        self.dismiss(&s.loyalty_dismiss).await?;
        self.waits.wait(self.driver, Pause::Short, None).await?;
        self.dismiss(&s.store_selector_close).await?;
        self.waits.wait(self.driver, Pause::Short, None).await?;

        self.driver.click(&s.sign_in, 1).await?;
        self.waits
            .wait(self.driver, Pause::Short, Some(&s.login_email))
            .await?;
        self.driver.type_text(&s.login_email, email).await?;
        self.waits.wait(self.driver, Pause::Short, None).await?;
        self.driver.type_text(&s.login_password, password).await?;
        self.waits.wait(self.driver, Pause::Short, None).await?;
        self.driver.click(&s.login_submit, 1).await?;
        self.waits.wait(self.driver, Pause::Xlong, None).await?;
        Ok(())
    }

    /// Click a modal's close control if the modal is showing.
    async fn dismiss(&self, selector: &str) -> Result<(), ShopperError> {
        if self.driver.element_exists(selector).await? {
            self.driver.click(selector, 1).await?;
        } else {
            debug!("{} not shown", selector);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "cart_tests.rs"]
mod tests;
