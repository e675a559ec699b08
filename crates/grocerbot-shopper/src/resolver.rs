//! Item resolution: search the storefront and pick one result.

use grocerbot_protocols::{CatalogItem, DriverError, ElementHandle, PageDriver};
use tracing::{debug, info};

use crate::error::ShopperError;
use crate::price::parse_price_text;
use crate::selectors::Selectors;
use crate::wait::{Pause, WaitStrategy};

/// A parsed search result together with its product cell on the page.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub element: ElementHandle,
    pub item: CatalogItem,
}

impl Candidate {
    pub fn into_item(self) -> CatalogItem {
        self.item
    }
}

/// Pick the candidate to buy.
///
/// A previously purchased first result wins outright; otherwise the earliest
/// later previously purchased result; otherwise the first result.
pub fn select_candidate(items: &[CatalogItem]) -> Option<usize> {
    let first = items.first()?;
    if first.was_previously_purchased {
        return Some(0);
    }
    let repeat = items
        .iter()
        .skip(1)
        .position(|item| item.was_previously_purchased)
        .map(|i| i + 1);
    Some(repeat.unwrap_or(0))
}

/// Searches the storefront through a borrowed page driver.
pub struct ItemResolver<'a> {
    driver: &'a dyn PageDriver,
    waits: &'a dyn WaitStrategy,
    selectors: &'a Selectors,
}

impl<'a> ItemResolver<'a> {
    pub fn new(
        driver: &'a dyn PageDriver,
        waits: &'a dyn WaitStrategy,
        selectors: &'a Selectors,
    ) -> Self {
        Self {
            driver,
            waits,
            selectors,
        }
    }

    /// Search and return every parseable result in page order.
    pub async fn search(&self, query: &str) -> Result<Vec<CatalogItem>, ShopperError> {
        let candidates = self.search_candidates(query).await?;
        Ok(candidates.into_iter().map(Candidate::into_item).collect())
    }

    /// Search and pick the one result to add to the cart.
    pub async fn search_and_select(&self, query: &str) -> Result<Option<Candidate>, ShopperError> {
        let mut candidates = self.search_candidates(query).await?;
        let items: Vec<CatalogItem> = candidates.iter().map(|c| c.item.clone()).collect();

        let Some(index) = select_candidate(&items) else {
            info!("No results for {}", query);
            return Ok(None);
        };
        let chosen = candidates.swap_remove(index);
        debug!(
            "Selected result {} of {} for {}: {} ({}{})",
            index + 1,
            items.len(),
            query,
            chosen.item.title,
            chosen.item.price,
            if chosen.item.was_previously_purchased { ", bought before" } else { "" }
        );
        Ok(Some(chosen))
    }

    /// Run the search and parse the result cells, dropping unparseable ones.
    pub async fn search_candidates(&self, query: &str) -> Result<Vec<Candidate>, ShopperError> {
        info!("Searching for {}", query);
        let s = self.selectors;

        self.driver.clear_text(&s.search_input).await?;
        self.driver.type_text(&s.search_input, query).await?;
        self.waits.wait(self.driver, Pause::Short, None).await?;
        self.driver.click(&s.search_button, 1).await?;
        // A previous search's container would satisfy any presence check.
        self.waits.wait(self.driver, Pause::Mid, None).await?;

        let Some(container) = self.driver.locate(&s.results_container).await? else {
            debug!("No results container for {}", query);
            return Ok(Vec::new());
        };

        let cells = self
            .driver
            .locate_all_within(&container, &s.product_cell)
            .await?;

        let mut candidates = Vec::with_capacity(cells.len());
        for cell in cells {
            if let Some(item) = self.parse_cell(&cell).await? {
                candidates.push(Candidate {
                    element: cell,
                    item,
                });
            }
        }
        debug!("Parsed {} results for {}", candidates.len(), query);
        Ok(candidates)
    }

    /// Turn a product cell into a [`CatalogItem`], or `None` when it lacks a
    /// title or a readable price.
    async fn parse_cell(&self, cell: &ElementHandle) -> Result<Option<CatalogItem>, DriverError> {
        let s = self.selectors;
        let d = self.driver;

        let Some(title) = d.locate_within(cell, &s.cell_title).await? else {
            debug!("Skipping result without a title");
            return Ok(None);
        };

        let (amount, on_sale) = match d.locate_within(cell, &s.sale_price).await? {
            Some(sale) => (d.locate_within(&sale, &s.price_amount).await?, true),
            None => (d.locate_within(cell, &s.price_amount).await?, false),
        };
        let Some(amount) = amount else {
            debug!("Skipping result without a price");
            return Ok(None);
        };

        let price_text = d.read_text(&amount).await?;
        let Some(price) = parse_price_text(price_text.trim()) else {
            debug!("Skipping result with unreadable price {:?}", price_text);
            return Ok(None);
        };

        let image_url = match d
            .read_attribute(cell, &s.cell_image, &s.cell_image_attribute)
            .await
        {
            Ok(url) => url,
            Err(DriverError::ElementNotFound(_)) => None,
            Err(e) => return Err(e),
        };

        Ok(Some(CatalogItem {
            title: d.read_text(&title).await?.trim().to_string(),
            price,
            price_text,
            on_sale,
            image_url,
            was_previously_purchased: d.element_exists_within(cell, &s.purchased_marker).await?,
        }))
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
