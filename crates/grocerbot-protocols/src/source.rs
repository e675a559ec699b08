//! Grocery list source protocol.

use async_trait::async_trait;

use crate::error::SourceError;
use crate::types::{ShoppingRequest, ShoppingResult};

/// Provides the shopping list and persists trip results.
#[async_trait]
pub trait GroceryListSource: Send + Sync {
    /// Authenticate against the backing store.
    async fn init(&mut self) -> Result<(), SourceError>;

    /// The ordered shopping list.
    async fn get_list(&self) -> Result<Vec<ShoppingRequest>, SourceError>;

    /// Persist a trip report and return a human-navigable link to it.
    async fn record_results(
        &self,
        title: &str,
        sheet_id: i64,
        results: &[ShoppingResult],
    ) -> Result<String, SourceError>;
}
