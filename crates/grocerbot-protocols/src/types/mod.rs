//! Shared data types.

mod price;
mod shopping;

pub use price::Price;
pub use shopping::{CatalogItem, ShoppingRequest, ShoppingResult};
