//! Shopping list and result records.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use super::Price;

/// A product parsed from a storefront search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub title: String,
    /// Per-unit price; multi-pack offers are already divided out.
    pub price: Price,
    /// Price exactly as displayed on the page.
    pub price_text: String,
    pub on_sale: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub was_previously_purchased: bool,
}

/// One line of the shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingRequest {
    pub name: String,
    pub quantity: NonZeroU32,
}

impl ShoppingRequest {
    /// `None` when `quantity` is zero.
    pub fn new(name: impl Into<String>, quantity: u32) -> Option<Self> {
        Some(Self {
            name: name.into(),
            quantity: NonZeroU32::new(quantity)?,
        })
    }
}

/// Outcome of one shopping request. `result` is `None` when nothing was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingResult {
    pub requested: String,
    pub result: Option<CatalogItem>,
}

impl ShoppingResult {
    pub fn new(requested: impl Into<String>, result: Option<CatalogItem>) -> Self {
        Self {
            requested: requested.into(),
            result,
        }
    }

    pub fn is_found(&self) -> bool {
        self.result.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item() -> CatalogItem {
        CatalogItem {
            title: "Lowes Foods Whole Milk, 1 gal".to_string(),
            price: Price::from_cents(349),
            price_text: "$3.49".to_string(),
            on_sale: false,
            image_url: None,
            was_previously_purchased: true,
        }
    }

    #[test]
    fn test_request_rejects_zero_quantity() {
        assert!(ShoppingRequest::new("milk", 0).is_none());
        let request = ShoppingRequest::new("milk", 2).unwrap();
        assert_eq!(request.quantity.get(), 2);
    }

    #[test]
    fn test_request_deserialize_rejects_zero() {
        let result: Result<ShoppingRequest, _> =
            serde_json::from_str(r#"{"name": "milk", "quantity": 0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_result_found() {
        assert!(ShoppingResult::new("milk", Some(sample_item())).is_found());
        assert!(!ShoppingResult::new("unobtainium", None).is_found());
    }

    #[test]
    fn test_catalog_item_serialize_skips_missing_image() {
        let json = serde_json::to_value(sample_item()).unwrap();
        assert!(json.get("image_url").is_none());
        assert_eq!(json["price"], serde_json::json!(3.49));
        assert_eq!(json["price_text"], "$3.49");
    }
}
