//! Shopper error types.

use grocerbot_protocols::{DriverError, SourceError};
use thiserror::Error;

/// Errors raised while shopping.
#[derive(Debug, Error)]
pub enum ShopperError {
    /// A page interaction failed. Aborts the current item and the rest of the trip.
    #[error(transparent)]
    Driver(#[from] DriverError),

    /// The grocery list could not be read or the results could not be written.
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Failed to save screenshot: {0}")]
    Screenshot(#[from] std::io::Error),
}

impl ShopperError {
    /// True when the storefront is missing a control the shopper relies on.
    pub fn is_missing_element(&self) -> bool {
        matches!(self, Self::Driver(e) if e.is_missing_element())
    }
}
