//! # Grocerbot Shopper
//!
//! Turns an abstract shopping list into storefront interactions.
//!
//! ## Components
//!
//! - [`ItemResolver`] - searches the storefront and picks one candidate per query
//! - [`CartController`] - empties the cart, adds items, opens the cart view, logs in
//! - [`Shopper`] - owns the page driver and dispatches process-level [`Command`]s
//! - [`ShoppingTrip`] - end-to-end orchestration from list source to notification
//!
//! Everything talks to the page through [`PageDriver`](grocerbot_protocols::PageDriver)
//! and waits through a pluggable [`WaitStrategy`].

pub mod cart;
pub mod command;
pub mod error;
pub mod price;
pub mod resolver;
pub mod selectors;
pub mod trip;
pub mod wait;

#[cfg(test)]
pub(crate) mod fake_page;

pub use cart::CartController;
pub use command::{Command, CommandOutcome, Shopper};
pub use error::ShopperError;
pub use price::parse_price_text;
pub use resolver::{select_candidate, Candidate, ItemResolver};
pub use selectors::Selectors;
pub use trip::{trip_title, ShoppingTrip, TripReport, TripSettings, TripState};
pub use wait::{FixedWait, Pause, PollUntilPresent, WaitStrategy};
