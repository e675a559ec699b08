//! # Grocerbot Protocols
//!
//! Core protocol definitions (traits) and shared data types for grocerbot.
//! Contains only interface definitions - no implementations.
//!
//! ## Core Traits
//!
//! - [`PageDriver`] - Primitive operations over a single automated browser page
//! - [`GroceryListSource`] - Where the shopping list comes from and results go
//! - [`Notifier`] - Fire-and-forget trip summary delivery

pub mod driver;
pub mod error;
pub mod notify;
pub mod source;
pub mod types;

pub use driver::{ElementHandle, PageDriver};
pub use error::{DriverError, NotifyError, SourceError};
pub use notify::{EmailMessage, Notifier};
pub use source::GroceryListSource;
pub use types::*;
