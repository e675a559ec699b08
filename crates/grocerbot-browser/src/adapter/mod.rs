//! Browser session adapter.
//!
//! Owns one CDP page and implements [`PageDriver`](grocerbot_protocols::PageDriver)
//! on top of it. Chrome is launched with a persistent profile unless one is
//! already listening on the debug port.

mod adapter_core;
mod adapter_driver;
mod adapter_types;
mod chrome;

pub use adapter_core::BrowserSession;
pub use adapter_types::BrowserSessionConfig;

#[cfg(test)]
#[path = "adapter_tests.rs"]
mod tests;
