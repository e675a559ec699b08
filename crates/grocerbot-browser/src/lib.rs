//! Browser session for grocerbot.
//!
//! Drives exactly one Chrome page through the Chrome DevTools Protocol (CDP)
//! and exposes it as a [`PageDriver`](grocerbot_protocols::PageDriver).
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐    WebSocket     ┌──────────────────┐
//! │  BrowserSession │ ◄──────────────► │   Chrome/Edge    │
//! │  (this crate)   │       CDP        │  (one page/tab)  │
//! └─────────────────┘                  └──────────────────┘
//! ```
//!
//! Chrome is launched with remote debugging on the configured port unless
//! one is already listening there, in which case the session attaches to it
//! and only opens (and later closes) its own tab.
//!
//! ## Elements
//!
//! Located elements are CDP Runtime remote objects. A handle stays valid only
//! while the page keeps the node attached; acting on a detached node fails
//! with `StaleElement` rather than clicking whatever now occupies its place.

mod adapter;
pub mod cdp;

pub use adapter::{BrowserSession, BrowserSessionConfig};
pub use cdp::{CdpClient, CdpError, PageSession};
