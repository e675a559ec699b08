//! One attached tab.
//!
//! Elements are passed around as Runtime remote object ids (see `dom`).

mod core;
mod dom;
mod input;
mod js;
mod navigation;

pub use self::core::PageSession;
