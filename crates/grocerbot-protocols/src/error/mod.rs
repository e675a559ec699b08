//! Error types for the grocerbot protocol layer.

mod driver;
mod notify;
mod source;

pub use driver::*;
pub use notify::*;
pub use source::*;
