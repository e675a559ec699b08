//! Google Sheets grocery list source.
//!
//! The shopping list lives in the first sheet of a spreadsheet: a header row
//! followed by `name | quantity` rows. Each trip's results are written to a
//! new sheet inserted after it.

mod auth;
mod rows;
mod source;

pub use auth::AccessToken;
pub use rows::{parse_rows, results_batch};
pub use source::{SheetsConfig, SheetsGrocerySource};
