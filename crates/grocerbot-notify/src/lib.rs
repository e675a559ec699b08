//! Email notifier for trip summaries.

mod smtp;

pub use smtp::{EmailNotifier, SmtpSettings};
