//! Displayed price parsing.

use std::sync::OnceLock;

use grocerbot_protocols::Price;
use regex::Regex;

fn multi_pack() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(\d+)\s*for\b(.*)").ok())
        .as_ref()
}

fn amount() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(-)?\$?\s*(\d[\d,]*(?:\.\d+)?|\.\d+)").ok())
        .as_ref()
}

/// Parse a displayed price into a per-unit [`Price`].
///
/// `"$4.99"` is a single-unit price; `"3 for $10.00"` is split into a unit
/// price of `$3.33`, wherever the pack phrase sits in the text. Returns `None` when the text holds no amount or a pack
/// count of zero.
///
/// ```
/// use grocerbot_shopper::parse_price_text;
///
/// assert_eq!(parse_price_text("3 for $10.00").map(|p| p.cents()), Some(333));
/// assert_eq!(parse_price_text("$4.99").map(|p| p.cents()), Some(499));
/// ```
pub fn parse_price_text(text: &str) -> Option<Price> {
    if let Some(caps) = multi_pack()?.captures(text) {
        let count: u32 = caps.get(1)?.as_str().parse().ok()?;
        let total = parse_amount(caps.get(2)?.as_str())?;
        return total.per_unit(count);
    }
    parse_amount(text)
}

/// First currency amount in `text`, ignoring thousands separators.
fn parse_amount(text: &str) -> Option<Price> {
    let caps = amount()?.captures(text)?;
    let digits = caps.get(2)?.as_str().replace(',', "");
    let value: f64 = digits.parse().ok()?;
    let value = if caps.get(1).is_some() { -value } else { value };
    Price::from_amount(value)
}
