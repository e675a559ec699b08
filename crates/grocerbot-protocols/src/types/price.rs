//! Fixed-point currency amounts.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A currency amount in whole cents.
///
/// Amounts are rounded half away from zero to two decimals, the precision the
/// storefront displays. Serializes as a JSON number (`4.99`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price {
    cents: i64,
}

impl Price {
    pub const ZERO: Price = Price { cents: 0 };

    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Round a decimal amount to the nearest cent. `None` for NaN or infinity.
    pub fn from_amount(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        Some(Self {
            cents: (amount * 100.0).round() as i64,
        })
    }

    pub const fn cents(&self) -> i64 {
        self.cents
    }

    pub fn as_f64(&self) -> f64 {
        self.cents as f64 / 100.0
    }

    /// Split a multi-pack price into a per-unit price. `None` for a zero count.
    pub fn per_unit(&self, count: u32) -> Option<Self> {
        if count == 0 {
            return None;
        }
        Some(Self {
            cents: (self.cents as f64 / count as f64).round() as i64,
        })
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Price::from_amount(amount)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid price amount: {}", amount)))
    }
}

#[cfg(test)]
#[path = "price_tests.rs"]
mod tests;
