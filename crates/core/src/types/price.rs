//! Type-safe price representation using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// Amounts are stored in the currency's standard unit (rupees, not paise)
/// using decimal arithmetic so that order totals never accumulate float
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// A zero price in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency_code,
        }
    }

    /// Multiply the price by a line-item quantity.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self {
            amount: self.amount * Decimal::from(quantity),
            currency_code: self.currency_code,
        }
    }

    /// Add another price of the same currency.
    ///
    /// Returns `None` if the currencies differ.
    #[must_use]
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        if self.currency_code == other.currency_code {
            Some(Self {
                amount: self.amount + other.amount,
                currency_code: self.currency_code,
            })
        } else {
            None
        }
    }

    /// Format for display (e.g., "₹499.00").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency_code.symbol(), self.amount)
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
    USD,
    EUR,
}

impl CurrencyCode {
    /// Currency display symbol.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::INR => "₹",
            Self::USD => "$",
            Self::EUR => "€",
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::INR => "INR",
            Self::USD => "USD",
            Self::EUR => "EUR",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_times_quantity() {
        let unit = Price::new(Decimal::new(49_900, 2), CurrencyCode::INR);
        let line = unit.times(3);
        assert_eq!(line.amount, Decimal::new(149_700, 2));
        assert_eq!(line.currency_code, CurrencyCode::INR);
    }

    #[test]
    fn test_checked_add_same_currency() {
        let a = Price::new(Decimal::new(100, 0), CurrencyCode::INR);
        let b = Price::new(Decimal::new(250, 1), CurrencyCode::INR);
        let total = a.checked_add(&b).unwrap();
        assert_eq!(total.amount, Decimal::new(1250, 1));
    }

    #[test]
    fn test_checked_add_mixed_currency() {
        let a = Price::new(Decimal::ONE, CurrencyCode::INR);
        let b = Price::new(Decimal::ONE, CurrencyCode::USD);
        assert!(a.checked_add(&b).is_none());
    }

    #[test]
    fn test_display() {
        let price = Price::new(Decimal::new(49_900, 2), CurrencyCode::INR);
        assert_eq!(price.display(), "₹499.00");
    }

    #[test]
    fn test_zero() {
        let zero = Price::zero(CurrencyCode::INR);
        assert_eq!(zero.amount, Decimal::ZERO);
    }
}
