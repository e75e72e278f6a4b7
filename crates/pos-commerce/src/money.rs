//! Money type for representing monetary values.
//!
//! Amounts are integer minor units (centavos for MXN) so that cart totals
//! never drift the way binary floating point does.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    MXN,
    USD,
    EUR,
    CAD,
}

impl Currency {
    /// Get the currency code (e.g., "MXN").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::MXN => "MXN",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::CAD => "CAD",
        }
    }

    /// Get the currency symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::MXN | Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::CAD => "CA$",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "MXN" => Some(Currency::MXN),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "CAD" => Some(Currency::CAD),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use pos_commerce::money::{Currency, Money};
    /// let price = Money::from_decimal(18.50, Currency::MXN);
    /// assert_eq!(price.amount_cents, 1850);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_cents = (amount * multiplier as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Format as a display string (e.g., "$116.00").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format without symbol (e.g., "116.00"), exact to the cent.
    pub fn display_amount(&self) -> String {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        let places = self.currency.decimal_places() as usize;
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        let whole = abs / divisor as u64;
        let frac = abs % divisor as u64;
        format!("{}{}.{:0places$}", sign, whole, frac)
    }

    /// Try to add another Money value, returning None if currencies don't match.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money::new(
            self.amount_cents.saturating_add(other.amount_cents),
            self.currency,
        ))
    }

    /// Try to subtract another Money value.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money::new(
            self.amount_cents.saturating_sub(other.amount_cents),
            self.currency,
        ))
    }

    /// Multiply by a scalar, saturating at the i64 bounds.
    pub fn multiply(&self, factor: i64) -> Money {
        Money::new(self.amount_cents.saturating_mul(factor), self.currency)
    }

    /// Apply a rate in basis points (1600 = 16%), rounding half away from zero.
    pub fn apply_basis_points(&self, basis_points: u32) -> Money {
        let product = self.amount_cents as i128 * basis_points as i128;
        let half = if product < 0 { -5_000 } else { 5_000 };
        let rounded = (product + half) / 10_000;
        let clamped = rounded.clamp(i64::MIN as i128, i64::MAX as i128) as i64;
        Money::new(clamped, self.currency)
    }

    /// Sum Money values; `None` if any value is in a different currency.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, factor: i64) -> Money {
        self.multiply(factor)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(25.00, Currency::MXN);
        assert_eq!(m.amount_cents, 2500);

        let m = Money::from_decimal(0.1 + 0.2, Currency::MXN);
        assert_eq!(m.amount_cents, 30);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(11600, Currency::MXN).display(), "$116.00");
        assert_eq!(Money::new(5, Currency::MXN).display_amount(), "0.05");
        assert_eq!(Money::new(-1234, Currency::EUR).display_amount(), "-12.34");
    }

    #[test]
    fn test_money_try_add_mismatch() {
        let mxn = Money::new(1000, Currency::MXN);
        let usd = Money::new(1000, Currency::USD);
        assert!(mxn.try_add(&usd).is_none());
        assert_eq!(mxn.try_add(&mxn).map(|m| m.amount_cents), Some(2000));
    }

    #[test]
    fn test_money_multiply_saturates() {
        let m = Money::new(i64::MAX / 2, Currency::MXN);
        assert_eq!(m.multiply(3).amount_cents, i64::MAX);
        assert_eq!((Money::new(1850, Currency::MXN) * 2).amount_cents, 3700);
    }

    #[test]
    fn test_apply_basis_points_rounds_half_away() {
        // 16% of 100.00
        assert_eq!(Money::new(10000, Currency::MXN).apply_basis_points(1600).amount_cents, 1600);
        // 16% of 0.03 = 0.0048 -> 0.00
        assert_eq!(Money::new(3, Currency::MXN).apply_basis_points(1600).amount_cents, 0);
        // 16% of 0.25 = 0.04
        assert_eq!(Money::new(25, Currency::MXN).apply_basis_points(1600).amount_cents, 4);
        // 50% of 0.01 = 0.005 -> 0.01
        assert_eq!(Money::new(1, Currency::MXN).apply_basis_points(5000).amount_cents, 1);
        assert_eq!(Money::new(-1, Currency::MXN).apply_basis_points(5000).amount_cents, -1);
    }

    #[test]
    fn test_try_sum() {
        let values = [Money::new(100, Currency::MXN), Money::new(250, Currency::MXN)];
        assert_eq!(
            Money::try_sum(values.iter(), Currency::MXN).map(|m| m.amount_cents),
            Some(350)
        );
        assert!(Money::try_sum(values.iter(), Currency::USD).is_none());
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("mxn"), Some(Currency::MXN));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
