//! Cart pricing calculations.

use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A tax rate in basis points (1 bp = 0.01%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Mexican IVA, 16%.
    pub const IVA: TaxRate = TaxRate(1600);

    pub const fn from_basis_points(bp: u32) -> Self {
        TaxRate(bp)
    }

    pub fn basis_points(&self) -> u32 {
        self.0
    }

    /// Tax owed on `amount`, rounded to the cent.
    pub fn apply(&self, amount: &Money) -> Money {
        amount.apply_basis_points(self.0)
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "{}%", self.0 / 100)
        } else {
            write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
        }
    }
}

/// Derived cart totals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Tax on the subtotal.
    pub tax: Money,
    /// Subtotal plus tax.
    pub total: Money,
}

impl CartTotals {
    /// Totals for a subtotal at the given rate.
    pub fn from_subtotal(subtotal: Money, rate: TaxRate) -> Self {
        let tax = rate.apply(&subtotal);
        Self {
            subtotal,
            tax,
            total: Money::new(subtotal.amount_cents.saturating_add(tax.amount_cents), subtotal.currency),
        }
    }

    /// All-zero totals.
    pub fn zero(currency: Currency) -> Self {
        Self {
            subtotal: Money::zero(currency),
            tax: Money::zero(currency),
            total: Money::zero(currency),
        }
    }
}
