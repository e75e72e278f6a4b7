//! Cart engine module.
//!
//! Contains the cart, its line items and the derived totals.

mod cart;
mod pricing;

pub use cart::{Cart, CartLine, TAX_RATE};
pub use pricing::{CartTotals, TaxRate};
