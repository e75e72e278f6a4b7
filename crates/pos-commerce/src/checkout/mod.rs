//! Checkout module.
//!
//! Turns a cart into a completed sale.

mod sale;

pub use sale::{complete_sale, PaymentMethod, Sale, SaleStatus};
