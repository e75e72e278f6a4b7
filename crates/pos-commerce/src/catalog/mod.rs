//! Product catalog module.
//!
//! Contains the product type and stock level classification.

mod inventory;
mod product;

pub use inventory::StockStatus;
pub use product::{Presentation, Product};
