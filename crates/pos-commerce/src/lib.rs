//! Point-of-sale domain types and logic.
//!
//! - **Cart**: line items keyed by product, with subtotal, 16% IVA and total
//! - **Search**: case-insensitive text search plus equality filters over record lists
//! - **Catalog**: products and stock-level classification
//! - **Checkout**: turning a cart into a completed sale
//! - **Records**: customers, suppliers, invoices, audit entries
//! - **Reports**: dashboard aggregates
//!
//! # Example
//!
//! ```
//! use pos_commerce::prelude::*;
//!
//! let coca = Product::new("1", "COC001", "Coca Cola 600ml", "Bebidas", Money::new(2500, Currency::MXN));
//!
//! let mut cart = Cart::new(Currency::MXN);
//! cart.add_item(&coca, 2);
//! cart.add_item(&coca, 2);
//!
//! let totals = cart.compute_totals();
//! assert_eq!(totals.subtotal.display(), "$100.00");
//! assert_eq!(totals.tax.display(), "$16.00");
//! assert_eq!(totals.total.display(), "$116.00");
//!
//! let products = vec![coca];
//! let criteria = FilterCriteria::for_record::<Product>().with_search("coca");
//! assert_eq!(filter(&products, &criteria).count(), 1);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod records;
pub mod reports;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Presentation, Product, StockStatus};

    // Cart
    pub use crate::cart::{Cart, CartLine, CartTotals, TaxRate, TAX_RATE};

    // Checkout
    pub use crate::checkout::{complete_sale, PaymentMethod, Sale, SaleStatus};

    // Records
    pub use crate::records::{
        AuditEntry, AuditStats, Customer, CustomerStatus, CustomerType, FiscalData, Invoice,
        InvoiceStatus, Severity, Supplier, SupplierStatus,
    };

    // Search
    pub use crate::search::{
        distinct_values, filter, filter_to_vec, Accept, FieldValue, FilterCriteria, Record,
    };
}
