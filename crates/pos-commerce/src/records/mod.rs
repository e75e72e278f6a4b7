//! Back-office record types.
//!
//! Customers, suppliers, invoices and audit entries. All of them are plain
//! data supplied by the caller and implement [`Record`](crate::search::Record)
//! so list views can filter them.

mod audit;
mod customer;
mod invoice;
mod supplier;

pub use audit::{AuditEntry, AuditStats, Severity};
pub use customer::{Customer, CustomerStatus, CustomerType};
pub use invoice::{Invoice, InvoiceStatus};
pub use supplier::{Supplier, SupplierStatus};

use serde::{Deserialize, Serialize};

/// Tax registration details for invoicing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FiscalData {
    /// Taxpayer registry code.
    pub rfc: String,
    pub business_name: String,
    pub fiscal_address: String,
    pub zip_code: String,
    pub tax_regime: String,
    /// CFDI usage code (e.g. "G01").
    #[serde(default)]
    pub cfdi_use: Option<String>,
}
