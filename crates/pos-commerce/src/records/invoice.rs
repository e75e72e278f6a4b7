//! Invoice records.

use crate::cart::{CartTotals, TAX_RATE};
use crate::ids::InvoiceId;
use crate::money::Money;
use crate::search::{FieldValue, Record};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle of an electronic invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Not yet sent for stamping.
    #[default]
    Draft,
    /// Stamped by the tax authority.
    Stamped,
    Cancelled,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 3] = [
        InvoiceStatus::Draft,
        InvoiceStatus::Stamped,
        InvoiceStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Stamped => "stamped",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }
}

/// An invoice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    /// Invoice number (e.g. "FAC-001").
    pub id: InvoiceId,
    pub series: String,
    pub folio: String,
    /// Customer display name.
    pub customer: String,
    pub customer_rfc: String,
    /// Amount before tax.
    pub amount: Money,
    pub tax: Money,
    pub total: Money,
    #[serde(default)]
    pub status: InvoiceStatus,
    pub date: NaiveDate,
    /// Fiscal UUID assigned on stamping.
    #[serde(default)]
    pub uuid: Option<String>,
    pub payment_method: String,
}

impl Invoice {
    /// Draft invoice for `amount`, with tax and total derived at the sale rate.
    pub fn draft(
        series: impl Into<String>,
        folio: impl Into<String>,
        customer: impl Into<String>,
        customer_rfc: impl Into<String>,
        amount: Money,
        date: NaiveDate,
        payment_method: impl Into<String>,
    ) -> Self {
        let series = series.into();
        let folio = folio.into();
        let totals = CartTotals::from_subtotal(amount, TAX_RATE);
        Self {
            id: InvoiceId::new(format!("FAC-{}", folio)),
            series,
            folio,
            customer: customer.into(),
            customer_rfc: customer_rfc.into().to_uppercase(),
            amount: totals.subtotal,
            tax: totals.tax,
            total: totals.total,
            status: InvoiceStatus::Draft,
            date,
            uuid: None,
            payment_method: payment_method.into(),
        }
    }

    pub fn is_stamped(&self) -> bool {
        self.status == InvoiceStatus::Stamped
    }
}

impl Record for Invoice {
    const SEARCH_FIELDS: &'static [&'static str] = &["customer", "id", "customer_rfc"];
    const FILTER_FIELDS: &'static [&'static str] = &["status"];

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::text(self.id.as_str())),
            "series" => Some(FieldValue::text(&self.series)),
            "folio" => Some(FieldValue::text(&self.folio)),
            "customer" => Some(FieldValue::text(&self.customer)),
            "customer_rfc" => Some(FieldValue::text(&self.customer_rfc)),
            "amount" => Some(self.amount.into()),
            "tax" => Some(self.tax.into()),
            "total" => Some(self.total.into()),
            "status" => Some(FieldValue::text(self.status.as_str())),
            "date" => Some(self.date.into()),
            "uuid" => self.uuid.as_deref().map(FieldValue::text),
            "payment_method" => Some(FieldValue::text(&self.payment_method)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_draft_derives_tax() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let inv = Invoice::draft(
            "A",
            "001",
            "María García",
            "garm850101abc",
            Money::new(23450, Currency::MXN),
            date,
            "Efectivo",
        );

        assert_eq!(inv.id.as_str(), "FAC-001");
        assert_eq!(inv.customer_rfc, "GARM850101ABC");
        assert_eq!(inv.tax.amount_cents, 3752);
        assert_eq!(inv.total.amount_cents, 27202);
        assert!(!inv.is_stamped());
    }
}
