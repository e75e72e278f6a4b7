//! Supplier records.

use crate::ids::SupplierId;
use crate::money::Money;
use crate::records::FiscalData;
use crate::search::{FieldValue, Record};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SupplierStatus {
    #[default]
    Active,
    Inactive,
}

impl SupplierStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SupplierStatus::Active => "active",
            SupplierStatus::Inactive => "inactive",
        }
    }
}

/// A supplier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Supplier {
    pub id: SupplierId,
    /// Short code (e.g. "PROV001").
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub fiscal_data: Option<FiscalData>,
    /// Free-form terms, usually "<days> días".
    pub payment_terms: String,
    pub total_purchases: Money,
    #[serde(default)]
    pub last_purchase: Option<NaiveDate>,
    #[serde(default)]
    pub status: SupplierStatus,
    /// Amount owed to the supplier.
    #[serde(default)]
    pub balance: Option<Money>,
}

impl Supplier {
    /// Leading day count of the payment terms; 0 when it doesn't start with a number.
    pub fn payment_term_days(&self) -> i64 {
        let first = self.payment_terms.split_whitespace().next().unwrap_or_default();
        let digits: String = first.chars().take_while(|c| c.is_ascii_digit()).collect();
        digits.parse().unwrap_or(0)
    }
}

impl Record for Supplier {
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "code", "contact_name"];
    const FILTER_FIELDS: &'static [&'static str] = &["status"];

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::text(self.id.as_str())),
            "code" => Some(FieldValue::text(&self.code)),
            "name" => Some(FieldValue::text(&self.name)),
            "contact_name" => self.contact_name.as_deref().map(FieldValue::text),
            "email" => self.email.as_deref().map(FieldValue::text),
            "phone" => self.phone.as_deref().map(FieldValue::text),
            "rfc" => self.fiscal_data.as_ref().map(|f| FieldValue::text(&f.rfc)),
            "payment_terms" => Some(FieldValue::text(&self.payment_terms)),
            "status" => Some(FieldValue::text(self.status.as_str())),
            "total_purchases" => Some(self.total_purchases.into()),
            "balance" => self.balance.map(FieldValue::from),
            "last_purchase" => self.last_purchase.map(FieldValue::from),
            _ => None,
        }
    }
}
