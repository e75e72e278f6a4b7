//! Customer records.

use crate::ids::CustomerId;
use crate::money::Money;
use crate::records::FiscalData;
use crate::search::{FieldValue, Record};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Purchasing behaviour classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CustomerType {
    Frequent,
    #[default]
    New,
    Delinquent,
}

impl CustomerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerType::Frequent => "frequent",
            CustomerType::New => "new",
            CustomerType::Delinquent => "delinquent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    #[default]
    Active,
    Inactive,
    Blocked,
}

impl CustomerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerStatus::Active => "active",
            CustomerStatus::Inactive => "inactive",
            CustomerStatus::Blocked => "blocked",
        }
    }
}

/// A customer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub id: CustomerId,
    /// Short code (e.g. "CLI001").
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub fiscal_data: Option<FiscalData>,
    #[serde(rename = "type", default)]
    pub customer_type: CustomerType,
    pub total_purchases: Money,
    #[serde(default)]
    pub last_purchase: Option<NaiveDate>,
    /// Discount percentage granted to this customer.
    #[serde(default)]
    pub discount_percent: Option<u32>,
    #[serde(default)]
    pub credit_limit: Option<Money>,
    #[serde(default)]
    pub current_credit: Option<Money>,
    #[serde(default)]
    pub status: CustomerStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Customer {
    /// Credit still available, if the customer has a limit.
    pub fn available_credit(&self) -> Option<Money> {
        let limit = self.credit_limit?;
        match self.current_credit {
            Some(used) => limit.try_subtract(&used),
            None => Some(limit),
        }
    }
}

impl Record for Customer {
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "code", "email"];
    const FILTER_FIELDS: &'static [&'static str] = &["type", "status"];

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::text(self.id.as_str())),
            "code" => Some(FieldValue::text(&self.code)),
            "name" => Some(FieldValue::text(&self.name)),
            "email" => self.email.as_deref().map(FieldValue::text),
            "phone" => self.phone.as_deref().map(FieldValue::text),
            "address" => self.address.as_deref().map(FieldValue::text),
            "rfc" => self.fiscal_data.as_ref().map(|f| FieldValue::text(&f.rfc)),
            "type" => Some(FieldValue::text(self.customer_type.as_str())),
            "status" => Some(FieldValue::text(self.status.as_str())),
            "total_purchases" => Some(self.total_purchases.into()),
            "last_purchase" => self.last_purchase.map(FieldValue::from),
            "credit_limit" => self.credit_limit.map(FieldValue::from),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn customer() -> Customer {
        serde_json::from_value(serde_json::json!({
            "id": "1",
            "code": "CLI001",
            "name": "María González",
            "email": "maria.gonzalez@email.com",
            "type": "frequent",
            "total_purchases": { "amount_cents": 1542050, "currency": "MXN" },
            "last_purchase": "2024-01-15",
            "credit_limit": { "amount_cents": 500000, "currency": "MXN" },
            "current_credit": { "amount_cents": 120000, "currency": "MXN" }
        }))
        .unwrap()
    }

    #[test]
    fn test_deserialize_type_field() {
        let c = customer();
        assert_eq!(c.customer_type, CustomerType::Frequent);
        assert_eq!(c.status, CustomerStatus::Active);
    }

    #[test]
    fn test_available_credit() {
        assert_eq!(
            customer().available_credit(),
            Some(Money::new(380000, Currency::MXN))
        );
    }

    #[test]
    fn test_date_field_renders_iso() {
        assert_eq!(
            customer().field("last_purchase").map(|v| v.to_string()),
            Some("2024-01-15".to_string())
        );
        assert!(customer().field("phone").is_none());
    }
}
