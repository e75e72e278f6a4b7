//! Dashboard aggregates over record collections.

use crate::catalog::{Product, StockStatus};
use crate::checkout::{PaymentMethod, Sale, SaleStatus};
use crate::money::{Currency, Money};
use crate::records::{Customer, CustomerType, Invoice, InvoiceStatus, Supplier, SupplierStatus};
use serde::Serialize;
use std::collections::BTreeMap;

/// Value of all stock on hand at cost.
///
/// Products priced in a different currency than `currency` are skipped.
pub fn inventory_value(products: &[Product], currency: Currency) -> Money {
    products
        .iter()
        .map(Product::inventory_value)
        .filter(|value| value.currency == currency)
        .fold(Money::zero(currency), |acc, value| {
            Money::new(acc.amount_cents.saturating_add(value.amount_cents), currency)
        })
}

/// Number of products per stock status. Every status is present, possibly with 0.
pub fn count_by_stock_status(products: &[Product]) -> BTreeMap<StockStatus, usize> {
    let mut counts: BTreeMap<StockStatus, usize> =
        StockStatus::ALL.iter().map(|s| (*s, 0)).collect();
    for product in products {
        *counts.entry(product.stock_status()).or_default() += 1;
    }
    counts
}

/// Products that need restocking, most urgent first.
pub fn restock_alerts(products: &[Product]) -> Vec<&Product> {
    let mut alerts: Vec<&Product> = products
        .iter()
        .filter(|p| p.stock_status().needs_restock())
        .collect();
    alerts.sort_by_key(|p| p.stock_status());
    alerts
}

/// Customer headline counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CustomerCounts {
    pub total: usize,
    pub frequent: usize,
    pub new: usize,
    pub delinquent: usize,
    pub total_purchases: Money,
}

pub fn customer_counts(customers: &[Customer], currency: Currency) -> CustomerCounts {
    let mut counts = CustomerCounts {
        total: customers.len(),
        frequent: 0,
        new: 0,
        delinquent: 0,
        total_purchases: Money::zero(currency),
    };
    for c in customers {
        match c.customer_type {
            CustomerType::Frequent => counts.frequent += 1,
            CustomerType::New => counts.new += 1,
            CustomerType::Delinquent => counts.delinquent += 1,
        }
        if let Some(sum) = counts.total_purchases.try_add(&c.total_purchases) {
            counts.total_purchases = sum;
        }
    }
    counts
}

/// Supplier headline figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SupplierSummary {
    pub total: usize,
    pub active: usize,
    pub total_purchases: Money,
    /// Sum of outstanding balances.
    pub total_balance: Money,
    /// Mean payment term in days, rounded down; 0 with no suppliers.
    pub average_payment_days: i64,
}

pub fn supplier_summary(suppliers: &[Supplier], currency: Currency) -> SupplierSummary {
    let active = suppliers
        .iter()
        .filter(|s| s.status == SupplierStatus::Active)
        .count();
    let total_purchases = Money::try_sum(
        suppliers
            .iter()
            .map(|s| &s.total_purchases)
            .filter(|m| m.currency == currency),
        currency,
    )
    .unwrap_or_else(|| Money::zero(currency));
    let total_balance = Money::try_sum(
        suppliers
            .iter()
            .filter_map(|s| s.balance.as_ref())
            .filter(|m| m.currency == currency),
        currency,
    )
    .unwrap_or_else(|| Money::zero(currency));

    let average_payment_days = if suppliers.is_empty() {
        0
    } else {
        let days: i64 = suppliers.iter().map(Supplier::payment_term_days).sum();
        days / suppliers.len() as i64
    };

    SupplierSummary {
        total: suppliers.len(),
        active,
        total_purchases,
        total_balance,
        average_payment_days,
    }
}

/// Number of invoices per status. Every status is present, possibly with 0.
pub fn invoice_status_counts(invoices: &[Invoice]) -> BTreeMap<InvoiceStatus, usize> {
    let mut counts: BTreeMap<InvoiceStatus, usize> =
        InvoiceStatus::ALL.iter().map(|s| (*s, 0)).collect();
    for invoice in invoices {
        *counts.entry(invoice.status).or_default() += 1;
    }
    counts
}

/// Takings for one payment method.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PaymentShare {
    pub method: PaymentMethod,
    pub sales: usize,
    pub total: Money,
    /// Share of all takings in basis points, rounded half up.
    pub share_bp: u32,
}

impl PaymentShare {
    /// Share as a percentage with one decimal, e.g. "41.3%".
    pub fn percent(&self) -> String {
        let tenths = (self.share_bp + 5) / 10;
        format!("{}.{}%", tenths / 10, tenths % 10)
    }
}

/// Completed takings split by payment method, one entry per method.
///
/// Cancelled and returned sales, and sales in another currency, are left out.
pub fn payment_breakdown(sales: &[Sale], currency: Currency) -> Vec<PaymentShare> {
    let counted: Vec<&Sale> = sales
        .iter()
        .filter(|s| s.status == SaleStatus::Completed && s.total.currency == currency)
        .collect();
    let grand_total = counted
        .iter()
        .fold(0_i64, |acc, s| acc.saturating_add(s.total.amount_cents));

    PaymentMethod::ALL
        .iter()
        .map(|method| {
            let (count, cents) = counted
                .iter()
                .filter(|s| s.payment_method == *method)
                .fold((0, 0_i64), |(n, cents), s| {
                    (n + 1, cents.saturating_add(s.total.amount_cents))
                });
            let share_bp = if grand_total > 0 {
                ((cents as i128 * 10_000 + grand_total as i128 / 2) / grand_total as i128) as u32
            } else {
                0
            };
            PaymentShare {
                method: *method,
                sales: count,
                total: Money::new(cents, currency),
                share_bp,
            }
        })
        .collect()
}
