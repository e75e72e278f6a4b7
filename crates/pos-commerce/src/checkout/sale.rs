//! Completing a sale from a cart.

use crate::cart::{Cart, CartLine};
use crate::error::CommerceError;
use crate::ids::{CustomerId, SaleId, UserId};
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

/// How the customer paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Transfer,
    Credit,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::Transfer,
        PaymentMethod::Credit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::Credit => "credit",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Efectivo",
            PaymentMethod::Card => "Tarjeta",
            PaymentMethod::Transfer => "Transferencia",
            PaymentMethod::Credit => "Crédito",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "transfer" => Ok(PaymentMethod::Transfer),
            "credit" => Ok(PaymentMethod::Credit),
            _ => Err(CommerceError::UnknownPaymentMethod(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    #[default]
    Completed,
    Cancelled,
    Returned,
}

/// A completed sale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sale {
    pub id: SaleId,
    pub items: Vec<CartLine>,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
    pub payment_method: PaymentMethod,
    pub status: SaleStatus,
    /// User who rang up the sale.
    pub cashier: UserId,
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
    pub created_at: DateTime<Utc>,
}

/// Turn the cart into a sale and empty it.
///
/// An empty cart is rejected with [`CommerceError::EmptyCart`] and left as is.
pub fn complete_sale(
    cart: &mut Cart,
    payment_method: PaymentMethod,
    cashier: &UserId,
) -> Result<Sale, CommerceError> {
    if cart.is_empty() {
        warn!(cashier = %cashier, "sale rejected: cart is empty");
        return Err(CommerceError::EmptyCart);
    }

    let totals = cart.compute_totals();
    let sale = Sale {
        id: SaleId::generate(),
        items: cart.lines().to_vec(),
        subtotal: totals.subtotal,
        tax: totals.tax,
        total: totals.total,
        payment_method,
        status: SaleStatus::Completed,
        cashier: cashier.clone(),
        customer_id: None,
        created_at: Utc::now(),
    };
    cart.clear();

    info!(
        sale = %sale.id,
        total = %sale.total,
        payment = %payment_method,
        lines = sale.items.len(),
        "sale completed"
    );
    Ok(sale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::money::Currency;

    #[test]
    fn test_empty_cart_rejected_without_mutation() {
        let mut cart = Cart::new(Currency::MXN);
        let err = complete_sale(&mut cart, PaymentMethod::Cash, &UserId::new("1")).unwrap_err();
        assert!(matches!(err, CommerceError::EmptyCart));
        assert!(err.is_advisory());
    }

    #[test]
    fn test_sale_captures_totals_and_clears_cart() {
        let mut cart = Cart::new(Currency::MXN);
        let coca = Product::new("1", "COC001", "Coca Cola 600ml", "Bebidas", Money::new(2500, Currency::MXN));
        cart.add_item(&coca, 4);

        let sale = complete_sale(&mut cart, PaymentMethod::Card, &UserId::new("1")).unwrap();
        assert_eq!(sale.subtotal.amount_cents, 10000);
        assert_eq!(sale.tax.amount_cents, 1600);
        assert_eq!(sale.total.amount_cents, 11600);
        assert_eq!(sale.items.len(), 1);
        assert_eq!(sale.payment_method, PaymentMethod::Card);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_payment_method_parse() {
        assert_eq!("Transfer".parse::<PaymentMethod>().unwrap(), PaymentMethod::Transfer);
        assert!("bitcoin".parse::<PaymentMethod>().is_err());
    }
}
