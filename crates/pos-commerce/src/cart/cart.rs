//! Cart and line item types.

use crate::cart::{CartTotals, TaxRate};
use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Tax applied to every sale.
pub const TAX_RATE: TaxRate = TaxRate::IVA;

/// A checkout cart.
///
/// One line per distinct product, kept in the order products were first
/// added. None of the mutating operations fail: unknown products are
/// ignored and a quantity at or below zero removes the line.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
    currency: Currency,
}

impl Cart {
    /// Create an empty cart in the given currency.
    pub fn new(currency: Currency) -> Self {
        Self {
            lines: Vec::new(),
            currency,
        }
    }

    /// Add `quantity` units of `product`.
    ///
    /// An existing line is incremented; otherwise a line is appended. Stock
    /// is not checked. A product priced in another currency is ignored.
    pub fn add_item(&mut self, product: &Product, quantity: i64) {
        if product.price.currency != self.currency {
            warn!(
                product = %product.id,
                expected = %self.currency,
                got = %product.price.currency,
                "ignoring product priced in another currency"
            );
            return;
        }

        if let Some(pos) = self.position(&product.id) {
            let new_quantity = self.lines[pos].quantity.saturating_add(quantity);
            self.apply_quantity(pos, new_quantity);
            return;
        }

        if quantity <= 0 {
            return;
        }

        self.lines.push(CartLine::new(product, quantity));
        debug!(product = %product.id, quantity, "added cart line");
    }

    /// Replace a line's quantity; zero or below removes the line.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        if let Some(pos) = self.position(product_id) {
            self.apply_quantity(pos, quantity);
        }
    }

    /// Step a line's quantity by one, removing it when it reaches zero.
    pub fn decrement(&mut self, product_id: &ProductId) {
        if let Some(pos) = self.position(product_id) {
            let quantity = self.lines[pos].quantity.saturating_sub(1);
            self.apply_quantity(pos, quantity);
        }
    }

    /// Step a line's quantity up by one.
    pub fn increment(&mut self, product_id: &ProductId) {
        if let Some(pos) = self.position(product_id) {
            let quantity = self.lines[pos].quantity.saturating_add(1);
            self.apply_quantity(pos, quantity);
        }
    }

    /// Remove a product's line. Returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| &l.product_id != product_id);
        let removed = self.lines.len() < len_before;
        if removed {
            debug!(product = %product_id, "removed cart line");
        }
        removed
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Subtotal, tax and total for the current lines.
    pub fn compute_totals(&self) -> CartTotals {
        let subtotal = self
            .lines
            .iter()
            .fold(0_i64, |acc, l| acc.saturating_add(l.line_total.amount_cents));
        CartTotals::from_subtotal(Money::new(subtotal, self.currency), TAX_RATE)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn get_line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product_id == product_id)
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> i64 {
        self.lines
            .iter()
            .fold(0_i64, |acc, l| acc.saturating_add(l.quantity))
    }

    /// Number of distinct products.
    pub fn unique_item_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.lines.iter().position(|l| &l.product_id == product_id)
    }

    fn apply_quantity(&mut self, pos: usize, quantity: i64) {
        if quantity <= 0 {
            let line = self.lines.remove(pos);
            debug!(product = %line.product_id, "removed cart line");
            return;
        }
        let line = &mut self.lines[pos];
        line.quantity = quantity;
        line.update_total();
        debug!(product = %line.product_id, quantity, "updated cart line");
    }
}

/// One product in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub product_id: ProductId,
    /// Shelf code (denormalized for receipts).
    pub product_code: String,
    /// Product name (denormalized for receipts).
    pub product_name: String,
    pub unit_price: Money,
    pub quantity: i64,
    /// Always `unit_price * quantity`.
    pub line_total: Money,
}

impl CartLine {
    fn new(product: &Product, quantity: i64) -> Self {
        Self {
            product_id: product.id.clone(),
            product_code: product.code.clone(),
            product_name: product.name.clone(),
            unit_price: product.price,
            quantity,
            line_total: product.price.multiply(quantity),
        }
    }

    fn update_total(&mut self) {
        self.line_total = self.unit_price.multiply(self.quantity);
    }
}
