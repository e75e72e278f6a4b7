//! Product types.

use crate::catalog::StockStatus;
use crate::ids::{ProductId, SupplierId};
use crate::money::{Currency, Money};
use crate::search::{FieldValue, Record};
use serde::{Deserialize, Serialize};

/// How a product is packaged for sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Presentation {
    #[default]
    Unit,
    Box,
    Package,
}

impl Presentation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Presentation::Unit => "unit",
            Presentation::Box => "box",
            Presentation::Package => "package",
        }
    }
}

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Short shelf code (e.g. "COC001").
    pub code: String,
    /// Barcode, if labelled.
    #[serde(default)]
    pub barcode: Option<String>,
    /// Product name.
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Category name (e.g. "Bebidas").
    pub category: String,
    /// Selling price.
    pub price: Money,
    /// Purchase cost.
    pub cost: Money,
    /// Units on hand.
    pub stock: i64,
    /// Minimum units before a restock alert.
    #[serde(default)]
    pub min_stock: i64,
    /// Unit of measure (e.g. "pza", "kg").
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub presentation: Presentation,
    #[serde(default = "default_units_per_presentation")]
    pub units_per_presentation: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub supplier_id: Option<SupplierId>,
}

fn default_units_per_presentation() -> i64 {
    1
}

fn default_true() -> bool {
    true
}

impl Product {
    /// Create an active product sold per unit.
    pub fn new(
        id: impl Into<ProductId>,
        code: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            barcode: None,
            name: name.into(),
            description: String::new(),
            category: category.into(),
            price,
            cost: Money::zero(price.currency),
            stock: 0,
            min_stock: 0,
            unit: "pza".to_string(),
            presentation: Presentation::Unit,
            units_per_presentation: 1,
            is_active: true,
            supplier_id: None,
        }
    }

    /// Set stock and minimum stock.
    pub fn with_stock(mut self, stock: i64, min_stock: i64) -> Self {
        self.stock = stock;
        self.min_stock = min_stock;
        self
    }

    /// Set the purchase cost.
    pub fn with_cost(mut self, cost: Money) -> Self {
        self.cost = cost;
        self
    }

    /// Classify current stock against the minimum.
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::classify(self.stock, self.min_stock)
    }

    /// Value of the units on hand at cost.
    pub fn inventory_value(&self) -> Money {
        self.cost.multiply(self.stock.max(0))
    }

    /// Gross margin per unit.
    pub fn unit_margin(&self) -> Option<Money> {
        self.price.try_subtract(&self.cost)
    }

    pub fn currency(&self) -> Currency {
        self.price.currency
    }
}

impl Record for Product {
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "code"];
    const FILTER_FIELDS: &'static [&'static str] = &["category", "status"];

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::text(self.id.as_str())),
            "code" => Some(FieldValue::text(&self.code)),
            "barcode" => self.barcode.as_deref().map(FieldValue::text),
            "name" => Some(FieldValue::text(&self.name)),
            "description" => Some(FieldValue::text(&self.description)),
            "category" => Some(FieldValue::text(&self.category)),
            "price" => Some(self.price.into()),
            "cost" => Some(self.cost.into()),
            "stock" => Some(self.stock.into()),
            "min_stock" => Some(self.min_stock.into()),
            "unit" => Some(FieldValue::text(&self.unit)),
            "presentation" => Some(FieldValue::text(self.presentation.as_str())),
            "active" => Some(self.is_active.into()),
            "status" => Some(FieldValue::text(self.stock_status().as_str())),
            "supplier_id" => self.supplier_id.as_ref().map(|s| FieldValue::text(s.as_str())),
            _ => None,
        }
    }
}
