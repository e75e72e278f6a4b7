//! Stock level classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a product's stock compares to its minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    /// Nothing left.
    OutOfStock,
    /// At or below half the minimum.
    Critical,
    /// At or below the minimum.
    Low,
    /// Above the minimum.
    Normal,
}

impl StockStatus {
    /// Classify a stock level against its minimum.
    ///
    /// ```
    /// use pos_commerce::catalog::StockStatus;
    /// assert_eq!(StockStatus::classify(0, 20), StockStatus::OutOfStock);
    /// assert_eq!(StockStatus::classify(10, 20), StockStatus::Critical);
    /// assert_eq!(StockStatus::classify(15, 20), StockStatus::Low);
    /// assert_eq!(StockStatus::classify(50, 20), StockStatus::Normal);
    /// ```
    pub fn classify(stock: i64, min_stock: i64) -> Self {
        if stock == 0 {
            StockStatus::OutOfStock
        } else if stock.saturating_mul(2) <= min_stock {
            StockStatus::Critical
        } else if stock <= min_stock {
            StockStatus::Low
        } else {
            StockStatus::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "out_of_stock",
            StockStatus::Critical => "critical",
            StockStatus::Low => "low",
            StockStatus::Normal => "normal",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "Sin Stock",
            StockStatus::Critical => "Crítico",
            StockStatus::Low => "Bajo",
            StockStatus::Normal => "Normal",
        }
    }

    /// Whether the level warrants a restock alert.
    pub fn needs_restock(&self) -> bool {
        !matches!(self, StockStatus::Normal)
    }

    pub const ALL: [StockStatus; 4] = [
        StockStatus::OutOfStock,
        StockStatus::Critical,
        StockStatus::Low,
        StockStatus::Normal,
    ];
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
