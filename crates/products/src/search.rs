//! Client-side filtering over an already-fetched product list.

use serde::{Deserialize, Serialize};

use fieldsales_core::ProductId;

use crate::product::Product;

/// Stock above this count is shown as plentiful.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 10;

/// Product list filter: free-text query plus optional category.
///
/// The query matches name or code case-insensitively. A `None` category means
/// "all categories".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    pub query: String,
    pub category: Option<String>,
    pub only_active: bool,
}

impl ProductFilter {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn active_only(mut self) -> Self {
        self.only_active = true;
        self
    }

    pub fn matches(&self, product: &Product) -> bool {
        if self.only_active && !product.active {
            return false;
        }

        if let Some(category) = &self.category {
            if product.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }

        let needle = self.query.trim().to_lowercase();
        needle.is_empty()
            || product.name.to_lowercase().contains(&needle)
            || product.code.to_lowercase().contains(&needle)
    }

    /// Filter a product list, preserving order.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

/// Stock badge shown next to each product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    Available,
    Low,
    OutOfStock,
}

impl StockLevel {
    pub fn of(stock: u32, low_threshold: u32) -> Self {
        match stock {
            0 => StockLevel::OutOfStock,
            s if s > low_threshold => StockLevel::Available,
            _ => StockLevel::Low,
        }
    }
}

/// Inventory alert for a product below its configured minimum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowStockAlert {
    pub product_id: ProductId,
    pub product_name: String,
    pub category: Option<String>,
    pub current_stock: u32,
    pub min_stock: u32,
}

/// Active products whose stock is below their minimum, lowest stock first.
pub fn low_stock_alerts(products: &[Product]) -> Vec<LowStockAlert> {
    let mut alerts: Vec<LowStockAlert> = products
        .iter()
        .filter(|p| p.active && p.stock < p.min_stock)
        .map(|p| LowStockAlert {
            product_id: p.id,
            product_name: p.name.clone(),
            category: p.category.clone(),
            current_stock: p.stock,
            min_stock: p.min_stock,
        })
        .collect();
    alerts.sort_by_key(|a| a.current_stock);
    alerts
}
