use serde::{Deserialize, Serialize};

use fieldsales_core::form::{non_blank, parse_count, required};
use fieldsales_core::{DomainError, DomainResult, Entity, Money, ProductId};

/// A product row from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    /// Short human code printed on the label (e.g. `ZAP001`).
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub unit_price: Money,
    pub stock: u32,
    pub category: Option<String>,
    pub image_url: Option<String>,
    /// Minimum stock before the dashboard raises an inventory alert.
    #[serde(default)]
    pub min_stock: u32,
    pub active: bool,
}

impl Product {
    pub fn new(
        id: ProductId,
        code: impl Into<String>,
        name: impl Into<String>,
        unit_price: Money,
        stock: u32,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            code: code.into(),
            name: name.into(),
            description: None,
            unit_price,
            stock,
            category: Some(category.into()),
            image_url: None,
            min_stock: 0,
            active: true,
        }
    }

    pub fn with_min_stock(mut self, min_stock: u32) -> Self {
        self.min_stock = min_stock;
        self
    }

    pub fn deactivated(mut self) -> Self {
        self.active = false;
        self
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// New-product form as typed in the admin console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub code: String,
    pub name: String,
    pub description: String,
    /// Whole pesos as text; blank means zero.
    pub price: String,
    /// Units as text; blank means zero.
    pub stock: String,
    pub category: String,
    pub image_url: String,
    pub active: bool,
}

impl Default for NewProduct {
    fn default() -> Self {
        Self {
            code: String::new(),
            name: String::new(),
            description: String::new(),
            price: String::new(),
            stock: "0".to_string(),
            category: String::new(),
            image_url: String::new(),
            active: true,
        }
    }
}

impl NewProduct {
    /// Validate the form into the row to insert. Blank optional fields become `None`.
    pub fn validate(&self, id: ProductId) -> DomainResult<Product> {
        let code = required(&self.code, "product code")?;
        let name = required(&self.name, "product name")?;
        let unit_price = Money::new(parse_count(&self.price, "price")?);
        let stock = u32::try_from(parse_count(&self.stock, "stock")?)
            .map_err(|_| DomainError::validation("stock is too large"))?;

        Ok(Product {
            id,
            code,
            name,
            description: non_blank(&self.description),
            unit_price,
            stock,
            category: non_blank(&self.category),
            image_url: non_blank(&self.image_url),
            min_stock: 0,
            active: self.active,
        })
    }
}
