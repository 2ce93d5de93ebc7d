//! Read-only product lookup boundary.

use thiserror::Error;

use fieldsales_core::ProductId;

use crate::product::Product;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("product not found: {0}")]
    NotFound(ProductId),

    /// The hosted backend could not be reached or answered with an error.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Lookup of product identity, price and stock by id.
///
/// The implementation lives on the other side of the boundary (hosted table
/// query); the cart only reads snapshots through it.
#[async_trait::async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn get_by_id(&self, product_id: ProductId) -> Result<Product, CatalogError>;

    /// All products, ordered by name.
    async fn list(&self) -> Result<Vec<Product>, CatalogError>;
}
