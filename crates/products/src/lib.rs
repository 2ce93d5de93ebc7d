//! Products domain module.
//!
//! Product and category rows as the app sees them, the admin forms that create
//! them, the read-only catalog boundary the sale cart snapshots prices from, and
//! the client-side search/stock helpers used by the product list screens.

pub mod catalog;
pub mod category;
pub mod product;
pub mod search;

pub use catalog::{CatalogError, ProductCatalog};
pub use category::Category;
pub use product::{NewProduct, Product};
pub use search::{
    DEFAULT_LOW_STOCK_THRESHOLD, LowStockAlert, ProductFilter, StockLevel, low_stock_alerts,
};
