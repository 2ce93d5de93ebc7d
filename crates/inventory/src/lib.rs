//! Inventory domain module.
//!
//! Warehouses and stock transfers between them. Stock movements themselves are
//! executed by the hosted backend; this crate validates what the admin console
//! submits.

pub mod transfer;
pub mod warehouse;

pub use transfer::{StockTransfer, TransferRequest};
pub use warehouse::Warehouse;
