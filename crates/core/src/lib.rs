//! `fieldsales-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the seller app and the
//! admin console (no IO, no remote calls).

pub mod entity;
pub mod error;
pub mod form;
pub mod id;
pub mod money;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CategoryId, CustomerId, ProductId, SaleId, SupplierId, UserId, WarehouseId};
pub use money::Money;
pub use value_object::ValueObject;
