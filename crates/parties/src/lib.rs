//! Parties domain module (customers and suppliers).
//!
//! Customer rows, the directory boundary the app reads them through, the
//! client-side search used by the customer picker, and the supplier rows kept
//! by the admin console.

pub mod customer;
pub mod supplier;

pub use customer::{Customer, CustomerDirectory, DirectoryError, DocumentType};
pub use supplier::Supplier;
