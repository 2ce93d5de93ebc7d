//! Infrastructure layer: configuration and in-memory adapters of the hosted
//! backend boundaries (catalog, customer directory, sale ledger).

pub mod config;
pub mod in_memory;

pub use config::{AppConfig, ConfigError};
pub use in_memory::{InMemoryCatalog, InMemoryCustomerDirectory, InMemorySaleLedger};
