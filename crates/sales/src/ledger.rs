//! Persistence boundary for committed sales.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use fieldsales_core::{SaleId, UserId};

use crate::sale::SaleRecord;

/// Acknowledgement that a sale was durably recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerAck {
    pub sale_id: SaleId,
}

/// Failure reported by the ledger collaborator.
///
/// This is not a cart error: the caller decides whether to retry or abandon.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The backend refused the record (constraint, permission, ...).
    #[error("sale rejected by ledger: {0}")]
    Rejected(String),

    /// The backend could not be reached.
    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

/// Durable storage of committed sales (hosted `ventas` table).
#[async_trait::async_trait]
pub trait SaleLedger: Send + Sync {
    /// Record one committed sale.
    ///
    /// A cart retrying an unacknowledged commit resends the identical record, so
    /// implementations should acknowledge a record they already hold instead of
    /// storing it twice.
    async fn record(&self, sale: &SaleRecord) -> Result<LedgerAck, LedgerError>;

    /// Most recent sales of a seller, newest first.
    async fn recent_sales(
        &self,
        seller_id: UserId,
        limit: usize,
    ) -> Result<Vec<SaleRecord>, LedgerError>;
}
