//! Sales domain module.
//!
//! The in-progress sale cart, the immutable sale record it commits, the ledger
//! boundary that persists committed sales, and the seller dashboard metrics
//! derived from them.

pub mod cart;
pub mod ledger;
pub mod metrics;
pub mod sale;

pub use cart::{
    AddFromCatalogError, CartError, CartState, CommitError, IncompleteReason, LineItem, SaleCart,
};
pub use ledger::{LedgerAck, LedgerError, SaleLedger};
pub use metrics::{PeriodSummary, SalesGoals, SellerMetrics, goal_progress};
pub use sale::{PaymentMethod, SaleRecord, SaleStatus};
