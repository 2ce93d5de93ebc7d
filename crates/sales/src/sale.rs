use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fieldsales_core::{CustomerId, DomainError, Money, SaleId, UserId, ValueObject};

use crate::cart::LineItem;

/// How the customer paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
    Credit,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::Credit => "credit",
        }
    }
}

impl core::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for PaymentMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "transfer" => Ok(PaymentMethod::Transfer),
            "credit" => Ok(PaymentMethod::Credit),
            other => Err(DomainError::validation(format!("unknown payment method: {other}"))),
        }
    }
}

/// Sale status as stored by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    Completed,
    Cancelled,
}

/// Immutable record of a committed sale, handed to the [`SaleLedger`](crate::SaleLedger).
///
/// All amounts are snapshots taken at commit time; nothing here is re-derived from
/// the catalog later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub sale_id: SaleId,
    pub seller_id: UserId,
    pub customer_id: CustomerId,
    pub lines: Vec<LineItem>,
    pub subtotal: Money,
    pub discount: Money,
    pub total: Money,
    pub payment_method: PaymentMethod,
    pub status: SaleStatus,
    pub notes: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl SaleRecord {
    /// Total units across all lines.
    pub fn units(&self) -> u64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

impl ValueObject for SaleRecord {}
