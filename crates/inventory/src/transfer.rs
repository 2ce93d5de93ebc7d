use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fieldsales_core::{DomainError, DomainResult, ProductId, UserId, ValueObject, WarehouseId};

/// Raw transfer form: every field may still be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub product_id: Option<ProductId>,
    pub from_warehouse: Option<WarehouseId>,
    pub to_warehouse: Option<WarehouseId>,
    pub quantity: i64,
    pub notes: Option<String>,
}

/// A validated stock transfer, ready to submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockTransfer {
    pub product_id: ProductId,
    pub from_warehouse: WarehouseId,
    pub to_warehouse: WarehouseId,
    pub quantity: u64,
    pub notes: Option<String>,
    pub requested_by: UserId,
    pub requested_at: DateTime<Utc>,
}

impl ValueObject for StockTransfer {}

impl TransferRequest {
    pub fn validate(
        &self,
        requested_by: UserId,
        requested_at: DateTime<Utc>,
    ) -> DomainResult<StockTransfer> {
        let (Some(product_id), Some(from), Some(to)) =
            (self.product_id, self.from_warehouse, self.to_warehouse)
        else {
            return Err(DomainError::validation(
                "product, source and destination warehouses are required",
            ));
        };

        let quantity = u64::try_from(self.quantity)
            .ok()
            .filter(|q| *q > 0)
            .ok_or_else(|| DomainError::validation("quantity must be positive"))?;

        if from == to {
            return Err(DomainError::invariant(
                "source and destination warehouses must differ",
            ));
        }

        Ok(StockTransfer {
            product_id,
            from_warehouse: from,
            to_warehouse: to,
            quantity,
            notes: self
                .notes
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
            requested_by,
            requested_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_request() -> TransferRequest {
        TransferRequest {
            product_id: Some(ProductId::new()),
            from_warehouse: Some(WarehouseId::new()),
            to_warehouse: Some(WarehouseId::new()),
            quantity: 5,
            notes: Some(" restock ".to_string()),
        }
    }

    #[test]
    fn valid_request_produces_transfer() {
        let req = complete_request();
        let transfer = req.validate(UserId::new(), Utc::now()).unwrap();
        assert_eq!(transfer.quantity, 5);
        assert_eq!(transfer.notes.as_deref(), Some("restock"));
    }

    #[test]
    fn missing_fields_are_rejected() {
        let mut req = complete_request();
        req.to_warehouse = None;
        let err = req.validate(UserId::new(), Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn same_warehouse_is_rejected() {
        let mut req = complete_request();
        req.to_warehouse = req.from_warehouse;
        let err = req.validate(UserId::new(), Utc::now()).unwrap_err();
        match err {
            DomainError::InvariantViolation(msg) if msg.contains("must differ") => {}
            other => panic!("expected invariant violation, got {other:?}"),
        }
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: only strictly positive quantities validate.
            #[test]
            fn quantity_must_be_positive(quantity in any::<i64>()) {
                let mut req = complete_request();
                req.quantity = quantity;
                let result = req.validate(UserId::new(), Utc::now());
                prop_assert_eq!(result.is_ok(), quantity > 0);
            }
        }
    }
}
