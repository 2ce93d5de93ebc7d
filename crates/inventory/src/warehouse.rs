use serde::{Deserialize, Serialize};

use fieldsales_core::form::non_blank;
use fieldsales_core::{DomainError, DomainResult, Entity, WarehouseId};

/// A warehouse (bodega) holding stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: WarehouseId,
    pub code: String,
    pub name: String,
    pub address: Option<String>,
    pub active: bool,
}

impl Warehouse {
    /// Build a warehouse from form input. Code is normalized to upper case.
    pub fn create(
        id: WarehouseId,
        code: &str,
        name: &str,
        address: Option<&str>,
    ) -> DomainResult<Self> {
        let code = code.trim().to_uppercase();
        let name = name.trim();
        if code.is_empty() || name.is_empty() {
            return Err(DomainError::validation("warehouse code and name are required"));
        }

        Ok(Self {
            id,
            code,
            name: name.to_string(),
            address: address.and_then(non_blank),
            active: true,
        })
    }
}

impl Entity for Warehouse {
    type Id = WarehouseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
