use serde::{Deserialize, Serialize};

use fieldsales_core::form::{non_blank, required};
use fieldsales_core::{DomainError, DomainResult, Entity, SupplierId};

/// A supplier (proveedor) the business buys stock from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Supplier {
    /// Build a supplier from form input. Only the name is required.
    pub fn create(id: SupplierId, name: &str, phone: &str, email: &str) -> DomainResult<Self> {
        let name = required(name, "supplier name")?;
        let email = non_blank(email);
        if email.as_deref().is_some_and(|e| !e.contains('@')) {
            return Err(DomainError::validation("supplier email is not valid"));
        }

        Ok(Self {
            id,
            name,
            phone: non_blank(phone),
            email,
        })
    }
}

impl Entity for Supplier {
    type Id = SupplierId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
