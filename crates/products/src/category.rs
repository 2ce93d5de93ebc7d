use serde::{Deserialize, Serialize};

use fieldsales_core::form::{non_blank, required};
use fieldsales_core::{CategoryId, DomainResult, Entity};

/// A product category row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
}

impl Category {
    /// Build a category from form input. Name is required; a blank description is `None`.
    pub fn create(id: CategoryId, name: &str, description: &str) -> DomainResult<Self> {
        Ok(Self {
            id,
            name: required(name, "category name")?,
            description: non_blank(description),
        })
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
