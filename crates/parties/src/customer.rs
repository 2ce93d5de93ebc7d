use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use fieldsales_core::{CustomerId, DomainError, DomainResult, Entity, Money};

/// Identity document kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// Cédula de ciudadanía (national id).
    #[serde(rename = "CC")]
    NationalId,
    /// NIT (tax id, businesses).
    #[serde(rename = "NIT")]
    TaxId,
    /// Cédula de extranjería (foreigner id).
    #[serde(rename = "CE")]
    ForeignerId,
}

impl DocumentType {
    pub fn code(self) -> &'static str {
        match self {
            DocumentType::NationalId => "CC",
            DocumentType::TaxId => "NIT",
            DocumentType::ForeignerId => "CE",
        }
    }
}

impl core::str::FromStr for DocumentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CC" => Ok(DocumentType::NationalId),
            "NIT" => Ok(DocumentType::TaxId),
            "CE" => Ok(DocumentType::ForeignerId),
            other => Err(DomainError::validation(format!("unknown document type: {other}"))),
        }
    }
}

/// A customer row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: String,
    pub city: String,
    pub document_type: DocumentType,
    pub document_number: String,
    pub registered_at: DateTime<Utc>,
    pub last_purchase_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total_purchases: Money,
}

impl Customer {
    /// Build a customer from form input, validating the required fields.
    pub fn register(
        id: CustomerId,
        name: impl Into<String>,
        phone: impl Into<String>,
        document_type: DocumentType,
        document_number: impl Into<String>,
        registered_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name: String = name.into();
        let phone: String = phone.into();
        let document_number: String = document_number.into();
        let name = name.trim().to_string();
        let document_number = document_number.trim().to_string();

        if name.is_empty() {
            return Err(DomainError::validation("customer name is required"));
        }
        if document_number.is_empty() {
            return Err(DomainError::validation("document number is required"));
        }

        Ok(Self {
            id,
            name,
            phone: phone.trim().to_string(),
            email: None,
            address: String::new(),
            city: String::new(),
            document_type,
            document_number,
            registered_at,
            last_purchase_at: None,
            total_purchases: Money::ZERO,
        })
    }

    /// Case-insensitive match on name, phone or document number.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        needle.is_empty()
            || self.name.to_lowercase().contains(&needle)
            || self.phone.contains(&needle)
            || self.document_number.to_lowercase().contains(&needle)
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("customer not found: {0}")]
    NotFound(CustomerId),

    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

/// Customer lookup boundary (hosted `clientes` table).
#[async_trait::async_trait]
pub trait CustomerDirectory: Send + Sync {
    async fn get_by_id(&self, customer_id: CustomerId) -> Result<Customer, DirectoryError>;

    /// Customers matching `query` (see [`Customer::matches`]), ordered by name.
    async fn search(&self, query: &str) -> Result<Vec<Customer>, DirectoryError>;
}
