//! In-memory adapters for the backend boundaries.
//!
//! Intended for tests/dev. Not optimized for performance.

use std::collections::HashMap;
use std::sync::RwLock;

use fieldsales_core::{CustomerId, Entity, ProductId, UserId};
use fieldsales_parties::{Customer, CustomerDirectory, DirectoryError};
use fieldsales_products::{CatalogError, Product, ProductCatalog};
use fieldsales_sales::{LedgerAck, LedgerError, SaleLedger, SaleRecord};

const POISONED: &str = "lock poisoned";

/// A writer panicked while holding a table lock.
#[derive(Debug)]
struct Poisoned;

impl From<Poisoned> for CatalogError {
    fn from(_: Poisoned) -> Self {
        CatalogError::Unavailable(POISONED.to_string())
    }
}

impl From<Poisoned> for DirectoryError {
    fn from(_: Poisoned) -> Self {
        DirectoryError::Unavailable(POISONED.to_string())
    }
}

fn ledger_poisoned<T>(_: T) -> LedgerError {
    LedgerError::Unavailable(POISONED.to_string())
}

/// Rows keyed by their entity id.
#[derive(Debug)]
struct Table<T: Entity> {
    rows: RwLock<HashMap<T::Id, T>>,
}

impl<T: Entity> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }
}

impl<T: Entity + Clone> Table<T> {
    fn upsert(&self, row: T) -> Result<(), Poisoned> {
        let mut rows = self.rows.write().map_err(|_| Poisoned)?;
        rows.insert(row.id().clone(), row);
        Ok(())
    }

    fn get(&self, id: &T::Id) -> Result<Option<T>, Poisoned> {
        let rows = self.rows.read().map_err(|_| Poisoned)?;
        Ok(rows.get(id).cloned())
    }

    /// Rows matching `keep`, sorted by `key`.
    fn scan<K, F>(&self, keep: impl Fn(&T) -> bool, key: F) -> Result<Vec<T>, Poisoned>
    where
        K: Ord,
        F: Fn(&T) -> K,
    {
        let rows = self.rows.read().map_err(|_| Poisoned)?;
        let mut hits: Vec<T> = rows.values().filter(|r| keep(r)).cloned().collect();
        hits.sort_by_key(|r| key(r));
        Ok(hits)
    }
}

/// Product catalog backed by a map.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: Table<Product>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(
        products: impl IntoIterator<Item = Product>,
    ) -> Result<Self, CatalogError> {
        let catalog = Self::new();
        for p in products {
            catalog.upsert(p)?;
        }
        Ok(catalog)
    }

    /// Insert or replace a product. Carts keep the snapshot they already took.
    pub fn upsert(&self, product: Product) -> Result<(), CatalogError> {
        Ok(self.products.upsert(product)?)
    }
}

#[async_trait::async_trait]
impl ProductCatalog for InMemoryCatalog {
    async fn get_by_id(&self, product_id: ProductId) -> Result<Product, CatalogError> {
        self.products
            .get(&product_id)?
            .ok_or(CatalogError::NotFound(product_id))
    }

    async fn list(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.scan(|_| true, |p| p.name.clone())?)
    }
}

/// Customer directory backed by a map.
#[derive(Debug, Default)]
pub struct InMemoryCustomerDirectory {
    customers: Table<Customer>,
}

impl InMemoryCustomerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&self, customer: Customer) -> Result<(), DirectoryError> {
        Ok(self.customers.upsert(customer)?)
    }
}

#[async_trait::async_trait]
impl CustomerDirectory for InMemoryCustomerDirectory {
    async fn get_by_id(&self, customer_id: CustomerId) -> Result<Customer, DirectoryError> {
        self.customers
            .get(&customer_id)?
            .ok_or(DirectoryError::NotFound(customer_id))
    }

    async fn search(&self, query: &str) -> Result<Vec<Customer>, DirectoryError> {
        Ok(self.customers.scan(|c| c.matches(query), |c| c.name.clone())?)
    }
}

/// Append-only sale ledger.
///
/// Recording the same sale twice is acknowledged without storing a second copy;
/// a different sale reusing a stored id is rejected. Can be switched into a
/// failing mode to exercise the commit-failure path.
#[derive(Debug, Default)]
pub struct InMemorySaleLedger {
    sales: RwLock<Vec<SaleRecord>>,
    outage: RwLock<Option<String>>,
}

impl InMemorySaleLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `record` fail with `Unavailable(reason)`.
    pub fn fail_with(&self, reason: impl Into<String>) -> Result<(), LedgerError> {
        *self.outage.write().map_err(ledger_poisoned)? = Some(reason.into());
        Ok(())
    }

    pub fn recover(&self) -> Result<(), LedgerError> {
        *self.outage.write().map_err(ledger_poisoned)? = None;
        Ok(())
    }

    /// Number of stored sales.
    pub fn stored(&self) -> Result<usize, LedgerError> {
        Ok(self.sales.read().map_err(ledger_poisoned)?.len())
    }
}

#[async_trait::async_trait]
impl SaleLedger for InMemorySaleLedger {
    async fn record(&self, sale: &SaleRecord) -> Result<LedgerAck, LedgerError> {
        if let Some(reason) = self.outage.read().map_err(ledger_poisoned)?.clone() {
            return Err(LedgerError::Unavailable(reason));
        }

        let mut sales = self.sales.write().map_err(ledger_poisoned)?;
        let ack = LedgerAck {
            sale_id: sale.sale_id,
        };

        match sales.iter().find(|s| s.sale_id == sale.sale_id) {
            Some(stored) if stored == sale => {
                tracing::debug!(sale_id = %sale.sale_id, "sale already stored");
                Ok(ack)
            }
            Some(_) => Err(LedgerError::Rejected(format!(
                "sale id {} already used by a different sale",
                sale.sale_id
            ))),
            None => {
                sales.push(sale.clone());
                tracing::debug!(sale_id = %sale.sale_id, stored = sales.len(), "sale stored");
                Ok(ack)
            }
        }
    }

    async fn recent_sales(
        &self,
        seller_id: UserId,
        limit: usize,
    ) -> Result<Vec<SaleRecord>, LedgerError> {
        let sales = self.sales.read().map_err(ledger_poisoned)?;
        let mut mine: Vec<SaleRecord> = sales
            .iter()
            .filter(|s| s.seller_id == seller_id)
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        mine.truncate(limit);
        Ok(mine)
    }
}
