//! In-progress sale cart.
//!
//! One cart per selling session: pick a customer, add products, tweak quantities
//! and the overall discount, then commit to the ledger or cancel. Emptiness is
//! derived from the contents; there is no separate state flag to keep in sync.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use fieldsales_core::{Money, ProductId, SaleId, UserId, ValueObject};
use fieldsales_parties::Customer;
use fieldsales_products::{CatalogError, Product, ProductCatalog};

use crate::ledger::{LedgerError, SaleLedger};
use crate::sale::{PaymentMethod, SaleRecord, SaleStatus};

/// One product's participation in the cart.
///
/// `name` and `unit_price` are snapshots taken when the product was first added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u64,
    /// Always `quantity * unit_price`.
    pub subtotal: Money,
}

impl LineItem {
    fn new(product: &Product, quantity: u64) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.unit_price,
            quantity,
            subtotal: product.unit_price.saturating_mul(quantity),
        }
    }

    fn set_quantity(&mut self, quantity: u64) {
        self.quantity = quantity;
        self.subtotal = self.unit_price.saturating_mul(quantity);
    }
}

impl ValueObject for LineItem {}

/// Derived cart state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CartState {
    Empty,
    Building,
}

/// Why a commit was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncompleteReason {
    MissingCustomer,
    NoLineItems,
}

impl core::fmt::Display for IncompleteReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            IncompleteReason::MissingCustomer => f.write_str("no customer selected"),
            IncompleteReason::NoLineItems => f.write_str("no products in the sale"),
        }
    }
}

/// Rejected cart mutation. The cart is unchanged whenever one of these is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error("quantity must be positive (got {0})")]
    InvalidQuantity(i64),

    #[error("discount must not be negative (got {0})")]
    InvalidDiscount(i64),

    #[error("sale is incomplete: {0}")]
    IncompleteSale(IncompleteReason),
}

/// Failure of [`SaleCart::commit`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommitError {
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The ledger did not acknowledge the sale; the cart kept its contents.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Failure of [`SaleCart::add_from_catalog`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddFromCatalogError {
    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// The in-progress sale of one seller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleCart {
    seller_id: UserId,
    customer: Option<Customer>,
    line_items: Vec<LineItem>,
    overall_discount: Money,
    notes: String,
    /// Record handed to the ledger by the last unacknowledged commit.
    pending: Option<SaleRecord>,
}

impl SaleCart {
    /// Create an empty cart owned by `seller_id`.
    pub fn new(seller_id: UserId) -> Self {
        Self {
            seller_id,
            customer: None,
            line_items: Vec::new(),
            overall_discount: Money::ZERO,
            notes: String::new(),
            pending: None,
        }
    }

    pub fn seller_id(&self) -> UserId {
        self.seller_id
    }

    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    pub fn line_item(&self, product_id: ProductId) -> Option<&LineItem> {
        self.line_items.iter().find(|l| l.product_id == product_id)
    }

    pub fn overall_discount(&self) -> Money {
        self.overall_discount
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Sale sent to the ledger but not yet acknowledged, if any.
    pub fn pending_sale(&self) -> Option<&SaleRecord> {
        self.pending.as_ref()
    }

    pub fn state(&self) -> CartState {
        if self.customer.is_none()
            && self.line_items.is_empty()
            && self.overall_discount.is_zero()
            && self.notes.is_empty()
        {
            CartState::Empty
        } else {
            CartState::Building
        }
    }

    /// Reset every field to its default. Idempotent.
    pub fn start(&mut self) {
        *self = Self::new(self.seller_id);
    }

    pub fn select_customer(&mut self, customer: Customer) {
        tracing::debug!(customer_id = %customer.id, "customer selected");
        self.customer = Some(customer);
    }

    pub fn clear_customer(&mut self) {
        self.customer = None;
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// Add `quantity` units of `product`, merging into its existing line if any.
    pub fn add_line_item(&mut self, product: &Product, quantity: i64) -> Result<(), CartError> {
        let quantity = positive_quantity(quantity)?;

        match self
            .line_items
            .iter_mut()
            .find(|l| l.product_id == product.id)
        {
            Some(line) => line.set_quantity(line.quantity.saturating_add(quantity)),
            None => self.line_items.push(LineItem::new(product, quantity)),
        }

        tracing::debug!(
            product_id = %product.id,
            quantity,
            lines = self.line_items.len(),
            "line item added"
        );
        Ok(())
    }

    /// Look `product_id` up in the catalog and add it.
    ///
    /// The quantity is validated before the catalog is consulted.
    pub async fn add_from_catalog<C>(
        &mut self,
        catalog: &C,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<(), AddFromCatalogError>
    where
        C: ProductCatalog + ?Sized,
    {
        positive_quantity(quantity)?;
        let product = catalog.get_by_id(product_id).await?;
        self.add_line_item(&product, quantity)?;
        Ok(())
    }

    /// Remove the line for `product_id`. Unknown ids are ignored.
    pub fn remove_line_item(&mut self, product_id: ProductId) {
        self.line_items.retain(|l| l.product_id != product_id);
    }

    /// Replace the quantity of an existing line.
    ///
    /// Zero is rejected like any other non-positive value; use
    /// [`remove_line_item`](Self::remove_line_item) to drop a line. Unknown ids are
    /// ignored.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<(), CartError> {
        let quantity = positive_quantity(quantity)?;
        if let Some(line) = self
            .line_items
            .iter_mut()
            .find(|l| l.product_id == product_id)
        {
            line.set_quantity(quantity);
        }
        Ok(())
    }

    pub fn apply_discount(&mut self, amount: i64) -> Result<(), CartError> {
        let amount = u64::try_from(amount).map_err(|_| {
            tracing::warn!(amount, "negative discount rejected");
            CartError::InvalidDiscount(amount)
        })?;
        self.overall_discount = Money::new(amount);
        Ok(())
    }

    /// Sum of line subtotals, before the overall discount.
    pub fn subtotal(&self) -> Money {
        self.line_items.iter().map(|l| l.subtotal).sum()
    }

    /// `subtotal - overall_discount`, floored at zero.
    pub fn total(&self) -> Money {
        self.subtotal().saturating_sub(self.overall_discount)
    }

    /// Build the immutable record `commit` would hand to the ledger, without
    /// touching the cart.
    pub fn prepare_sale(
        &self,
        payment_method: PaymentMethod,
        occurred_at: DateTime<Utc>,
    ) -> Result<SaleRecord, CartError> {
        let customer = self
            .customer
            .as_ref()
            .ok_or(CartError::IncompleteSale(IncompleteReason::MissingCustomer))?;

        if self.line_items.is_empty() {
            return Err(CartError::IncompleteSale(IncompleteReason::NoLineItems));
        }

        let notes = self.notes.trim();
        Ok(SaleRecord {
            sale_id: SaleId::new(),
            seller_id: self.seller_id,
            customer_id: customer.id,
            lines: self.line_items.clone(),
            subtotal: self.subtotal(),
            discount: self.overall_discount,
            total: self.total(),
            payment_method,
            status: SaleStatus::Completed,
            notes: (!notes.is_empty()).then(|| notes.to_string()),
            occurred_at,
        })
    }

    /// Finalize the sale and hand it to `ledger`.
    ///
    /// The cart resets only after the ledger acknowledges the record. On a ledger
    /// failure, or if the returned future is dropped before the ledger answers,
    /// the cart keeps its contents so the sale can be retried.
    ///
    /// A retry of an unchanged cart with the same payment method resends the
    /// unacknowledged record as-is (same sale id and `occurred_at`), so a ledger
    /// that already stored it can recognize the duplicate. Any change to the cart
    /// produces a fresh record.
    pub async fn commit<L>(
        &mut self,
        payment_method: PaymentMethod,
        ledger: &L,
        occurred_at: DateTime<Utc>,
    ) -> Result<SaleRecord, CommitError>
    where
        L: SaleLedger + ?Sized,
    {
        let prepared = self.prepare_sale(payment_method, occurred_at).inspect_err(|e| {
            tracing::warn!(error = %e, "commit refused");
        })?;

        let sale = match self.pending.take() {
            Some(pending) if same_sale(&pending, &prepared) => {
                tracing::debug!(sale_id = %pending.sale_id, "retrying unacknowledged sale");
                pending
            }
            _ => prepared,
        };
        self.pending = Some(sale.clone());

        match ledger.record(&sale).await {
            Ok(ack) => {
                tracing::info!(
                    sale_id = %ack.sale_id,
                    total = sale.total.amount(),
                    lines = sale.lines.len(),
                    payment_method = %payment_method,
                    "sale committed"
                );
                self.start();
                Ok(sale)
            }
            Err(e) => {
                tracing::warn!(sale_id = %sale.sale_id, error = %e, "ledger did not record sale");
                Err(e.into())
            }
        }
    }

    /// Discard the sale in progress.
    pub fn cancel(&mut self) {
        tracing::debug!(lines = self.line_items.len(), "sale cancelled");
        self.start();
    }
}

/// Equal in everything but identity and timestamp.
fn same_sale(a: &SaleRecord, b: &SaleRecord) -> bool {
    let b_as_a = SaleRecord {
        sale_id: a.sale_id,
        occurred_at: a.occurred_at,
        ..b.clone()
    };
    *a == b_as_a
}

fn positive_quantity(quantity: i64) -> Result<u64, CartError> {
    match u64::try_from(quantity) {
        Ok(q) if q > 0 => Ok(q),
        _ => {
            tracing::warn!(quantity, "non-positive quantity rejected");
            Err(CartError::InvalidQuantity(quantity))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use fieldsales_core::CustomerId;
    use fieldsales_parties::DocumentType;

    use crate::ledger::LedgerAck;

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn test_cart() -> SaleCart {
        SaleCart::new(UserId::new())
    }

    fn test_product(price: u64) -> Product {
        let name = "Nike Air Max 270";
        Product::new(ProductId::new(), "ZAP001", name, Money::new(price), 15, "Zapatos")
    }

    fn test_customer() -> Customer {
        Customer::register(
            CustomerId::new(),
            "María Gómez",
            "3001234567",
            DocumentType::NationalId,
            "1020304050",
            test_time(),
        )
        .unwrap()
    }

    #[derive(Default)]
    struct RecordingLedger {
        recorded: Mutex<Vec<SaleRecord>>,
    }

    #[async_trait::async_trait]
    impl SaleLedger for RecordingLedger {
        async fn record(&self, sale: &SaleRecord) -> Result<LedgerAck, LedgerError> {
            self.recorded.lock().unwrap().push(sale.clone());
            Ok(LedgerAck { sale_id: sale.sale_id })
        }

        async fn recent_sales(
            &self,
            _seller_id: UserId,
            _limit: usize,
        ) -> Result<Vec<SaleRecord>, LedgerError> {
            Ok(self.recorded.lock().unwrap().clone())
        }
    }

    struct FailingLedger;

    #[async_trait::async_trait]
    impl SaleLedger for FailingLedger {
        async fn record(&self, _sale: &SaleRecord) -> Result<LedgerAck, LedgerError> {
            Err(LedgerError::Unavailable("connection reset".to_string()))
        }

        async fn recent_sales(
            &self,
            _seller_id: UserId,
            _limit: usize,
        ) -> Result<Vec<SaleRecord>, LedgerError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn new_cart_is_empty() {
        let cart = test_cart();
        assert_eq!(cart.state(), CartState::Empty);
        assert_eq!(cart.total(), Money::ZERO);
        assert!(cart.line_items().is_empty());
    }

    #[test]
    fn adding_same_product_merges_lines() {
        let mut cart = test_cart();
        let product = test_product(10_000);

        cart.add_line_item(&product, 2).unwrap();
        cart.add_line_item(&product, 3).unwrap();

        assert_eq!(cart.line_items().len(), 1);
        let line = cart.line_item(product.id).unwrap();
        assert_eq!(line.quantity, 5);
        assert_eq!(line.subtotal, Money::new(50_000));
        assert_eq!(cart.state(), CartState::Building);
    }

    #[test]
    fn price_is_snapshotted_at_first_add() {
        let mut cart = test_cart();
        let mut product = test_product(10_000);
        cart.add_line_item(&product, 1).unwrap();

        product.unit_price = Money::new(99_000);
        cart.add_line_item(&product, 1).unwrap();

        let line = cart.line_item(product.id).unwrap();
        assert_eq!(line.unit_price, Money::new(10_000));
        assert_eq!(line.subtotal, Money::new(20_000));
    }

    #[test]
    fn non_positive_quantity_is_rejected_on_add() {
        let mut cart = test_cart();
        let product = test_product(10_000);

        assert_eq!(cart.add_line_item(&product, 0), Err(CartError::InvalidQuantity(0)));
        assert_eq!(cart.add_line_item(&product, -4), Err(CartError::InvalidQuantity(-4)));
        assert_eq!(cart.state(), CartState::Empty);
    }

    #[test]
    fn remove_then_add_starts_a_fresh_line() {
        let mut cart = test_cart();
        let product = test_product(10_000);

        cart.add_line_item(&product, 4).unwrap();
        cart.remove_line_item(product.id);
        assert_eq!(cart.state(), CartState::Empty);

        cart.add_line_item(&product, 1).unwrap();
        assert_eq!(cart.line_item(product.id).unwrap().quantity, 1);
    }

    #[test]
    fn removing_unknown_product_is_a_noop() {
        let mut cart = test_cart();
        let product = test_product(10_000);
        cart.add_line_item(&product, 1).unwrap();
        let before = cart.clone();

        cart.remove_line_item(ProductId::new());
        assert_eq!(cart, before);
    }

    #[test]
    fn removing_last_line_keeps_building_when_customer_is_set() {
        let mut cart = test_cart();
        let product = test_product(10_000);
        cart.select_customer(test_customer());
        cart.add_line_item(&product, 1).unwrap();

        cart.remove_line_item(product.id);
        assert_eq!(cart.state(), CartState::Building);
    }

    #[test]
    fn update_quantity_recomputes_subtotal() {
        let mut cart = test_cart();
        let product = test_product(7_500);
        cart.add_line_item(&product, 1).unwrap();

        cart.update_quantity(product.id, 4).unwrap();
        let line = cart.line_item(product.id).unwrap();
        assert_eq!(line.quantity, 4);
        assert_eq!(line.subtotal, Money::new(30_000));
    }

    #[test]
    fn update_quantity_negative_leaves_line_untouched() {
        let mut cart = test_cart();
        let product = test_product(10_000);
        cart.add_line_item(&product, 2).unwrap();

        assert_eq!(
            cart.update_quantity(product.id, -1),
            Err(CartError::InvalidQuantity(-1))
        );
        assert_eq!(cart.line_item(product.id).unwrap().quantity, 2);
    }

    #[test]
    fn update_quantity_zero_is_rejected_not_removed() {
        let mut cart = test_cart();
        let product = test_product(10_000);
        cart.add_line_item(&product, 2).unwrap();

        assert_eq!(
            cart.update_quantity(product.id, 0),
            Err(CartError::InvalidQuantity(0))
        );
        assert_eq!(cart.line_items().len(), 1);
        assert_eq!(cart.line_item(product.id).unwrap().quantity, 2);
    }

    #[test]
    fn update_quantity_of_unknown_product_is_a_noop() {
        let mut cart = test_cart();
        cart.update_quantity(ProductId::new(), 3).unwrap();
        assert!(cart.line_items().is_empty());
    }

    #[test]
    fn negative_discount_is_rejected() {
        let mut cart = test_cart();
        cart.apply_discount(1_000).unwrap();

        assert_eq!(cart.apply_discount(-1), Err(CartError::InvalidDiscount(-1)));
        assert_eq!(cart.overall_discount(), Money::new(1_000));
    }

    #[test]
    fn total_is_floored_at_zero() {
        let mut cart = test_cart();
        cart.add_line_item(&test_product(1_000), 2).unwrap();
        cart.apply_discount(1_000_000).unwrap();

        assert_eq!(cart.subtotal(), Money::new(2_000));
        assert_eq!(cart.total(), Money::ZERO);
    }

    #[test]
    fn clear_customer_is_explicit() {
        let mut cart = test_cart();
        cart.select_customer(test_customer());
        assert!(cart.customer().is_some());

        cart.clear_customer();
        assert!(cart.customer().is_none());
        assert_eq!(cart.state(), CartState::Empty);
    }

    #[test]
    fn start_is_idempotent_and_keeps_seller() {
        let mut cart = test_cart();
        let seller = cart.seller_id();
        cart.select_customer(test_customer());
        cart.add_line_item(&test_product(500), 1).unwrap();
        cart.set_notes("deliver friday");

        cart.start();
        let once = cart.clone();
        cart.start();

        assert_eq!(cart, once);
        assert_eq!(cart.state(), CartState::Empty);
        assert_eq!(cart.seller_id(), seller);
    }

    #[test]
    fn prepare_sale_requires_customer() {
        let mut cart = test_cart();
        cart.add_line_item(&test_product(10_000), 3).unwrap();
        let before = cart.clone();

        assert_eq!(
            cart.prepare_sale(PaymentMethod::Cash, test_time()),
            Err(CartError::IncompleteSale(IncompleteReason::MissingCustomer))
        );
        assert_eq!(cart, before);
    }

    #[test]
    fn prepare_sale_requires_line_items() {
        let mut cart = test_cart();
        cart.select_customer(test_customer());

        assert_eq!(
            cart.prepare_sale(PaymentMethod::Cash, test_time()),
            Err(CartError::IncompleteSale(IncompleteReason::NoLineItems))
        );
    }

    #[test]
    fn prepare_sale_trims_blank_notes() {
        let mut cart = test_cart();
        cart.select_customer(test_customer());
        cart.add_line_item(&test_product(100), 1).unwrap();

        cart.set_notes("   ");
        assert_eq!(cart.prepare_sale(PaymentMethod::Card, test_time()).unwrap().notes, None);

        cart.set_notes(" gift wrap ");
        assert_eq!(
            cart.prepare_sale(PaymentMethod::Card, test_time()).unwrap().notes.as_deref(),
            Some("gift wrap")
        );
    }

    #[tokio::test]
    async fn commit_records_sale_and_resets_cart() {
        let ledger = RecordingLedger::default();
        let mut cart = test_cart();
        let customer = test_customer();
        let product = test_product(10_000);

        cart.select_customer(customer.clone());
        cart.add_line_item(&product, 3).unwrap();
        cart.apply_discount(5_000).unwrap();

        let sale = cart
            .commit(PaymentMethod::Transfer, &ledger, test_time())
            .await
            .unwrap();

        assert_eq!(sale.subtotal, Money::new(30_000));
        assert_eq!(sale.discount, Money::new(5_000));
        assert_eq!(sale.total, Money::new(25_000));
        assert_eq!(sale.customer_id, customer.id);
        assert_eq!(sale.payment_method, PaymentMethod::Transfer);
        assert_eq!(sale.status, SaleStatus::Completed);
        assert_eq!(sale.units(), 3);

        let recorded = ledger.recorded.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0], sale);
        drop(recorded);

        assert_eq!(cart.total(), Money::ZERO);
        assert!(cart.line_items().is_empty());
        assert_eq!(cart.state(), CartState::Empty);
    }

    #[tokio::test]
    async fn commit_without_customer_leaves_lines_untouched() {
        let ledger = RecordingLedger::default();
        let mut cart = test_cart();
        let product = test_product(10_000);
        cart.add_line_item(&product, 2).unwrap();

        let err = cart
            .commit(PaymentMethod::Cash, &ledger, test_time())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            CommitError::Cart(CartError::IncompleteSale(IncompleteReason::MissingCustomer))
        );
        assert_eq!(cart.line_item(product.id).unwrap().quantity, 2);
        assert!(ledger.recorded.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn ledger_failure_preserves_cart() {
        let mut cart = test_cart();
        cart.select_customer(test_customer());
        cart.add_line_item(&test_product(10_000), 1).unwrap();
        cart.apply_discount(500).unwrap();
        let before = cart.clone();

        let err = cart
            .commit(PaymentMethod::Credit, &FailingLedger, test_time())
            .await
            .unwrap_err();

        assert!(matches!(err, CommitError::Ledger(LedgerError::Unavailable(_))));
        assert_eq!(cart.customer(), before.customer());
        assert_eq!(cart.line_items(), before.line_items());
        assert_eq!(cart.overall_discount(), before.overall_discount());
        assert_eq!(cart.notes(), before.notes());
        assert_eq!(cart.state(), CartState::Building);
        assert!(cart.pending_sale().is_some());
    }

    #[tokio::test]
    async fn retry_after_ledger_failure_resends_same_sale() {
        let mut cart = test_cart();
        cart.select_customer(test_customer());
        cart.add_line_item(&test_product(10_000), 2).unwrap();

        let first_try = test_time();
        cart.commit(PaymentMethod::Cash, &FailingLedger, first_try)
            .await
            .unwrap_err();
        let pending = cart.pending_sale().cloned().unwrap();
        assert_eq!(pending.occurred_at, first_try);

        let ledger = RecordingLedger::default();
        let later = first_try + chrono::Duration::minutes(5);
        let sale = cart.commit(PaymentMethod::Cash, &ledger, later).await.unwrap();

        assert_eq!(sale, pending);
        assert_eq!(ledger.recorded.lock().unwrap().as_slice(), &[pending]);
        assert!(cart.pending_sale().is_none());
        assert_eq!(cart.state(), CartState::Empty);
    }

    #[tokio::test]
    async fn changed_cart_after_ledger_failure_gets_new_sale_id() {
        let mut cart = test_cart();
        let product = test_product(10_000);
        cart.select_customer(test_customer());
        cart.add_line_item(&product, 1).unwrap();

        cart.commit(PaymentMethod::Cash, &FailingLedger, test_time())
            .await
            .unwrap_err();
        let failed = cart.pending_sale().cloned().unwrap();

        cart.update_quantity(product.id, 3).unwrap();
        let ledger = RecordingLedger::default();
        let sale = cart.commit(PaymentMethod::Cash, &ledger, test_time()).await.unwrap();
        assert_ne!(sale.sale_id, failed.sale_id);
        assert_eq!(sale.units(), 3);

        let mut cart = test_cart();
        cart.select_customer(test_customer());
        cart.add_line_item(&product, 1).unwrap();
        cart.commit(PaymentMethod::Cash, &FailingLedger, test_time())
            .await
            .unwrap_err();
        let failed = cart.pending_sale().cloned().unwrap();
        let sale = cart.commit(PaymentMethod::Card, &ledger, test_time()).await.unwrap();
        assert_ne!(sale.sale_id, failed.sale_id);
    }

    #[tokio::test]
    async fn cancel_drops_unacknowledged_sale() {
        let mut cart = test_cart();
        cart.select_customer(test_customer());
        cart.add_line_item(&test_product(10_000), 1).unwrap();
        cart.commit(PaymentMethod::Cash, &FailingLedger, test_time())
            .await
            .unwrap_err();

        cart.cancel();
        assert!(cart.pending_sale().is_none());
        assert_eq!(cart.state(), CartState::Empty);
    }

    #[test]
    fn cancel_discards_everything() {
        let mut cart = test_cart();
        cart.select_customer(test_customer());
        cart.add_line_item(&test_product(10_000), 1).unwrap();
        cart.apply_discount(100).unwrap();

        cart.cancel();
        assert_eq!(cart.state(), CartState::Empty);
        assert_eq!(cart.total(), Money::ZERO);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: repeated adds of one product accumulate quantity and keep
            /// the subtotal consistent.
            #[test]
            fn repeated_adds_accumulate(
                price in 1u64..1_000_000,
                quantities in prop::collection::vec(1i64..1_000, 1..20)
            ) {
                let mut cart = test_cart();
                let product = test_product(price);
                for q in &quantities {
                    cart.add_line_item(&product, *q).unwrap();
                }

                let expected: u64 = quantities.iter().map(|q| *q as u64).sum();
                let line = cart.line_item(product.id).unwrap();
                prop_assert_eq!(cart.line_items().len(), 1);
                prop_assert_eq!(line.quantity, expected);
                prop_assert_eq!(line.subtotal, Money::new(expected * price));
            }

            /// Property: the total is never negative and never exceeds the subtotal.
            #[test]
            fn total_is_bounded(
                prices in prop::collection::vec(1u64..100_000, 1..8),
                discount in 0i64..10_000_000
            ) {
                let mut cart = test_cart();
                for price in prices {
                    cart.add_line_item(&test_product(price), 2).unwrap();
                }
                cart.apply_discount(discount).unwrap();

                let total = cart.total();
                prop_assert!(total <= cart.subtotal());
                prop_assert_eq!(total, cart.total());
                prop_assert_eq!(
                    total.amount(),
                    cart.subtotal().amount().saturating_sub(discount as u64)
                );
            }

            /// Property: a rejected quantity update never changes the cart.
            #[test]
            fn rejected_update_is_a_noop(start in 1i64..100, bad in i64::MIN..=0) {
                let mut cart = test_cart();
                let product = test_product(1_000);
                cart.add_line_item(&product, start).unwrap();
                let before = cart.clone();

                prop_assert_eq!(
                    cart.update_quantity(product.id, bad),
                    Err(CartError::InvalidQuantity(bad))
                );
                prop_assert_eq!(cart, before);
            }
        }
    }
}
