//! # Cart Store
//!
//! Owns the live cart, runs the cart operations against the inventory, and
//! writes every successful change through to storage.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  UI Action             Store Method                Inventory Call       │
//! │  ─────────             ────────────                ──────────────       │
//! │                                                                         │
//! │  Click Product ──────► add_product(id)                                 │
//! │                          ├── in cart ────────────► get_stock(id)       │
//! │                          └── new ────────────────► get_product(id)     │
//! │                                                                         │
//! │  Change Quantity ────► update_product_amount() ──► get_stock(id)       │
//! │                                                                         │
//! │  Click Remove ───────► remove_product(id)          (none)              │
//! │                                                                         │
//! │  Click Clear ────────► clear()                     (none)              │
//! │                                                                         │
//! │  Success ──► commit: publish snapshot, then storage.set(key, json)     │
//! │  Failure ──► one CartNotice through the Notifier, cart untouched       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! Mutations take an async mutex for their whole run, inventory round trip
//! included. Two clicks in flight at once therefore apply one after the
//! other; the second sees the first one's result.
//!
//! Readers never take that lock. The current cart sits in a
//! `watch` channel: [`CartStore::cart`] clones the latest snapshot and
//! [`CartStore::subscribe`] hands out a receiver that wakes on each commit.
//!
//! ## Errors
//! No operation returns an error. Failures become a [`CartNotice`] and a log
//! line; a storage write failure is only logged, since the in-memory cart is
//! the source of truth for the session.

use thiserror::Error;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use stockcart_core::{Cart, CoreError, ProductId, UpdateProductAmount, CART_STORAGE_KEY};

use crate::state::notify::CartNotice;
use crate::state::ports::{CartStorage, InventoryClient, InventoryError, Notifier};

/// Why a single cart operation did not go through.
#[derive(Debug, Error)]
pub enum CartError {
    /// A cart rule rejected the change.
    #[error(transparent)]
    Rule(#[from] CoreError),

    /// The inventory lookup failed.
    #[error("Inventory lookup failed: {0}")]
    Inventory(#[from] InventoryError),
}

impl CartError {
    /// Whether the failure was the stock ceiling.
    pub fn is_out_of_stock(&self) -> bool {
        matches!(self, CartError::Rule(CoreError::InsufficientStock { .. }))
    }
}

// =============================================================================
// Cart Store
// =============================================================================

/// The single cart instance shared by a storefront.
///
/// ## Usage
/// ```rust,ignore
/// let store = CartStore::load(inventory, notifier, storage).await;
///
/// store.add_product(ProductId::new(5)).await;
/// store.update_product_amount(UpdateProductAmount { product_id: ProductId::new(5), amount: 3 }).await;
///
/// for entry in store.cart().entries() {
///     println!("{} × {}", entry.amount, entry.product.title);
/// }
/// ```
pub struct CartStore<I, N, S> {
    inventory: I,
    notifier: N,
    storage: S,
    key: String,
    state: watch::Sender<Cart>,
    mutation: Mutex<()>,
}

impl<I, N, S> CartStore<I, N, S>
where
    I: InventoryClient,
    N: Notifier,
    S: CartStorage,
{
    /// Builds the store from the cart saved under [`CART_STORAGE_KEY`].
    pub async fn load(inventory: I, notifier: N, storage: S) -> Self {
        Self::load_with_key(inventory, notifier, storage, CART_STORAGE_KEY).await
    }

    /// Builds the store from the cart saved under `key`.
    ///
    /// Absent, unreadable or invalid saved data yields an empty cart. Nothing
    /// is written back until the first successful mutation.
    pub async fn load_with_key(
        inventory: I,
        notifier: N,
        storage: S,
        key: impl Into<String>,
    ) -> Self {
        let key = key.into();

        let cart = match storage.get(&key).await {
            Ok(Some(raw)) => Cart::from_json(&raw).unwrap_or_else(|e| {
                warn!(key = %key, error = %e, "Saved cart rejected, starting empty");
                Cart::new()
            }),
            Ok(None) => {
                debug!(key = %key, "No saved cart");
                Cart::new()
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Could not read saved cart, starting empty");
                Cart::new()
            }
        };

        info!(entries = cart.len(), "Cart loaded");

        let (state, _) = watch::channel(cart);

        CartStore {
            inventory,
            notifier,
            storage,
            key,
            state,
            mutation: Mutex::new(()),
        }
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    /// Snapshot of the current cart.
    pub fn cart(&self) -> Cart {
        self.state.borrow().clone()
    }

    /// Change feed; the receiver sees every committed cart.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.state.subscribe()
    }

    /// Storage key the cart is written under.
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - In cart: fetch stock, raise the amount by one if it fits
    /// - Not in cart: fetch the product, append it with amount 1
    ///
    /// ## Notices
    /// - "requested quantity out of stock" when `amount + 1 > stock`
    /// - "error adding product" on any inventory failure
    pub async fn add_product(&self, product_id: ProductId) {
        let _guard = self.mutation.lock().await;
        debug!(product_id = %product_id, "add_product");

        let current = self.cart();
        match self.added(&current, product_id).await {
            Ok(next) => self.commit(next).await,
            Err(err) => {
                let notice = if err.is_out_of_stock() {
                    CartNotice::OutOfStock
                } else {
                    CartNotice::AddFailed
                };
                self.reject(notice, &err);
            }
        }
    }

    /// Drops a product's entry.
    ///
    /// ## Notices
    /// - "error removing product" when the product is not in the cart
    pub async fn remove_product(&self, product_id: ProductId) {
        let _guard = self.mutation.lock().await;
        debug!(product_id = %product_id, "remove_product");

        match self.cart().without(product_id) {
            Ok(next) => self.commit(next).await,
            Err(err) => self.reject(CartNotice::RemoveFailed, &CartError::from(err)),
        }
    }

    /// Sets a product's amount.
    ///
    /// ## Behavior
    /// - `amount < 1`: ignored silently, no inventory call
    /// - Otherwise: fetch stock, set the amount if it fits; the entry keeps
    ///   its position
    ///
    /// ## Notices
    /// - "requested quantity out of stock" when `amount > stock`
    /// - "error changing product quantity" when the product is not in the
    ///   cart or the inventory fails
    pub async fn update_product_amount(&self, request: UpdateProductAmount) {
        let UpdateProductAmount { product_id, amount } = request;

        if amount < 1 {
            debug!(product_id = %product_id, amount, "Ignoring quantity below one");
            return;
        }

        let _guard = self.mutation.lock().await;
        debug!(product_id = %product_id, amount, "update_product_amount");

        let current = self.cart();
        match self.amount_changed(&current, product_id, amount).await {
            Ok(next) => self.commit(next).await,
            Err(err) => {
                let notice = if err.is_out_of_stock() {
                    CartNotice::OutOfStock
                } else {
                    CartNotice::UpdateFailed
                };
                self.reject(notice, &err);
            }
        }
    }

    /// Empties the cart.
    pub async fn clear(&self) {
        let _guard = self.mutation.lock().await;
        debug!("clear");

        self.commit(self.cart().cleared()).await;
    }

    // =========================================================================
    // Internals
    // =========================================================================

    async fn added(&self, cart: &Cart, product_id: ProductId) -> Result<Cart, CartError> {
        if cart.contains(product_id) {
            let stock = self.inventory.get_stock(product_id).await?;
            Ok(cart.incremented(product_id, stock)?)
        } else {
            let product = self.inventory.get_product(product_id).await?;
            Ok(cart.with_product(product)?)
        }
    }

    async fn amount_changed(
        &self,
        cart: &Cart,
        product_id: ProductId,
        amount: i64,
    ) -> Result<Cart, CartError> {
        if !cart.contains(product_id) {
            return Err(CoreError::ProductNotInCart(product_id).into());
        }

        let stock = self.inventory.get_stock(product_id).await?;
        Ok(cart.with_amount(product_id, amount, stock)?)
    }

    /// Publishes `next` and writes it through to storage.
    async fn commit(&self, next: Cart) {
        let encoded = next.to_json();
        let entries = next.len();
        self.state.send_replace(next);

        let json = match encoded {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Cart not persisted");
                return;
            }
        };

        match self.storage.set(&self.key, &json).await {
            Ok(()) => debug!(key = %self.key, entries, "Cart committed"),
            Err(e) => warn!(key = %self.key, error = %e, "Cart not persisted, keeping in-memory state"),
        }
    }

    fn reject(&self, notice: CartNotice, err: &CartError) {
        if matches!(err, CartError::Inventory(_)) {
            warn!(error = %err, notice = %notice, "Cart operation failed");
        } else {
            debug!(error = %err, notice = %notice, "Cart operation rejected");
        }
        self.notifier.error(notice.message());
    }
}

impl<I, N, S> std::fmt::Debug for CartStore<I, N, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("cart", &*self.state.borrow())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use stockcart_core::{Money, Product, StockLevel};

    use crate::state::notify::RecordingNotifier;
    use crate::state::storage::MemoryStorage;

    const OUT_OF_STOCK: &str = "requested quantity out of stock";

    /// Inventory with scripted products and stock. Unknown ids fail.
    #[derive(Default)]
    struct FakeInventory {
        products: HashMap<u32, Product>,
        stock: std::sync::Mutex<HashMap<u32, i64>>,
        offline: std::sync::atomic::AtomicBool,
        stock_calls: AtomicUsize,
    }

    impl FakeInventory {
        fn with(items: &[(u32, i64, i64)]) -> Self {
            let mut inventory = FakeInventory::default();
            for &(id, price_cents, stock) in items {
                inventory.products.insert(
                    id,
                    Product::new(
                        ProductId::new(id),
                        format!("Product {}", id),
                        Money::from_cents(price_cents),
                        format!("{}.jpg", id),
                    ),
                );
                inventory.stock.lock().unwrap().insert(id, stock);
            }
            inventory
        }

        fn set_stock(&self, id: u32, amount: i64) {
            self.stock.lock().unwrap().insert(id, amount);
        }

        fn go_offline(&self) {
            self.offline.store(true, Ordering::SeqCst);
        }

        fn stock_calls(&self) -> usize {
            self.stock_calls.load(Ordering::SeqCst)
        }

        fn check_online(&self) -> Result<(), InventoryError> {
            if self.offline.load(Ordering::SeqCst) {
                return Err(InventoryError::Unavailable("offline".to_string()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl InventoryClient for FakeInventory {
        async fn get_stock(&self, product_id: ProductId) -> Result<StockLevel, InventoryError> {
            self.stock_calls.fetch_add(1, Ordering::SeqCst);
            self.check_online()?;
            tokio::task::yield_now().await;

            self.stock
                .lock()
                .unwrap()
                .get(&product_id.get())
                .map(|&amount| StockLevel::new(amount))
                .ok_or_else(|| InventoryError::Unavailable(format!("no stock for {}", product_id)))
        }

        async fn get_product(&self, product_id: ProductId) -> Result<Product, InventoryError> {
            self.check_online()?;
            tokio::task::yield_now().await;

            self.products
                .get(&product_id.get())
                .cloned()
                .ok_or_else(|| InventoryError::Unavailable(format!("no product {}", product_id)))
        }
    }

    type TestStore = CartStore<Arc<FakeInventory>, Arc<RecordingNotifier>, Arc<MemoryStorage>>;

    struct Harness {
        store: TestStore,
        inventory: Arc<FakeInventory>,
        notifier: Arc<RecordingNotifier>,
        storage: Arc<MemoryStorage>,
    }

    impl Harness {
        async fn new(inventory: FakeInventory) -> Self {
            Self::with_storage(inventory, MemoryStorage::new()).await
        }

        async fn with_storage(inventory: FakeInventory, storage: MemoryStorage) -> Self {
            let inventory = Arc::new(inventory);
            let notifier = Arc::new(RecordingNotifier::new());
            let storage = Arc::new(storage);
            let store =
                CartStore::load(inventory.clone(), notifier.clone(), storage.clone()).await;

            Harness {
                store,
                inventory,
                notifier,
                storage,
            }
        }

        async fn reload(&self) -> TestStore {
            CartStore::load(
                self.inventory.clone(),
                Arc::new(RecordingNotifier::new()),
                self.storage.clone(),
            )
            .await
        }

        fn amounts(&self) -> Vec<(u32, i64)> {
            self.store
                .cart()
                .entries()
                .iter()
                .map(|e| (e.id().get(), e.amount))
                .collect()
        }
    }

    fn update(id: u32, amount: i64) -> UpdateProductAmount {
        UpdateProductAmount {
            product_id: ProductId::new(id),
            amount,
        }
    }

    // -------------------------------------------------------------------------
    // Loading
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_load_empty_storage() {
        let h = Harness::new(FakeInventory::default()).await;

        assert!(h.store.cart().is_empty());
        assert_eq!(h.storage.peek(CART_STORAGE_KEY), None);
    }

    #[tokio::test]
    async fn test_load_saved_cart() {
        let saved = r#"[{"id":5,"title":"Tênis Runner","price":139.9,"image":"runner.jpg","amount":2}]"#;
        let h = Harness::with_storage(
            FakeInventory::default(),
            MemoryStorage::with_entry(CART_STORAGE_KEY, saved),
        )
        .await;

        assert_eq!(h.amounts(), vec![(5, 2)]);
        assert_eq!(h.store.cart().totals().subtotal.cents(), 27980);
    }

    #[tokio::test]
    async fn test_load_rejects_malformed_data() {
        for saved in [
            "{not json",
            r#"{"id": 5}"#,
            r#"[{"id":5,"title":"A","price":1,"image":"","amount":0}]"#,
            r#"[{"id":5,"title":"A","price":1,"image":"","amount":1},{"id":5,"title":"A","price":1,"image":"","amount":1}]"#,
        ] {
            let h = Harness::with_storage(
                FakeInventory::default(),
                MemoryStorage::with_entry(CART_STORAGE_KEY, saved),
            )
            .await;

            assert!(h.store.cart().is_empty(), "accepted {}", saved);
            assert!(h.notifier.messages().is_empty());
        }
    }

    #[tokio::test]
    async fn test_load_with_custom_key() {
        let storage = Arc::new(MemoryStorage::with_entry(
            "shop:cart",
            r#"[{"id":1,"title":"A","price":1,"image":"","amount":1}]"#,
        ));
        let store = CartStore::load_with_key(
            Arc::new(FakeInventory::default()),
            Arc::new(RecordingNotifier::new()),
            storage.clone(),
            "shop:cart",
        )
        .await;

        assert_eq!(store.storage_key(), "shop:cart");
        assert_eq!(store.cart().len(), 1);
    }

    // -------------------------------------------------------------------------
    // add_product
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_add_new_product() {
        let h = Harness::new(FakeInventory::with(&[(5, 13990, 3)])).await;

        h.store.add_product(ProductId::new(5)).await;

        assert_eq!(h.amounts(), vec![(5, 1)]);
        assert_eq!(h.store.cart().entries()[0].product.title, "Product 5");
        assert!(h.notifier.messages().is_empty());
        // New products are not stock-checked
        assert_eq!(h.inventory.stock_calls(), 0);
    }

    #[tokio::test]
    async fn test_add_until_stock_runs_out() {
        let h = Harness::new(FakeInventory::with(&[(5, 13990, 3)])).await;

        for _ in 0..3 {
            h.store.add_product(ProductId::new(5)).await;
        }
        assert_eq!(h.amounts(), vec![(5, 3)]);
        assert!(h.notifier.messages().is_empty());

        h.store.add_product(ProductId::new(5)).await;

        assert_eq!(h.amounts(), vec![(5, 3)]);
        assert_eq!(h.notifier.messages(), vec![OUT_OF_STOCK]);
    }

    #[tokio::test]
    async fn test_add_existing_keeps_order() {
        let h = Harness::new(FakeInventory::with(&[(1, 100, 5), (2, 100, 5), (3, 100, 5)])).await;

        for id in [1, 2, 3, 2] {
            h.store.add_product(ProductId::new(id)).await;
        }

        assert_eq!(h.amounts(), vec![(1, 1), (2, 2), (3, 1)]);
    }

    #[tokio::test]
    async fn test_add_unknown_product() {
        let h = Harness::new(FakeInventory::with(&[(1, 100, 5)])).await;
        h.store.add_product(ProductId::new(1)).await;

        h.store.add_product(ProductId::new(99)).await;

        assert_eq!(h.amounts(), vec![(1, 1)]);
        assert_eq!(h.notifier.messages(), vec!["error adding product"]);
    }

    #[tokio::test]
    async fn test_add_while_inventory_offline() {
        let h = Harness::new(FakeInventory::with(&[(1, 100, 5)])).await;
        h.store.add_product(ProductId::new(1)).await;
        let saved = h.storage.peek(CART_STORAGE_KEY);

        h.inventory.go_offline();
        h.store.add_product(ProductId::new(1)).await;

        assert_eq!(h.amounts(), vec![(1, 1)]);
        assert_eq!(h.notifier.messages(), vec!["error adding product"]);
        assert_eq!(h.storage.peek(CART_STORAGE_KEY), saved);
    }

    #[tokio::test]
    async fn test_add_sees_fresh_stock() {
        let h = Harness::new(FakeInventory::with(&[(5, 100, 1)])).await;
        h.store.add_product(ProductId::new(5)).await;

        h.store.add_product(ProductId::new(5)).await;
        assert_eq!(h.amounts(), vec![(5, 1)]);

        h.inventory.set_stock(5, 2);
        h.store.add_product(ProductId::new(5)).await;
        assert_eq!(h.amounts(), vec![(5, 2)]);
    }

    // -------------------------------------------------------------------------
    // remove_product
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_remove_present_product() {
        let saved = r#"[{"id":5,"title":"A","price":10,"image":"","amount":2}]"#;
        let h = Harness::with_storage(
            FakeInventory::default(),
            MemoryStorage::with_entry(CART_STORAGE_KEY, saved),
        )
        .await;

        h.store.remove_product(ProductId::new(5)).await;

        assert!(h.store.cart().is_empty());
        assert_eq!(h.storage.peek(CART_STORAGE_KEY).as_deref(), Some("[]"));
        assert!(h.notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_remove_preserves_others() {
        let h = Harness::new(FakeInventory::with(&[(1, 100, 5), (2, 100, 5), (3, 100, 5)])).await;
        for id in [1, 2, 3] {
            h.store.add_product(ProductId::new(id)).await;
        }
        h.store
            .update_product_amount(update(3, 4))
            .await;

        h.store.remove_product(ProductId::new(2)).await;

        assert_eq!(h.amounts(), vec![(1, 1), (3, 4)]);
    }

    #[tokio::test]
    async fn test_remove_absent_product() {
        let h = Harness::new(FakeInventory::with(&[(1, 100, 5)])).await;
        h.store.add_product(ProductId::new(1)).await;

        h.store.remove_product(ProductId::new(7)).await;

        assert_eq!(h.amounts(), vec![(1, 1)]);
        assert_eq!(h.notifier.messages(), vec!["error removing product"]);
    }

    // -------------------------------------------------------------------------
    // update_product_amount
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_update_sets_exact_amount() {
        let h = Harness::new(FakeInventory::with(&[(5, 100, 10)])).await;
        h.store.add_product(ProductId::new(5)).await;
        h.store.add_product(ProductId::new(5)).await;

        h.store.update_product_amount(update(5, 7)).await;

        assert_eq!(h.amounts(), vec![(5, 7)]);
        assert!(h.notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_update_below_one_is_silent_noop() {
        let h = Harness::new(FakeInventory::with(&[(5, 100, 10)])).await;
        h.store.add_product(ProductId::new(5)).await;
        let calls = h.inventory.stock_calls();

        h.store.update_product_amount(update(5, 0)).await;
        h.store.update_product_amount(update(5, -2)).await;

        assert_eq!(h.amounts(), vec![(5, 1)]);
        assert!(h.notifier.messages().is_empty());
        assert_eq!(h.inventory.stock_calls(), calls);
    }

    #[tokio::test]
    async fn test_update_above_stock() {
        let h = Harness::new(FakeInventory::with(&[(5, 100, 10)])).await;
        h.store.add_product(ProductId::new(5)).await;

        h.store.update_product_amount(update(5, 11)).await;

        assert_eq!(h.amounts(), vec![(5, 1)]);
        assert_eq!(h.notifier.messages(), vec![OUT_OF_STOCK]);
    }

    #[tokio::test]
    async fn test_update_keeps_position() {
        let h = Harness::new(FakeInventory::with(&[(1, 100, 5), (2, 100, 5), (3, 100, 5)])).await;
        for id in [1, 2, 3] {
            h.store.add_product(ProductId::new(id)).await;
        }

        h.store.update_product_amount(update(2, 4)).await;

        assert_eq!(h.amounts(), vec![(1, 1), (2, 4), (3, 1)]);
    }

    #[tokio::test]
    async fn test_update_absent_product() {
        let h = Harness::new(FakeInventory::with(&[(1, 100, 5), (2, 100, 5)])).await;
        h.store.add_product(ProductId::new(1)).await;

        h.store.update_product_amount(update(2, 3)).await;

        assert_eq!(h.amounts(), vec![(1, 1)]);
        assert_eq!(h.notifier.messages(), vec!["error changing product quantity"]);
        assert_eq!(h.inventory.stock_calls(), 0);
    }

    #[tokio::test]
    async fn test_update_while_inventory_offline() {
        let h = Harness::new(FakeInventory::with(&[(1, 100, 5)])).await;
        h.store.add_product(ProductId::new(1)).await;

        h.inventory.go_offline();
        h.store.update_product_amount(update(1, 2)).await;

        assert_eq!(h.amounts(), vec![(1, 1)]);
        assert_eq!(h.notifier.messages(), vec!["error changing product quantity"]);
    }

    // -------------------------------------------------------------------------
    // clear
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_clear() {
        let h = Harness::new(FakeInventory::with(&[(1, 100, 5), (2, 100, 5)])).await;
        h.store.add_product(ProductId::new(1)).await;
        h.store.add_product(ProductId::new(2)).await;

        h.store.clear().await;

        assert!(h.store.cart().is_empty());
        assert_eq!(h.storage.peek(CART_STORAGE_KEY).as_deref(), Some("[]"));
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_reload_reproduces_cart() {
        let h = Harness::new(FakeInventory::with(&[(1, 1099, 5), (2, 250, 5), (3, 13990, 5)])).await;

        h.store.add_product(ProductId::new(3)).await;
        assert_eq!(h.reload().await.cart(), h.store.cart());

        h.store.add_product(ProductId::new(1)).await;
        h.store.add_product(ProductId::new(2)).await;
        h.store.add_product(ProductId::new(1)).await;
        assert_eq!(h.reload().await.cart(), h.store.cart());

        h.store.update_product_amount(update(2, 5)).await;
        assert_eq!(h.reload().await.cart(), h.store.cart());

        h.store.remove_product(ProductId::new(3)).await;
        let reloaded = h.reload().await.cart();
        assert_eq!(reloaded, h.store.cart());
        assert_eq!(
            reloaded
                .entries()
                .iter()
                .map(|e| (e.id().get(), e.amount))
                .collect::<Vec<_>>(),
            vec![(1, 2), (2, 5)]
        );
    }

    #[tokio::test]
    async fn test_persistence_failure_keeps_memory_state() {
        let h = Harness::new(FakeInventory::with(&[(1, 100, 5)])).await;
        h.storage.reject_writes(true);

        h.store.add_product(ProductId::new(1)).await;

        assert_eq!(h.amounts(), vec![(1, 1)]);
        assert!(h.notifier.messages().is_empty());
        assert_eq!(h.storage.peek(CART_STORAGE_KEY), None);
    }

    #[tokio::test]
    async fn test_saved_json_shape() {
        let h = Harness::new(FakeInventory::with(&[(5, 13990, 3)])).await;
        h.store.add_product(ProductId::new(5)).await;

        let saved = h.storage.peek(CART_STORAGE_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(&saved).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "id": 5,
                "title": "Product 5",
                "price": 139.9,
                "image": "5.jpg",
                "amount": 1
            }])
        );
    }

    // -------------------------------------------------------------------------
    // Observation & concurrency
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_subscribers_see_commits_only() {
        let h = Harness::new(FakeInventory::with(&[(1, 100, 1)])).await;
        let mut rx = h.store.subscribe();

        h.store.add_product(ProductId::new(1)).await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);

        // Rejected operations publish nothing
        h.store.add_product(ProductId::new(1)).await;
        h.store.remove_product(ProductId::new(9)).await;
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_adds_are_serialized() {
        let h = Harness::new(FakeInventory::with(&[(1, 100, 5), (2, 100, 5)])).await;

        tokio::join!(
            h.store.add_product(ProductId::new(1)),
            h.store.add_product(ProductId::new(2)),
            h.store.add_product(ProductId::new(1)),
        );

        let mut amounts = h.amounts();
        amounts.sort();
        assert_eq!(amounts, vec![(1, 2), (2, 1)]);
        assert_eq!(h.reload().await.cart(), h.store.cart());
    }
}
