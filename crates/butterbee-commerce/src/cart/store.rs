//! The session cart: reducer state plus write-through persistence.

use butterbee_cache::{Cache, KvStore, SessionId};

use crate::cart::{parse_quantity, CartAction, CartNotice, CartState, CartTotals, PriceChange, PricingMode};
use crate::catalog::{Catalog, Product};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// Storage key prefix for persisted carts.
pub const CART_KEY_PREFIX: &str = "butterbee.cart";

/// Single-owner cart for one shopper session.
///
/// Every mutation is applied to the in-memory [`CartState`] first and then
/// written to the store. Storage failures are logged and otherwise ignored:
/// the in-memory state stays authoritative for the rest of the session.
pub struct CartStore<S> {
    state: CartState,
    cache: Cache<S>,
    key: String,
}

impl<S: KvStore> CartStore<S> {
    /// Open the cart of `session`, restoring any persisted state.
    pub fn open(store: S, session: &SessionId, currency: Currency) -> Self {
        Self::with_key(store, session.key(CART_KEY_PREFIX), currency)
    }

    /// Open a cart stored under an explicit key.
    pub fn with_key(store: S, key: impl Into<String>, currency: Currency) -> Self {
        let cache = Cache::new(store);
        let key = key.into();
        let state = match cache.get::<CartState>(&key) {
            Ok(Some(state)) => {
                let state = state.normalized();
                tracing::debug!(key = %key, lines = state.unique_item_count(), "restored cart");
                state
            }
            Ok(None) => CartState::new(currency),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "could not restore cart, starting empty");
                CartState::new(currency)
            }
        };
        Self { state, cache, key }
    }

    /// Apply an action and persist the result.
    pub fn dispatch(&mut self, action: CartAction) -> Option<CartNotice> {
        let kind = action.kind();
        let notice = self.state.apply(action);
        match notice {
            Some(ref n) => {
                tracing::debug!(action = kind, notice = ?n, count = self.state.count(), "cart updated");
                self.persist();
            }
            None => tracing::debug!(action = kind, "cart action was a no-op"),
        }
        notice
    }

    /// Add one unit of a product.
    pub fn add(&mut self, product: Product) -> Option<CartNotice> {
        self.dispatch(CartAction::add(product))
    }

    /// Change a product's quantity by `delta`.
    pub fn add_quantity(&mut self, product: Product, delta: i64) -> Option<CartNotice> {
        self.dispatch(CartAction::Add { product, delta })
    }

    /// Remove a product's line.
    pub fn remove(&mut self, product_id: &ProductId) -> Option<CartNotice> {
        self.dispatch(CartAction::Remove {
            product_id: product_id.clone(),
        })
    }

    /// Set a line's quantity.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> Option<CartNotice> {
        self.dispatch(CartAction::SetQuantity {
            product_id: product_id.clone(),
            quantity,
        })
    }

    /// Set a line's quantity from raw input.
    ///
    /// Input that is not an integer is rejected and the cart is left as is.
    pub fn set_quantity_input(
        &mut self,
        product_id: &ProductId,
        raw: &str,
    ) -> Result<Option<CartNotice>, CommerceError> {
        let quantity = parse_quantity(raw)?;
        Ok(self.set_quantity(product_id, quantity))
    }

    /// Add a raw-input quantity of a product.
    pub fn add_input(
        &mut self,
        product: Product,
        raw: &str,
    ) -> Result<Option<CartNotice>, CommerceError> {
        let delta = parse_quantity(raw)?;
        Ok(self.add_quantity(product, delta))
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> Option<CartNotice> {
        self.dispatch(CartAction::Clear)
    }

    /// Refresh snapshots from the catalog and persist if any line changed.
    ///
    /// Only price changes are reported back.
    pub fn reprice(&mut self, catalog: &dyn Catalog) -> Vec<PriceChange> {
        let before = self.state.clone();
        let changes = self.state.reprice(catalog);
        if self.state != before {
            tracing::debug!(price_changes = changes.len(), "cart refreshed from catalog");
            self.persist();
        }
        changes
    }

    /// Current contents.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Sum of quantities.
    pub fn count(&self) -> i64 {
        self.state.count()
    }

    /// Snapshot total.
    pub fn total(&self) -> Result<Money, CommerceError> {
        self.state.total()
    }

    /// Totals under a pricing mode.
    pub fn totals(
        &self,
        mode: PricingMode,
        catalog: &dyn Catalog,
    ) -> Result<CartTotals, CommerceError> {
        self.state.pricing(mode, catalog)
    }

    /// Storage key of this cart.
    pub fn key(&self) -> &str {
        &self.key
    }

    fn persist(&self) {
        if let Err(e) = self.cache.set(&self.key, &self.state) {
            tracing::warn!(key = %self.key, error = %e, "failed to persist cart");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ProductPatch, StaticCatalog};
    use butterbee_cache::{CacheError, MemoryStore};

    /// Store whose writes always fail.
    struct ReadOnlyStore;

    impl KvStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &[u8]) -> Result<(), CacheError> {
            Err(CacheError::StoreError("disk full".to_string()))
        }

        fn delete(&self, _key: &str) -> Result<(), CacheError> {
            Err(CacheError::StoreError("disk full".to_string()))
        }

        fn keys(&self) -> Result<Vec<String>, CacheError> {
            Ok(vec![])
        }
    }

    fn dosa() -> Product {
        Product::new("dosa", "Dosa Batter", Money::inr(100))
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let backing = MemoryStore::new();
        let session = SessionId::new("s1");

        let mut cart = CartStore::open(&backing, &session, Currency::INR);
        cart.add_quantity(dosa(), 2);
        drop(cart);

        let reopened = CartStore::open(&backing, &session, Currency::INR);
        assert_eq!(reopened.count(), 2);
        assert_eq!(reopened.key(), "butterbee.cart:s1");
    }

    #[test]
    fn test_clear_is_persisted() {
        let backing = MemoryStore::new();
        let session = SessionId::new("s1");
        let mut cart = CartStore::open(&backing, &session, Currency::INR);
        cart.add(dosa());
        cart.clear();

        let reopened = CartStore::open(&backing, &session, Currency::INR);
        assert!(reopened.state().is_empty());
    }

    #[test]
    fn test_noop_does_not_touch_storage() {
        let backing = MemoryStore::new();
        let mut cart = CartStore::open(&backing, &SessionId::new("s1"), Currency::INR);
        assert_eq!(cart.remove(&ProductId::new("ghost")), None);
        assert!(backing.is_empty());
    }

    #[test]
    fn test_persistence_failure_is_swallowed() {
        let mut cart = CartStore::open(ReadOnlyStore, &SessionId::new("s1"), Currency::INR);
        assert!(cart.add_quantity(dosa(), 3).is_some());
        assert_eq!(cart.count(), 3);
        assert_eq!(cart.total().unwrap(), Money::inr(300));
    }

    #[test]
    fn test_corrupt_persisted_cart_starts_empty() {
        let backing = MemoryStore::new();
        backing.set("butterbee.cart:s1", b"{{{").unwrap();
        let cart = CartStore::open(&backing, &SessionId::new("s1"), Currency::INR);
        assert!(cart.state().is_empty());
    }

    #[test]
    fn test_invalid_quantity_input_keeps_state() {
        let mut cart = CartStore::open(MemoryStore::new(), &SessionId::new("s1"), Currency::INR);
        cart.add_quantity(dosa(), 2);
        let before = cart.state().clone();

        let result = cart.set_quantity_input(&ProductId::new("dosa"), "two");
        assert!(matches!(result, Err(CommerceError::InvalidQuantity(_))));
        assert_eq!(cart.state(), &before);

        cart.set_quantity_input(&ProductId::new("dosa"), " 5 ").unwrap();
        assert_eq!(cart.count(), 5);
    }

    #[test]
    fn test_reprice_persists_name_only_change() {
        let backing = MemoryStore::new();
        let session = SessionId::new("s1");
        let mut cart = CartStore::open(&backing, &session, Currency::INR);
        cart.add(dosa());

        let mut catalog = StaticCatalog::new(vec![dosa()]).unwrap();
        catalog
            .update(
                &ProductId::new("dosa"),
                &ProductPatch {
                    name: Some("Stone-ground Dosa Batter".into()),
                    ..ProductPatch::default()
                },
            )
            .unwrap();

        assert!(cart.reprice(&catalog).is_empty());
        let reopened = CartStore::open(&backing, &session, Currency::INR);
        let line = reopened.state().line(&ProductId::new("dosa")).unwrap();
        assert_eq!(line.product.name, "Stone-ground Dosa Batter");
    }

    #[test]
    fn test_reprice_without_changes_does_not_write() {
        let backing = MemoryStore::new();
        let catalog = StaticCatalog::new(vec![dosa()]).unwrap();
        let mut cart = CartStore::open(&backing, &SessionId::new("s1"), Currency::INR);
        cart.add(dosa());
        backing.delete("butterbee.cart:s1").unwrap();

        cart.reprice(&catalog);
        assert!(backing.is_empty());
    }

    #[test]
    fn test_sessions_are_isolated() {
        let backing = MemoryStore::new();
        let mut a = CartStore::open(&backing, &SessionId::new("a"), Currency::INR);
        a.add(dosa());
        let b = CartStore::open(&backing, &SessionId::new("b"), Currency::INR);
        assert!(b.state().is_empty());
    }
}
