//! Cart state and the reducer that drives it.

use crate::catalog::Product;
use crate::cart::CartNotice;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// The closed set of cart mutations.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Change a product's quantity by `delta`, inserting it when absent.
    Add { product: Product, delta: i64 },
    /// Drop a product's line.
    Remove { product_id: ProductId },
    /// Overwrite a line's quantity (clamped to at least 1).
    SetQuantity { product_id: ProductId, quantity: i64 },
    /// Empty the cart.
    Clear,
}

impl CartAction {
    /// Add one unit of `product`.
    pub fn add(product: Product) -> Self {
        CartAction::Add { product, delta: 1 }
    }

    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CartAction::Add { .. } => "add",
            CartAction::Remove { .. } => "remove",
            CartAction::SetQuantity { .. } => "set_quantity",
            CartAction::Clear => "clear",
        }
    }
}

/// One cart line: a product snapshot and its quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product as it was when first added. Its price is the snapshot price.
    pub product: Product,
    /// Quantity, always at least 1.
    #[serde(rename = "qty")]
    pub quantity: i64,
}

impl CartLine {
    /// Product id of this line.
    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Snapshot unit price.
    pub fn unit_price(&self) -> Money {
        self.product.price
    }

    /// Unit price times quantity.
    pub fn total(&self) -> Result<Money, CommerceError> {
        self.product
            .price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

/// Shopping cart contents.
///
/// Lines keep insertion order and there is at most one line per product.
/// Mutation only happens through [`CartState::apply`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartState {
    #[serde(default)]
    currency: Currency,
    #[serde(default)]
    items: Vec<CartLine>,
}

impl CartState {
    /// Create an empty cart priced in `currency`.
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            items: Vec::new(),
        }
    }

    /// Apply one action, returning the notice to show the shopper.
    ///
    /// `None` means the action changed nothing.
    pub fn apply(&mut self, action: CartAction) -> Option<CartNotice> {
        match action {
            CartAction::Add { product, delta } => self.add(product, delta),
            CartAction::Remove { product_id } => self.remove(&product_id),
            CartAction::SetQuantity {
                product_id,
                quantity,
            } => self.set_quantity(&product_id, quantity),
            CartAction::Clear => {
                self.items.clear();
                Some(CartNotice::Cleared)
            }
        }
    }

    fn add(&mut self, product: Product, delta: i64) -> Option<CartNotice> {
        if let Some(index) = self.position(&product.id) {
            let new_quantity = self.items[index].quantity.saturating_add(delta);
            if new_quantity <= 0 {
                let line = self.items.remove(index);
                return Some(CartNotice::Removed {
                    product_id: line.product.id,
                });
            }
            let line = &mut self.items[index];
            line.quantity = new_quantity;
            return Some(CartNotice::QuantityUpdated {
                product_id: line.product.id.clone(),
                quantity: line.quantity,
            });
        }

        if delta <= 0 {
            return None;
        }

        let product_id = product.id.clone();
        self.items.push(CartLine {
            product,
            quantity: delta,
        });
        Some(CartNotice::Added {
            product_id,
            quantity: delta,
        })
    }

    fn remove(&mut self, product_id: &ProductId) -> Option<CartNotice> {
        let index = self.position(product_id)?;
        self.items.remove(index);
        Some(CartNotice::Removed {
            product_id: product_id.clone(),
        })
    }

    fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> Option<CartNotice> {
        let index = self.position(product_id)?;
        let line = &mut self.items[index];
        line.quantity = quantity.max(1);
        Some(CartNotice::QuantityUpdated {
            product_id: product_id.clone(),
            quantity: line.quantity,
        })
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.items.iter().position(|l| &l.product.id == product_id)
    }

    /// Repair a state restored from storage.
    ///
    /// Lines with a non-positive quantity are dropped and duplicate product
    /// lines are merged into the first one.
    pub fn normalized(self) -> Self {
        let mut out = CartState::new(self.currency);
        for line in self.items {
            if line.quantity <= 0 {
                continue;
            }
            match out.position(&line.product.id) {
                Some(index) => {
                    let merged = &mut out.items[index];
                    merged.quantity = merged.quantity.saturating_add(line.quantity);
                }
                None => out.items.push(line),
            }
        }
        out
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.items
    }

    /// Cart currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Get a line by product id.
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.items.iter().find(|l| &l.product.id == product_id)
    }

    /// Check if a product is in the cart.
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.line(product_id).is_some()
    }

    /// Total item count (sum of quantities).
    pub fn count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, l| acc.saturating_add(l.quantity))
    }

    /// Number of distinct lines.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of snapshot price times quantity over all lines.
    pub fn total(&self) -> Result<Money, CommerceError> {
        let mut total = Money::zero(self.currency);
        for line in &self.items {
            let line_total = line.total()?;
            if line_total.currency != self.currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: self.currency.code().to_string(),
                    got: line_total.currency.code().to_string(),
                });
            }
            total = total.try_add(&line_total).ok_or(CommerceError::Overflow)?;
        }
        Ok(total)
    }

    pub(crate) fn lines_mut(&mut self) -> &mut [CartLine] {
        &mut self.items
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: i64) -> Product {
        Product::new(id, format!("Product {}", id), Money::inr(price))
    }

    fn add(cart: &mut CartState, p: &Product, delta: i64) -> Option<CartNotice> {
        cart.apply(CartAction::Add {
            product: p.clone(),
            delta,
        })
    }

    fn assert_positive(cart: &CartState) {
        assert!(cart.lines().iter().all(|l| l.quantity >= 1));
    }

    #[test]
    fn test_cart_starts_empty() {
        let cart = CartState::default();
        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.total().unwrap(), Money::inr(0));
    }

    #[test]
    fn test_add_then_add_again_updates_quantity() {
        let mut cart = CartState::default();
        let p = product("a", 100);

        let first = cart.apply(CartAction::add(p.clone()));
        assert!(matches!(first, Some(CartNotice::Added { quantity: 1, .. })));

        let second = add(&mut cart, &p, 2);
        assert!(matches!(
            second,
            Some(CartNotice::QuantityUpdated { quantity: 3, .. })
        ));
        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.count(), 3);
    }

    #[test]
    fn test_negative_delta_to_zero_removes_line() {
        let mut cart = CartState::default();
        let p = product("a", 100);
        add(&mut cart, &p, 2);

        let notice = add(&mut cart, &p, -5);
        assert!(matches!(notice, Some(CartNotice::Removed { .. })));
        assert!(!cart.contains(&p.id));
    }

    #[test]
    fn test_non_positive_delta_on_absent_is_noop() {
        let mut cart = CartState::default();
        let p = product("a", 100);
        assert_eq!(add(&mut cart, &p, 0), None);
        assert_eq!(add(&mut cart, &p, -1), None);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_n_then_remove_n_leaves_no_line() {
        let p = product("a", 100);
        for n in 1..=25 {
            let mut cart = CartState::default();
            for _ in 0..n {
                add(&mut cart, &p, 1);
            }
            for _ in 0..n {
                add(&mut cart, &p, -1);
                assert_positive(&cart);
            }
            assert!(!cart.contains(&p.id), "line left after n = {}", n);
        }
    }

    #[test]
    fn test_remove() {
        let mut cart = CartState::default();
        let p = product("a", 100);
        add(&mut cart, &p, 1);

        assert!(cart
            .apply(CartAction::Remove {
                product_id: p.id.clone()
            })
            .is_some());
        assert!(cart.is_empty());
        assert_eq!(
            cart.apply(CartAction::Remove {
                product_id: p.id.clone()
            }),
            None
        );
    }

    #[test]
    fn test_set_quantity_clamps_to_one() {
        let mut cart = CartState::default();
        let p = product("a", 100);
        add(&mut cart, &p, 4);

        cart.apply(CartAction::SetQuantity {
            product_id: p.id.clone(),
            quantity: 0,
        });
        assert_eq!(cart.line(&p.id).unwrap().quantity, 1);

        cart.apply(CartAction::SetQuantity {
            product_id: p.id.clone(),
            quantity: -7,
        });
        assert_eq!(cart.line(&p.id).unwrap().quantity, 1);
    }

    #[test]
    fn test_set_quantity_absent_is_noop() {
        let mut cart = CartState::default();
        let notice = cart.apply(CartAction::SetQuantity {
            product_id: ProductId::new("ghost"),
            quantity: 3,
        });
        assert_eq!(notice, None);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_is_idempotent() {
        let mut cart = CartState::default();
        let p = product("a", 100);
        add(&mut cart, &p, 1);
        let action = CartAction::SetQuantity {
            product_id: p.id.clone(),
            quantity: 6,
        };

        cart.apply(action.clone());
        let once = cart.clone();
        cart.apply(action);
        assert_eq!(cart, once);
    }

    #[test]
    fn test_clear_always_empties() {
        let mut cart = CartState::default();
        assert_eq!(cart.apply(CartAction::Clear), Some(CartNotice::Cleared));

        add(&mut cart, &product("a", 1), 3);
        add(&mut cart, &product("b", 2), 1);
        cart.apply(CartAction::Clear);
        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn test_large_quantities_are_kept_exactly() {
        let mut cart = CartState::default();
        let p = product("a", 2);
        add(&mut cart, &p, 9999);

        let notice = add(&mut cart, &p, 1);
        assert!(matches!(
            notice,
            Some(CartNotice::QuantityUpdated { quantity: 10000, .. })
        ));
        assert_eq!(cart.count(), 10000);

        cart.apply(CartAction::SetQuantity {
            product_id: p.id.clone(),
            quantity: 20000,
        });
        assert_eq!(cart.count(), 20000);
        assert_eq!(cart.total().unwrap(), Money::inr(40000));
    }

    #[test]
    fn test_quantity_saturates_instead_of_wrapping() {
        let mut cart = CartState::default();
        let p = product("a", 1);
        add(&mut cart, &p, i64::MAX);
        add(&mut cart, &p, 5);
        assert_eq!(cart.count(), i64::MAX);
        assert_positive(&cart);
    }

    #[test]
    fn test_count_and_total() {
        let mut cart = CartState::default();
        add(&mut cart, &product("a", 100), 2);
        add(&mut cart, &product("b", 50), 1);

        assert_eq!(cart.count(), 3);
        assert_eq!(cart.total().unwrap(), Money::inr(250));
    }

    #[test]
    fn test_snapshot_price_kept_on_readd() {
        let mut cart = CartState::default();
        add(&mut cart, &product("a", 100), 1);
        add(&mut cart, &product("a", 120), 1);

        let line = cart.line(&ProductId::new("a")).unwrap();
        assert_eq!(line.unit_price(), Money::inr(100));
        assert_eq!(cart.total().unwrap(), Money::inr(200));
    }

    #[test]
    fn test_mixed_currency_total_is_an_error() {
        let mut cart = CartState::default();
        add(&mut cart, &product("a", 100), 1);
        let usd = Product::new("b", "Imported", Money::new(5, Currency::USD));
        add(&mut cart, &usd, 1);
        assert!(matches!(
            cart.total(),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_mixed_sequence_never_stores_non_positive() {
        let mut cart = CartState::default();
        let a = product("a", 10);
        let b = product("b", 20);
        let script: Vec<CartAction> = vec![
            CartAction::Add { product: a.clone(), delta: 3 },
            CartAction::Add { product: b.clone(), delta: -2 },
            CartAction::SetQuantity { product_id: a.id.clone(), quantity: -4 },
            CartAction::Add { product: a.clone(), delta: -1 },
            CartAction::Add { product: b.clone(), delta: 5 },
            CartAction::Add { product: b.clone(), delta: -5 },
            CartAction::Remove { product_id: a.id.clone() },
            CartAction::Add { product: a.clone(), delta: 2 },
        ];
        for action in script {
            cart.apply(action);
            assert_positive(&cart);
            let sum: i64 = cart.lines().iter().map(|l| l.quantity).sum();
            assert_eq!(cart.count(), sum);
        }
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_normalized_repairs_restored_state() {
        let json = r#"{
            "currency": "INR",
            "items": [
                {"product": {"id":"a","name":"A1","price":{"amount":10,"currency":"INR"}}, "qty": 2},
                {"product": {"id":"b","name":"B1","price":{"amount":10,"currency":"INR"}}, "qty": 0},
                {"product": {"id":"a","name":"A1","price":{"amount":10,"currency":"INR"}}, "qty": 3}
            ]
        }"#;
        let restored: CartState = serde_json::from_str(json).unwrap();
        let cart = restored.normalized();
        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.count(), 5);
    }
}
