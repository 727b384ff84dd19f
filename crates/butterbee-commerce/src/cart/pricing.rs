//! Cart pricing: snapshot vs live prices and the totals breakdown.

use crate::cart::CartState;
use crate::catalog::Catalog;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Which unit price a cart line is charged at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PricingMode {
    /// The price captured when the product was first added.
    #[default]
    Snapshot,
    /// The catalog's current price; lines whose product left the catalog keep
    /// their snapshot.
    Live,
}

impl PricingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingMode::Snapshot => "snapshot",
            PricingMode::Live => "live",
        }
    }
}

/// A snapshot price that was refreshed from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceChange {
    pub product_id: ProductId,
    pub old_price: Money,
    pub new_price: Money,
}

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CartTotals {
    /// Sum of quantities.
    pub count: i64,
    /// Sum of line totals.
    pub total: Money,
    /// Per-line breakdown, in cart order.
    pub lines: Vec<LinePricing>,
}

/// Pricing breakdown for a single line.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LinePricing {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
    /// unit_price * quantity.
    pub total: Money,
}

impl CartState {
    /// Refresh product snapshots (price, name and the rest) from the catalog.
    ///
    /// Returns the lines whose price changed. Products missing from the
    /// catalog are left untouched.
    pub fn reprice(&mut self, catalog: &dyn Catalog) -> Vec<PriceChange> {
        let mut changes = Vec::new();
        for line in self.lines_mut() {
            let Some(current) = catalog.product(&line.product.id) else {
                continue;
            };
            if current.price != line.product.price {
                changes.push(PriceChange {
                    product_id: line.product.id.clone(),
                    old_price: line.product.price,
                    new_price: current.price,
                });
            }
            line.product = current;
        }
        changes
    }

    /// Price the cart under `mode` without mutating it.
    pub fn pricing(
        &self,
        mode: PricingMode,
        catalog: &dyn Catalog,
    ) -> Result<CartTotals, CommerceError> {
        let priced = match mode {
            PricingMode::Snapshot => std::borrow::Cow::Borrowed(self),
            PricingMode::Live => {
                let mut live = self.clone();
                live.reprice(catalog);
                std::borrow::Cow::Owned(live)
            }
        };

        let lines = priced
            .lines()
            .iter()
            .map(|line| {
                Ok(LinePricing {
                    product_id: line.product.id.clone(),
                    name: line.product.name.clone(),
                    unit_price: line.unit_price(),
                    quantity: line.quantity,
                    total: line.total()?,
                })
            })
            .collect::<Result<Vec<_>, CommerceError>>()?;

        Ok(CartTotals {
            count: priced.count(),
            total: priced.total()?,
            lines,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartAction;
    use crate::catalog::{Product, ProductPatch, StaticCatalog};

    fn setup() -> (CartState, StaticCatalog) {
        let a = Product::new("a", "Ghee Roast", Money::inr(100));
        let b = Product::new("b", "Filter Coffee", Money::inr(50));
        let mut cart = CartState::default();
        cart.apply(CartAction::Add {
            product: a.clone(),
            delta: 2,
        });
        cart.apply(CartAction::add(b.clone()));
        let catalog = StaticCatalog::new(vec![a, b]).unwrap();
        (cart, catalog)
    }

    #[test]
    fn test_snapshot_ignores_catalog_edits() {
        let (cart, mut catalog) = setup();
        catalog.update(&ProductId::new("a"), &ProductPatch::price(120)).unwrap();

        let totals = cart.pricing(PricingMode::Snapshot, &catalog).unwrap();
        assert_eq!(totals.count, 3);
        assert_eq!(totals.total, Money::inr(250));
        assert_eq!(totals.lines[0].total, Money::inr(200));
    }

    #[test]
    fn test_live_uses_catalog_price_without_mutating() {
        let (cart, mut catalog) = setup();
        catalog.update(&ProductId::new("a"), &ProductPatch::price(120)).unwrap();

        let totals = cart.pricing(PricingMode::Live, &catalog).unwrap();
        assert_eq!(totals.total, Money::inr(290));
        assert_eq!(cart.total().unwrap(), Money::inr(250));
    }

    #[test]
    fn test_reprice_reports_changes() {
        let (mut cart, mut catalog) = setup();
        catalog.update(&ProductId::new("b"), &ProductPatch::price(45)).unwrap();

        let changes = cart.reprice(&catalog);
        assert_eq!(
            changes,
            vec![PriceChange {
                product_id: ProductId::new("b"),
                old_price: Money::inr(50),
                new_price: Money::inr(45),
            }]
        );
        assert_eq!(cart.total().unwrap(), Money::inr(245));
        assert!(cart.reprice(&catalog).is_empty());
    }

    #[test]
    fn test_reprice_keeps_products_missing_from_catalog() {
        let (mut cart, _) = setup();
        let empty = StaticCatalog::default();
        assert!(cart.reprice(&empty).is_empty());
        assert_eq!(cart.total().unwrap(), Money::inr(250));
    }
}
