//! Transient shopper notifications emitted by cart mutations.

use crate::ids::ProductId;
use serde::Serialize;
use std::fmt;

/// What a cart mutation did, for a toast-style message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CartNotice {
    /// A new line was inserted.
    Added { product_id: ProductId, quantity: i64 },
    /// An existing line's quantity changed.
    QuantityUpdated { product_id: ProductId, quantity: i64 },
    /// A line was dropped.
    Removed { product_id: ProductId },
    /// The cart was emptied.
    Cleared,
}

impl CartNotice {
    /// Short message for the shopper.
    pub fn message(&self) -> &'static str {
        match self {
            CartNotice::Added { .. } => "Added to cart",
            CartNotice::QuantityUpdated { .. } => "Updated quantity",
            CartNotice::Removed { .. } => "Removed item",
            CartNotice::Cleared => "Cart cleared",
        }
    }
}

impl fmt::Display for CartNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
