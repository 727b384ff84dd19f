//! Shopping cart module.
//!
//! [`CartState`] is a pure reducer over [`CartAction`]s; [`CartStore`] owns
//! one session's state and writes it through to a key-value store.

mod cart;
mod notice;
mod pricing;
mod quantity;
mod store;

pub use cart::{CartAction, CartLine, CartState};
pub use notice::CartNotice;
pub use pricing::{CartTotals, LinePricing, PriceChange, PricingMode};
pub use quantity::parse_quantity;
pub use store::{CartStore, CART_KEY_PREFIX};
