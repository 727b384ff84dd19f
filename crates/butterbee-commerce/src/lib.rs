//! Storefront core for ButterBee.
//!
//! - **Catalog**: read-only products and menu filtering
//! - **Cart**: reducer-driven cart persisted per session
//! - **Checkout**: delivery slots, addresses, order summary and submission
//! - **Settings**: apartment options and delivery slots
//!
//! # Example
//!
//! ```rust
//! use butterbee_cache::{MemoryStore, SessionId};
//! use butterbee_commerce::prelude::*;
//!
//! let dosa = Product::new("dosa", "Dosa Batter", Money::inr(100));
//! let coffee = Product::new("coffee", "Filter Coffee", Money::inr(50));
//!
//! let mut cart = CartStore::open(MemoryStore::new(), &SessionId::new("demo"), Currency::INR);
//! cart.add_quantity(dosa, 2);
//! let notice = cart.add(coffee);
//!
//! assert_eq!(notice.map(|n| n.message()), Some("Added to cart"));
//! assert_eq!(cart.count(), 3);
//! assert_eq!(cart.total().unwrap(), Money::inr(250));
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod settings;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Catalog, Product, ProductFilter, StaticCatalog};

    // Cart
    pub use crate::cart::{
        CartAction, CartLine, CartNotice, CartState, CartStore, CartTotals, PricingMode,
    };

    // Checkout
    pub use crate::checkout::{
        AddressBook, Checkout, CheckoutForm, CustomerDetails, DayType, DeliveryAddress,
        DeliverySelection, OrderBook, OrderReceipt, OrderStatus, OrderSubmitter, PlacedOrder,
        SlotResolution,
    };

    // Settings
    pub use crate::settings::{DeliverySlot, SettingsSource, StoreSettings};
}
