//! Checkout module.
//!
//! Delivery slot resolution, the checkout form, addresses, order summary and
//! submission.

mod address;
mod form;
mod order;
mod place;
mod selection;
mod slots;
mod summary;

pub use address::{AddressBook, DeliveryAddress, SavedAddress, ADDRESS_KEY_PREFIX, MAX_FIELD_LEN};
pub use form::{CheckoutForm, CustomerDetails, MissingField};
pub use order::{
    make_public_id, OrderBook, OrderRequest, OrderStatus, OrderSubmitter, PlacedOrder,
    MIN_SUMMARY_LEN, ORDER_KEY_PREFIX, PUBLIC_ID_ALPHABET, PUBLIC_ID_ATTEMPTS,
};
pub use place::{whatsapp_link, Checkout, OrderReceipt, DEFAULT_WHATSAPP_TEXT};
pub use selection::{ConfirmedDelivery, DeliverySelection};
pub use slots::{
    parse_date, resolve, DayType, DeliveryWindow, SlotAvailability, SlotResolution, DATE_FORMAT,
    MAX_DAYS_AHEAD, SAME_DAY_CUTOFF_MINUTES,
};
pub use summary::render_summary;
