//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product exists but is not currently orderable.
    #[error("Product unavailable: {0}")]
    ProductUnavailable(String),

    /// Quantity input that cannot be read as an integer.
    #[error("Invalid quantity: {0:?}")]
    InvalidQuantity(String),

    /// Invalid product record.
    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Date string that is not `YYYY-MM-DD`.
    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    /// Explicit delivery date outside the bookable window.
    #[error("Delivery date {date} is outside {min}..={max}")]
    DateOutOfRange {
        date: String,
        min: String,
        max: String,
    },

    /// Slot id not offered for the chosen day.
    #[error("Unknown delivery slot: {0}")]
    UnknownSlot(String),

    /// Slot starts too soon to be booked.
    #[error("Delivery slot closed: {0}")]
    SlotClosed(String),

    /// Invalid delivery address.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Saved address not found.
    #[error("Address not found: {0}")]
    AddressNotFound(String),

    /// Invalid storefront settings.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// Checkout incomplete.
    #[error("Checkout incomplete: missing {0}")]
    CheckoutIncomplete(String),

    /// Order payload rejected by the order book.
    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    /// Could not allocate a unique public order id.
    #[error("Could not allocate a unique order id after {0} attempts")]
    OrderIdExhausted(u32),

    /// Order submission failed; the cart is left intact.
    #[error("Order submission failed: {0}")]
    SubmissionFailed(String),

    /// Cache error.
    #[error("Cache error: {0}")]
    CacheError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CommerceError {
    /// Whether the shopper can simply try the same operation again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CommerceError::SubmissionFailed(_)
                | CommerceError::OrderIdExhausted(_)
                | CommerceError::CacheError(_)
        )
    }
}

impl From<butterbee_cache::CacheError> for CommerceError {
    fn from(e: butterbee_cache::CacheError) -> Self {
        CommerceError::CacheError(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
