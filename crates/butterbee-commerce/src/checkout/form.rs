//! Checkout form state and the checks that gate submission.

use crate::cart::CartState;
use crate::checkout::address::DeliveryAddress;
use crate::checkout::selection::DeliverySelection;
use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Who the order is for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl CustomerDetails {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            phone: phone.into().trim().to_string(),
            email: None,
        }
    }

    /// Set the email; blank input clears it.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        let email = email.into().trim().to_string();
        self.email = (!email.is_empty()).then_some(email);
        self
    }
}

/// Something the customer still has to fill in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingField {
    Items,
    Name,
    Phone,
    Slot,
    Address,
}

impl MissingField {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissingField::Items => "cart items",
            MissingField::Name => "name",
            MissingField::Phone => "phone",
            MissingField::Slot => "delivery slot",
            MissingField::Address => "delivery address",
        }
    }
}

impl std::fmt::Display for MissingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the checkout page collects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    pub customer: CustomerDetails,
    pub address: Option<DeliveryAddress>,
    pub delivery: DeliverySelection,
}

impl CheckoutForm {
    pub fn new(customer: CustomerDetails) -> Self {
        Self {
            customer,
            ..Self::default()
        }
    }

    pub fn with_address(mut self, address: DeliveryAddress) -> Self {
        self.address = Some(address);
        self
    }

    /// What blocks submission, in form order.
    pub fn missing_fields(&self, cart: &CartState) -> Vec<MissingField> {
        let mut missing = Vec::new();
        if cart.is_empty() {
            missing.push(MissingField::Items);
        }
        if self.customer.name.trim().is_empty() {
            missing.push(MissingField::Name);
        }
        if self.customer.phone.trim().is_empty() {
            missing.push(MissingField::Phone);
        }
        if self.delivery.slot().is_none() {
            missing.push(MissingField::Slot);
        }
        if !self.address.as_ref().map(|a| a.is_complete()).unwrap_or(false) {
            missing.push(MissingField::Address);
        }
        missing
    }

    pub fn can_submit(&self, cart: &CartState) -> bool {
        self.missing_fields(cart).is_empty()
    }

    /// Fail with the list of missing fields, if any.
    pub fn ensure_ready(&self, cart: &CartState) -> Result<(), CommerceError> {
        let missing = self.missing_fields(cart);
        if missing.is_empty() {
            return Ok(());
        }
        Err(CommerceError::CheckoutIncomplete(
            missing
                .iter()
                .map(MissingField::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        ))
    }
}
