//! Placing an order and handing it off to WhatsApp.

use butterbee_cache::KvStore;
use chrono::NaiveDateTime;
use serde::Serialize;
use url::Url;

use crate::cart::{CartStore, PricingMode};
use crate::catalog::Catalog;
use crate::checkout::form::CheckoutForm;
use crate::checkout::order::{OrderRequest, OrderSubmitter, PlacedOrder};
use crate::checkout::summary::render_summary;
use crate::error::CommerceError;
use crate::money::Money;
use crate::settings::SettingsSource;

/// Text used when a WhatsApp link is opened without an order.
pub const DEFAULT_WHATSAPP_TEXT: &str = "Hi ButterBee";

/// Shop-level knobs for placing orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    /// Name in the summary header.
    pub shop_name: String,
    /// Number the order is sent to on WhatsApp, if any.
    pub whatsapp_phone: Option<String>,
    /// Which prices the order is charged at.
    pub pricing: PricingMode,
}

impl Default for Checkout {
    fn default() -> Self {
        Self {
            shop_name: "ButterBee".to_string(),
            whatsapp_phone: None,
            pricing: PricingMode::default(),
        }
    }
}

/// What the customer gets back after a successful order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OrderReceipt {
    pub order: PlacedOrder,
    pub total: Money,
    pub item_count: i64,
    /// Summary as sent on WhatsApp, with the order number on top.
    pub message: String,
    pub whatsapp_url: Option<String>,
}

impl Checkout {
    /// Validate the form, submit the order and empty the cart.
    ///
    /// The cart is only cleared once the submitter accepted the order; on
    /// any error it is left exactly as it was.
    pub async fn place_order<S: KvStore>(
        &self,
        cart: &mut CartStore<S>,
        form: &CheckoutForm,
        settings: &dyn SettingsSource,
        catalog: &dyn Catalog,
        submitter: &dyn OrderSubmitter,
        now: NaiveDateTime,
    ) -> Result<OrderReceipt, CommerceError> {
        form.ensure_ready(cart.state())?;
        let address = form
            .address
            .as_ref()
            .ok_or_else(|| CommerceError::CheckoutIncomplete("delivery address".to_string()))?;
        let settings = settings.settings();
        address.validate_for(&settings)?;
        let delivery = form.delivery.confirm(now, &settings.active_slots())?;

        let totals = cart.totals(self.pricing, catalog)?;
        let summary = render_summary(&self.shop_name, &totals, &form.customer, address, &delivery);

        let order = match submitter.submit(OrderRequest::new(summary)).await {
            Ok(order) => order,
            Err(e) => {
                tracing::warn!(error = %e, "order submission failed, cart kept");
                return Err(match e {
                    CommerceError::InvalidOrder(_) | CommerceError::SubmissionFailed(_) => e,
                    other => CommerceError::SubmissionFailed(other.to_string()),
                });
            }
        };

        cart.clear();
        tracing::info!(
            order = %order.public_id,
            total = %totals.total,
            items = totals.count,
            date = %delivery.date,
            slot = %delivery.slot.id,
            "order placed"
        );

        let message = format!("Order #{}\n{}", order.public_id, order.summary);
        let whatsapp_url = self
            .whatsapp_phone
            .as_deref()
            .map(|phone| whatsapp_link(phone, &message))
            .transpose()?
            .map(String::from);

        Ok(OrderReceipt {
            order,
            total: totals.total,
            item_count: totals.count,
            message,
            whatsapp_url,
        })
    }
}

/// `https://wa.me/<phone>?text=<message>`, with the text URL-encoded.
///
/// Everything but digits is dropped from the phone number; empty text
/// becomes a greeting.
pub fn whatsapp_link(phone: &str, text: &str) -> Result<Url, CommerceError> {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(CommerceError::InvalidSettings(format!(
            "whatsapp phone {:?} has no digits",
            phone
        )));
    }
    let text = if text.trim().is_empty() {
        DEFAULT_WHATSAPP_TEXT
    } else {
        text
    };
    Url::parse_with_params(&format!("https://wa.me/{}", digits), &[("text", text)])
        .map_err(|e| CommerceError::InvalidSettings(e.to_string()))
}
