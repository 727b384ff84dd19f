//! Plain-text order summary, as stored with the order and sent on WhatsApp.

use crate::cart::CartTotals;
use crate::checkout::address::DeliveryAddress;
use crate::checkout::form::CustomerDetails;
use crate::checkout::selection::ConfirmedDelivery;
use crate::checkout::slots::DATE_FORMAT;

/// Render the summary text.
pub fn render_summary(
    shop_name: &str,
    totals: &CartTotals,
    customer: &CustomerDetails,
    address: &DeliveryAddress,
    delivery: &ConfirmedDelivery,
) -> String {
    let mut lines = Vec::with_capacity(totals.lines.len() + 8);
    lines.push(format!("Order from {}", shop_name));
    for line in &totals.lines {
        lines.push(format!(
            "{} x {} = {}",
            line.name,
            line.quantity,
            line.total.display()
        ));
    }
    lines.push(format!("Total: {}", totals.total.display()));
    lines.push(format!("Name: {}", customer.name));
    lines.push(format!("Phone: {}", customer.phone));
    if let Some(ref email) = customer.email {
        lines.push(format!("Email: {}", email));
    }
    lines.push(format!("Address: {}", address.one_line()));
    lines.push(format!("Delivery Date: {}", delivery.date.format(DATE_FORMAT)));
    lines.push(format!("Slot: {}", delivery.slot.label));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{CartAction, CartState, PricingMode};
    use crate::catalog::{Product, StaticCatalog};
    use crate::checkout::slots::parse_date;
    use crate::money::Money;
    use crate::settings::DeliverySlot;

    #[test]
    fn test_summary_text() {
        let dosa = Product::new("dosa", "Dosa Batter", Money::inr(100));
        let coffee = Product::new("coffee", "Filter Coffee", Money::inr(50));
        let mut cart = CartState::default();
        cart.apply(CartAction::Add {
            product: dosa.clone(),
            delta: 2,
        });
        cart.apply(CartAction::add(coffee.clone()));
        let catalog = StaticCatalog::new(vec![dosa, coffee]).unwrap();
        let totals = cart.pricing(PricingMode::Snapshot, &catalog).unwrap();

        let delivery = ConfirmedDelivery {
            date: parse_date("2025-03-11").unwrap(),
            slot: DeliverySlot::new("8-10", "8\u{2013}10 AM", 8, 0),
        };
        let customer = CustomerDetails::new("Asha", "9845000000");
        let address = DeliveryAddress::new("12", "B", "Olympia Opaline");

        let text = render_summary("ButterBee", &totals, &customer, &address, &delivery);
        assert_eq!(
            text,
            "Order from ButterBee\n\
             Dosa Batter x 2 = \u{20b9}200\n\
             Filter Coffee x 1 = \u{20b9}50\n\
             Total: \u{20b9}250\n\
             Name: Asha\n\
             Phone: 9845000000\n\
             Address: Door 12, Tower B, Apt Olympia Opaline\n\
             Delivery Date: 2025-03-11\n\
             Slot: 8\u{2013}10 AM"
        );

        let with_email = render_summary(
            "ButterBee",
            &totals,
            &customer.clone().with_email("asha@example.in"),
            &address,
            &delivery,
        );
        assert!(with_email.contains("Phone: 9845000000\nEmail: asha@example.in\nAddress:"));
    }
}
