//! Checkout: pick a slot, review and place the order.

use anyhow::{bail, Context as _, Result};
use butterbee_commerce::checkout::{
    render_summary, CheckoutForm, CustomerDetails, DeliveryAddress, DATE_FORMAT,
};
use dialoguer::Confirm;

use super::slots::selection_for;
use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let now = ctx.now();
    let settings = ctx.settings();
    let catalog = ctx.catalog()?;
    let checkout = ctx.checkout();
    let mut cart = ctx.cart()?;

    if cart.state().is_empty() {
        bail!("Your cart is empty. Add items with `butterbee cart add <id>`.");
    }

    let mut book = ctx.address_book()?;
    let address = match (&args.door, &args.tower, &args.apartment) {
        (None, None, None) => match book.default_address() {
            Some(saved) => {
                ctx.output
                    .debug(&format!("Using saved address {}", saved.id));
                saved.address.clone()
            }
            None => bail!("No saved address. Pass --door, --tower and --apartment."),
        },
        (door, tower, apartment) => DeliveryAddress::new(
            door.as_deref().unwrap_or_default(),
            tower.as_deref().unwrap_or_default(),
            apartment.as_deref().unwrap_or_default(),
        ),
    };

    let mut customer = CustomerDetails::new(&args.name, &args.phone);
    if let Some(ref email) = args.email {
        customer = customer.with_email(email);
    }
    let mut form = CheckoutForm::new(customer).with_address(address.clone());
    form.delivery = selection_for(args.day, args.date.as_deref(), now.date())?;

    let resolution = form.delivery.resolve(now, &settings.active_slots());
    form.delivery
        .choose_slot(args.slot.as_str(), &resolution)
        .with_context(|| {
            let open: Vec<&str> = resolution.open_slots().map(|s| s.id.as_str()).collect();
            if open.is_empty() {
                "No slots are open for that day".to_string()
            } else {
                format!("Open slots: {}", open.join(", "))
            }
        })?;

    let missing = form.missing_fields(cart.state());
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|m| m.as_str()).collect();
        bail!("Fill required fields: {}", names.join(", "));
    }
    address.validate_for(&settings)?;

    if !args.yes && !ctx.output.is_json() {
        let delivery = form.delivery.confirm(now, &settings.active_slots())?;
        let totals = cart.totals(checkout.pricing, &catalog)?;
        ctx.output.header("Review your order");
        ctx.output.block(&render_summary(
            &checkout.shop_name,
            &totals,
            &form.customer,
            &address,
            &delivery,
        ));
        ctx.output.info("");

        let confirmed = Confirm::new()
            .with_prompt("Place this order?")
            .default(true)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Order not placed, your cart is unchanged");
            return Ok(());
        }
    }

    let order_book = ctx.order_book()?;
    let spinner = ctx.output.spinner("Placing order...");
    let result = checkout
        .place_order(&mut cart, &form, &settings, &catalog, &order_book, now)
        .await;
    spinner.finish_and_clear();

    let receipt = match result {
        Ok(receipt) => receipt,
        Err(e) if e.is_retryable() => {
            return Err(e).context("Could not create order. Your cart is saved, please try again")
        }
        Err(e) => return Err(e.into()),
    };

    if args.save_address {
        book.add(address, true)?;
        ctx.save_address_book(&book)?;
        ctx.output.debug("Saved address as default");
    }

    if ctx.output.is_json() {
        ctx.output.json(&receipt);
        return Ok(());
    }

    ctx.output.success(&format!(
        "Order #{} placed for {}",
        receipt.order.public_id,
        receipt.total.display()
    ));
    ctx.output.kv("Status", receipt.order.status.as_str());
    ctx.output.kv(
        "Delivery",
        &form.delivery.date(now.date()).format(DATE_FORMAT).to_string(),
    );
    match receipt.whatsapp_url {
        Some(ref url) => {
            ctx.output.info("");
            ctx.output.info("Send it to us on WhatsApp:");
            ctx.output.list_item(url);
        }
        None => ctx
            .output
            .debug("No whatsapp_phone configured, skipping WhatsApp link"),
    }

    Ok(())
}
