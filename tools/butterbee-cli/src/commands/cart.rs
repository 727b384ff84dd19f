//! Cart commands.

use anyhow::{Context as _, Result};
use butterbee_cache::KvStore;
use butterbee_commerce::cart::{CartNotice, CartStore};
use butterbee_commerce::catalog::Catalog;
use butterbee_commerce::ProductId;
use dialoguer::Confirm;

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.cart()?;

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => show_cart(&cart, ctx),
        CartCommand::Add { product, qty } => {
            let catalog = ctx.catalog()?;
            let product = catalog.orderable(&ProductId::new(product))?;
            let notice = cart
                .add_input(product, &qty)
                .with_context(|| format!("Could not add {:?}", qty))?;
            report(notice, &cart, ctx);
            Ok(())
        }
        CartCommand::Remove { product } => {
            let notice = cart.remove(&ProductId::new(product));
            report(notice, &cart, ctx);
            Ok(())
        }
        CartCommand::SetQty { product, qty } => {
            let id = ProductId::new(product);
            if !cart.state().contains(&id) {
                ctx.output.warn(&format!("{} is not in the cart", id));
            }
            let notice = cart.set_quantity_input(&id, &qty)?;
            report(notice, &cart, ctx);
            Ok(())
        }
        CartCommand::Clear { yes } => {
            if cart.state().is_empty() {
                ctx.output.info("Cart is already empty");
                return Ok(());
            }
            if !yes && !ctx.output.is_json() {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Remove all {} items from the cart?", cart.count()))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    ctx.output.warn("Cart left as it was");
                    return Ok(());
                }
            }
            let notice = cart.clear();
            report(notice, &cart, ctx);
            Ok(())
        }
        CartCommand::Reprice => {
            let catalog = ctx.catalog()?;
            let changes = cart.reprice(&catalog);
            if ctx.output.is_json() {
                ctx.output.json(&changes);
                return Ok(());
            }
            if changes.is_empty() {
                ctx.output.info("All prices are current");
            }
            for change in &changes {
                ctx.output.success(&format!(
                    "{}: {} -> {}",
                    change.product_id,
                    change.old_price.display(),
                    change.new_price.display()
                ));
            }
            Ok(())
        }
    }
}

fn report<S: KvStore>(notice: Option<CartNotice>, cart: &CartStore<S>, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "notice": notice,
            "count": cart.count(),
        }));
        return;
    }
    match notice {
        Some(notice) => ctx.output.success(notice.message()),
        None => ctx.output.info("Nothing changed"),
    }
    ctx.output.debug(&format!("{} item(s) in cart", cart.count()));
}

fn show_cart<S: KvStore>(cart: &CartStore<S>, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let mode = ctx.config.cart.pricing;
    let totals = cart.totals(mode, &catalog)?;

    if ctx.output.is_json() {
        ctx.output.json(&totals);
        return Ok(());
    }

    ctx.output.header("Your cart");
    if totals.lines.is_empty() {
        ctx.output.info("Your cart is empty. Run `butterbee menu` to browse.");
        return Ok(());
    }

    let widths = [16, 28, 6, 10, 10];
    ctx.output
        .table_row(&["ID", "NAME", "QTY", "PRICE", "TOTAL"], &widths);
    for line in &totals.lines {
        let qty = line.quantity.to_string();
        let price = line.unit_price.display();
        let total = line.total.display();
        ctx.output.table_row(
            &[line.product_id.as_str(), &line.name, &qty, &price, &total],
            &widths,
        );
    }
    ctx.output.info("");
    ctx.output.kv("Items", &totals.count.to_string());
    ctx.output.kv("Total", &totals.total.display());
    ctx.output.kv("Pricing", mode.as_str());

    Ok(())
}
