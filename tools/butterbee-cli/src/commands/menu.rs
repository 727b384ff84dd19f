//! Menu listing.

use anyhow::Result;
use butterbee_commerce::catalog::{Department, ProductFilter};

use super::MenuArgs;
use crate::context::Context;

/// Run the menu command.
pub async fn run(args: MenuArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    // Unknown departments list everything, like an absent filter.
    let department = args.dept.as_deref().and_then(|raw| {
        let department = Department::from_alias(raw);
        if department.is_none() {
            ctx.output
                .warn(&format!("Unknown department {:?}, showing all", raw));
        }
        department
    });
    let filter = ProductFilter {
        available: (!args.all).then_some(true),
        category: args.category,
        department,
        query: args.query,
    };
    let products = filter.apply(&catalog);

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header(&format!("{} menu", ctx.config.shop.name));

    if products.is_empty() {
        ctx.output.info("No products match.");
        return Ok(());
    }

    let widths = [16, 28, 10, 14, 8, 12];
    ctx.output
        .table_row(&["ID", "NAME", "PRICE", "CATEGORY", "DEPT", ""], &widths);
    for product in &products {
        let price = product.price.display();
        let status = if product.available { "" } else { "unavailable" };
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &product.name,
                &price,
                &product.category,
                product.department.as_str(),
                status,
            ],
            &widths,
        );
    }

    Ok(())
}
