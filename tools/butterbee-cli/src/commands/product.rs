//! Menu product administration.

use anyhow::{anyhow, Result};
use butterbee_commerce::catalog::{Department, Product, ProductDraft, ProductPatch};
use butterbee_commerce::ProductId;
use dialoguer::Confirm;

use super::{ProductArgs, ProductCommand};
use crate::context::Context;

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let mut catalog = ctx.catalog()?;

    match args.command {
        ProductCommand::Add {
            id,
            name,
            description,
            price,
            image,
            category,
            dept,
            unavailable,
        } => {
            let draft = ProductDraft {
                id: id.map(ProductId::new),
                name,
                description,
                price,
                image,
                category,
                department: parse_department(&dept)?,
                available: !unavailable,
            };
            let product = catalog.create(draft, ctx.config.currency()?)?;
            ctx.save_catalog(&catalog)?;
            report("Added", &product, ctx);
        }
        ProductCommand::Edit {
            id,
            name,
            description,
            price,
            image,
            category,
            dept,
            available,
        } => {
            let patch = ProductPatch {
                name,
                description,
                price,
                image,
                category,
                department: dept.as_deref().map(parse_department).transpose()?,
                available,
            };
            let product = catalog.update(&ProductId::new(id), &patch)?;
            ctx.save_catalog(&catalog)?;
            report("Updated", &product, ctx);
        }
        ProductCommand::Remove { id, yes } => {
            let id = ProductId::new(id);
            if !yes && !ctx.output.is_json() {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete {} from the menu?", id))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    ctx.output.warn("Menu left as it was");
                    return Ok(());
                }
            }
            let product = catalog.remove(&id)?;
            ctx.save_catalog(&catalog)?;
            report("Removed", &product, ctx);
        }
    }

    Ok(())
}

/// Department from admin input. Unlike the menu filter, unknown names are an error.
fn parse_department(raw: &str) -> Result<Department> {
    Department::from_alias(raw)
        .ok_or_else(|| anyhow!("Unknown department {:?} (food, clothes or sports)", raw))
}

fn report(action: &str, product: &Product, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(product);
        return;
    }
    ctx.output
        .success(&format!("{} {} ({})", action, product.name, product.id));
    ctx.output.kv("price", &product.price.display());
    ctx.output.kv("department", product.department.as_str());
    if !product.image.is_empty() {
        ctx.output.kv("image", &product.image);
    }
}
