//! Placed orders.

use anyhow::Result;

use super::OrdersArgs;
use crate::context::Context;
use crate::output::status_badge;

/// Run the orders command.
pub async fn run(args: OrdersArgs, ctx: &Context) -> Result<()> {
    let mut orders = ctx.order_book()?.list()?;
    if let Some(limit) = args.limit {
        orders.truncate(limit);
    }

    if ctx.output.is_json() {
        ctx.output.json(&orders);
        return Ok(());
    }

    ctx.output.header("Orders");

    if orders.is_empty() {
        ctx.output.info("No orders yet.");
        ctx.output.info("Run `butterbee checkout` to place one.");
        return Ok(());
    }

    let widths = [18, 20, 10];
    ctx.output.table_row(&["ORDER", "PLACED", "STATUS"], &widths);
    for order in &orders {
        let placed = order
            .created_at
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M")
            .to_string();
        let status = status_badge(order.status);
        ctx.output
            .table_row(&[order.public_id.as_str(), &placed, &status], &widths);
        if args.full {
            ctx.output.block(&order.summary);
            ctx.output.info("");
        }
    }

    ctx.output.info("");
    ctx.output.info(&format!("Showing {} order(s)", orders.len()));

    Ok(())
}
