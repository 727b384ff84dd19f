//! Saved delivery addresses.

use anyhow::Result;
use butterbee_commerce::checkout::DeliveryAddress;
use butterbee_commerce::AddressId;

use super::{AddressArgs, AddressCommand};
use crate::context::Context;

/// Run the address command.
pub async fn run(args: AddressArgs, ctx: &Context) -> Result<()> {
    let mut book = ctx.address_book()?;

    match args.command.unwrap_or(AddressCommand::List) {
        AddressCommand::List => {
            if ctx.output.is_json() {
                ctx.output.json(&book.list());
                return Ok(());
            }
            ctx.output.header("Saved addresses");
            if book.is_empty() {
                ctx.output.info("No saved addresses.");
                return Ok(());
            }
            for saved in book.list() {
                let marker = if saved.is_default { " (default)" } else { "" };
                ctx.output
                    .list_item(&format!("{}  {}{}", saved.id, saved.address, marker));
            }
        }
        AddressCommand::Add {
            door,
            tower,
            apartment,
            default,
        } => {
            let address = DeliveryAddress::new(door, tower, apartment);
            address.validate_for(&ctx.settings())?;
            let is_default = default || book.is_empty();
            let id = book.add(address, is_default)?;
            ctx.save_address_book(&book)?;
            ctx.output.success(&format!("Saved address {}", id));
        }
        AddressCommand::Default { id } => {
            let id = AddressId::new(id);
            book.make_default(&id)?;
            ctx.save_address_book(&book)?;
            ctx.output.success(&format!("{} is now the default address", id));
        }
        AddressCommand::Remove { id } => {
            let removed = book.remove(&AddressId::new(id))?;
            ctx.save_address_book(&book)?;
            ctx.output
                .success(&format!("Removed {}", removed.address.one_line()));
        }
    }

    Ok(())
}
