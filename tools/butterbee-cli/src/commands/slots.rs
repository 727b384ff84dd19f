//! Delivery slot availability.

use anyhow::Result;
use butterbee_commerce::checkout::{DayType, DeliverySelection, DATE_FORMAT};
use chrono::NaiveDate;

use super::{DayArg, SlotsArgs};
use crate::context::Context;
use crate::output::slot_badge;

/// Run the slots command.
pub async fn run(args: SlotsArgs, ctx: &Context) -> Result<()> {
    let now = ctx.now();
    let selection = selection_for(args.day, args.date.as_deref(), now.date())?;
    let settings = ctx.settings();
    let resolution = selection.resolve(now, &settings.active_slots());

    if ctx.output.is_json() {
        ctx.output.json(&resolution);
        return Ok(());
    }

    ctx.output.header(&format!(
        "Delivery slots for {}",
        resolution.date.format(DATE_FORMAT)
    ));

    if resolution.slots.is_empty() {
        ctx.output.warn("No delivery slots are configured");
        return Ok(());
    }

    let widths = [8, 12, 6, 6];
    ctx.output.table_row(&["ID", "LABEL", "START", ""], &widths);
    for availability in &resolution.slots {
        let start = format!(
            "{:02}:{:02}",
            availability.slot.start_hour, availability.slot.start_minute
        );
        let badge = slot_badge(availability.open);
        ctx.output.table_row(
            &[
                availability.slot.id.as_str(),
                &availability.slot.label,
                &start,
                &badge,
            ],
            &widths,
        );
    }

    if resolution.all_closed() {
        ctx.output.info("");
        ctx.output
            .warn("Today's slots close 2 hours before they start. Try --day tomorrow.");
    }

    Ok(())
}

/// Build the delivery selection for a day argument.
///
/// `--day date` without `--date` starts at today, like the date picker.
pub fn selection_for(day: DayArg, date: Option<&str>, today: NaiveDate) -> Result<DeliverySelection> {
    let mut selection = DeliverySelection::new();
    match (day, date) {
        (DayArg::Today, _) => {}
        (DayArg::Tomorrow, _) => selection.choose_day(DayType::Tomorrow, today)?,
        (DayArg::Date, Some(raw)) => {
            selection.pick_date(raw, today)?;
        }
        (DayArg::Date, None) => selection.open_date_picker(today),
    }
    Ok(selection)
}
