//! Delivery day and slot chosen on the checkout form.

use crate::checkout::slots::{resolve, DayType, DeliveryWindow, SlotResolution};
use crate::error::CommerceError;
use crate::ids::SlotId;
use crate::settings::DeliverySlot;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Form state for the delivery step. Lives only as long as the checkout page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeliverySelection {
    day: DayType,
    slot: Option<SlotId>,
}

/// A slot that was still open when the order was finalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmedDelivery {
    pub date: NaiveDate,
    pub slot: DeliverySlot,
}

impl DeliverySelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn day(&self) -> DayType {
        self.day
    }

    pub fn slot(&self) -> Option<&SlotId> {
        self.slot.as_ref()
    }

    /// Date the current day type points at.
    pub fn date(&self, today: NaiveDate) -> NaiveDate {
        self.day.resolve_date(today)
    }

    /// Switch the day. Any chosen slot is cleared, and explicit dates must
    /// fall inside the booking window.
    pub fn choose_day(&mut self, day: DayType, today: NaiveDate) -> Result<(), CommerceError> {
        if let DayType::Date(date) = day {
            DeliveryWindow::starting(today).check(date)?;
        }
        self.day = day;
        self.slot = None;
        Ok(())
    }

    /// Switch to the date picker, starting at today unless a date is
    /// already chosen.
    pub fn open_date_picker(&mut self, today: NaiveDate) {
        if !matches!(self.day, DayType::Date(_)) {
            self.day = DayType::Date(today);
            self.slot = None;
        }
    }

    /// Pick an explicit date from raw `YYYY-MM-DD` input.
    ///
    /// Unreadable input means today; dates outside the window are rejected
    /// and leave the selection unchanged.
    pub fn pick_date(&mut self, raw: &str, today: NaiveDate) -> Result<NaiveDate, CommerceError> {
        let day = match DayType::explicit(raw) {
            DayType::Date(date) => DayType::Date(date),
            _ => DayType::Date(today),
        };
        self.choose_day(day, today)?;
        Ok(self.date(today))
    }

    /// Available slots for the current day.
    pub fn resolve(&self, now: NaiveDateTime, slots: &[DeliverySlot]) -> SlotResolution {
        resolve(now, &self.day, slots)
    }

    /// Choose a slot from a resolution of the current day.
    pub fn choose_slot(
        &mut self,
        id: impl Into<SlotId>,
        resolution: &SlotResolution,
    ) -> Result<(), CommerceError> {
        let id = id.into();
        let availability = resolution
            .get(id.as_str())
            .ok_or_else(|| CommerceError::UnknownSlot(id.to_string()))?;
        if !availability.open {
            return Err(CommerceError::SlotClosed(availability.slot.label.clone()));
        }
        self.slot = Some(id);
        Ok(())
    }

    /// Re-check the choice against the clock at submission time.
    pub fn confirm(
        &self,
        now: NaiveDateTime,
        slots: &[DeliverySlot],
    ) -> Result<ConfirmedDelivery, CommerceError> {
        let id = self
            .slot
            .as_ref()
            .ok_or_else(|| CommerceError::CheckoutIncomplete("delivery slot".to_string()))?;
        if let DayType::Date(date) = self.day {
            DeliveryWindow::starting(now.date()).check(date)?;
        }
        let resolution = self.resolve(now, slots);
        let availability = resolution
            .get(id.as_str())
            .ok_or_else(|| CommerceError::UnknownSlot(id.to_string()))?;
        if !availability.open {
            return Err(CommerceError::SlotClosed(availability.slot.label.clone()));
        }
        Ok(ConfirmedDelivery {
            date: resolution.date,
            slot: availability.slot.clone(),
        })
    }
}
