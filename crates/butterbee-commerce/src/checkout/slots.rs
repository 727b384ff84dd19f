//! Delivery slot availability.
//!
//! Resolution is a pure function of the wall clock, the chosen day and the
//! configured slots. It never fails: a slot that cannot be booked is returned
//! marked closed rather than dropped.

use crate::error::CommerceError;
use crate::settings::DeliverySlot;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Same-day slots close this many minutes before they start.
pub const SAME_DAY_CUTOFF_MINUTES: i64 = 120;

/// How far ahead an explicit delivery date may be booked.
pub const MAX_DAYS_AHEAD: i64 = 30;

/// Date format used for explicit dates and order summaries.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The delivery day a customer picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "date", rename_all = "snake_case")]
pub enum DayType {
    #[default]
    Today,
    Tomorrow,
    Date(NaiveDate),
}

impl DayType {
    /// Read an explicit `YYYY-MM-DD` date, falling back to today when the
    /// input cannot be parsed.
    pub fn explicit(raw: &str) -> Self {
        match parse_date(raw) {
            Ok(date) => DayType::Date(date),
            Err(_) => {
                tracing::debug!(input = raw, "unparsable delivery date, using today");
                DayType::Today
            }
        }
    }

    /// Calendar date this day type refers to.
    pub fn resolve_date(&self, today: NaiveDate) -> NaiveDate {
        match self {
            DayType::Today => today,
            DayType::Tomorrow => today.succ_opt().unwrap_or(today),
            DayType::Date(date) => *date,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayType::Today => "today",
            DayType::Tomorrow => "tomorrow",
            DayType::Date(_) => "date",
        }
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, CommerceError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| CommerceError::InvalidDate(raw.to_string()))
}

/// The range of dates that may be booked, inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeliveryWindow {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl DeliveryWindow {
    /// Window starting today.
    pub fn starting(today: NaiveDate) -> Self {
        let max = today
            .checked_add_signed(Duration::days(MAX_DAYS_AHEAD))
            .unwrap_or(today);
        Self { min: today, max }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min <= date && date <= self.max
    }

    /// Reject dates outside the window.
    pub fn check(&self, date: NaiveDate) -> Result<NaiveDate, CommerceError> {
        if self.contains(date) {
            Ok(date)
        } else {
            Err(CommerceError::DateOutOfRange {
                date: date.format(DATE_FORMAT).to_string(),
                min: self.min.format(DATE_FORMAT).to_string(),
                max: self.max.format(DATE_FORMAT).to_string(),
            })
        }
    }
}

/// A slot and whether it can be booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotAvailability {
    pub slot: DeliverySlot,
    pub open: bool,
}

/// Slots offered for one delivery date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotResolution {
    pub date: NaiveDate,
    pub day: DayType,
    pub slots: Vec<SlotAvailability>,
}

impl SlotResolution {
    /// Availability of a slot, if it is offered at all.
    pub fn get(&self, id: &str) -> Option<&SlotAvailability> {
        self.slots.iter().find(|s| s.slot.id.as_str() == id)
    }

    /// Whether a slot is offered and open.
    pub fn is_open(&self, id: &str) -> bool {
        self.get(id).map(|s| s.open).unwrap_or(false)
    }

    pub fn open_slots(&self) -> impl Iterator<Item = &DeliverySlot> {
        self.slots.iter().filter(|s| s.open).map(|s| &s.slot)
    }

    /// True when slots are offered but none can be booked.
    pub fn all_closed(&self) -> bool {
        !self.slots.is_empty() && self.slots.iter().all(|s| !s.open)
    }
}

/// Work out which active slots can be booked for `day`, as seen at `now`.
pub fn resolve(now: NaiveDateTime, day: &DayType, slots: &[DeliverySlot]) -> SlotResolution {
    let today = now.date();
    let date = day.resolve_date(today);
    let cutoff = Duration::minutes(SAME_DAY_CUTOFF_MINUTES);

    let slots: Vec<SlotAvailability> = slots
        .iter()
        .filter(|s| s.active)
        .map(|slot| {
            // A slot without a real start time is never bookable.
            let open = match slot.start_time() {
                Some(_) if date != today => true,
                Some(start) => date.and_time(start) - now > cutoff,
                None => false,
            };
            SlotAvailability {
                slot: slot.clone(),
                open,
            }
        })
        .collect();

    tracing::debug!(
        date = %date,
        day = day.as_str(),
        offered = slots.len(),
        open = slots.iter().filter(|s| s.open).count(),
        "resolved delivery slots"
    );

    SlotResolution {
        date,
        day: *day,
        slots,
    }
}
