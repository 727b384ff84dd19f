//! Storefront settings: apartment options and delivery slots.

use crate::error::CommerceError;
use crate::ids::SlotId;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Apartments offered when none are configured.
pub const DEFAULT_APARTMENTS: &[&str] = &["Olympia Opaline", "Test"];

/// A delivery window customers can book.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeliverySlot {
    /// Stable slot identifier (e.g., "6-8").
    pub id: SlotId,
    /// Display label (e.g., "6–8 AM").
    pub label: String,
    /// Hour the window starts, 0-23.
    pub start_hour: u32,
    /// Minute the window starts, 0-59.
    #[serde(default)]
    pub start_minute: u32,
    /// Whether the slot is offered at all.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl DeliverySlot {
    /// Create an active slot.
    pub fn new(id: impl Into<SlotId>, label: impl Into<String>, start_hour: u32, start_minute: u32) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            start_hour,
            start_minute,
            active: true,
        }
    }

    /// Mark the slot as switched off.
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Wall-clock start, if hour and minute are in range.
    pub fn start_time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.start_hour, self.start_minute, 0)
    }

    fn validate(&self) -> Result<(), CommerceError> {
        if self.id.as_str().trim().is_empty() {
            return Err(CommerceError::InvalidSettings("slot with empty id".to_string()));
        }
        if self.label.trim().is_empty() {
            return Err(CommerceError::InvalidSettings(format!("slot {}: empty label", self.id)));
        }
        if self.start_time().is_none() {
            return Err(CommerceError::InvalidSettings(format!(
                "slot {}: start {}:{:02} is not a valid time",
                self.id, self.start_hour, self.start_minute
            )));
        }
        Ok(())
    }
}

/// The built-in slot list.
pub fn default_slots() -> Vec<DeliverySlot> {
    vec![
        DeliverySlot::new("6-8", "6\u{2013}8 AM", 6, 0),
        DeliverySlot::new("8-10", "8\u{2013}10 AM", 8, 0),
        DeliverySlot::new("17-19", "5\u{2013}7 PM", 17, 0),
    ]
}

/// Apartment options and delivery slots, as managed by the shop admin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreSettings {
    #[serde(default)]
    pub apartments: Vec<String>,
    #[serde(default)]
    pub slots: Vec<DeliverySlot>,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            apartments: DEFAULT_APARTMENTS.iter().map(|a| a.to_string()).collect(),
            slots: default_slots(),
        }
    }
}

impl StoreSettings {
    /// Fill empty lists with the defaults and tidy apartment names.
    pub fn normalized(mut self) -> Self {
        self.apartments = self
            .apartments
            .iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();
        if self.apartments.is_empty() {
            self.apartments = StoreSettings::default().apartments;
        }
        if self.slots.is_empty() {
            self.slots = default_slots();
        }
        self
    }

    /// Settings safe to serve: normalized, with the default slot list standing
    /// in for slot definitions that fail [`StoreSettings::validate`].
    pub fn effective(self) -> Self {
        let mut settings = self.normalized();
        if let Err(e) = settings.validate() {
            tracing::warn!(error = %e, "invalid delivery slots, using the defaults");
            settings.slots = default_slots();
        }
        settings
    }

    /// Check slot definitions.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let mut seen = HashSet::new();
        for slot in &self.slots {
            slot.validate()?;
            if !seen.insert(slot.id.as_str()) {
                return Err(CommerceError::InvalidSettings(format!("duplicate slot id {}", slot.id)));
            }
        }
        Ok(())
    }

    /// Slots that are switched on, in configured order.
    pub fn active_slots(&self) -> Vec<DeliverySlot> {
        self.slots.iter().filter(|s| s.active).cloned().collect()
    }

    /// Look up a slot by id.
    pub fn slot(&self, id: &SlotId) -> Option<&DeliverySlot> {
        self.slots.iter().find(|s| &s.id == id)
    }

    /// Whether `name` is one of the apartment options.
    pub fn has_apartment(&self, name: &str) -> bool {
        let name = name.trim();
        self.apartments.iter().any(|a| a == name)
    }
}

/// Parse the admin's comma-separated apartment field.
pub fn apartments_from_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Supplies the settings checkout runs against.
///
/// Implementations return settings that already passed validation.
pub trait SettingsSource {
    fn settings(&self) -> StoreSettings;
}

impl SettingsSource for StoreSettings {
    fn settings(&self) -> StoreSettings {
        self.clone().effective()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = StoreSettings::default();
        assert_eq!(settings.apartments, vec!["Olympia Opaline", "Test"]);
        let ids: Vec<&str> = settings.slots.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["6-8", "8-10", "17-19"]);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_normalized_fills_empty_lists() {
        let settings = StoreSettings {
            apartments: vec!["  ".into()],
            slots: vec![],
        }
        .normalized();
        assert_eq!(settings, StoreSettings::default());
    }

    #[test]
    fn test_validate_rejects_bad_slots() {
        let mut settings = StoreSettings::default();
        settings.slots.push(DeliverySlot::new("late", "Late", 24, 0));
        assert!(settings.validate().is_err());

        let mut settings = StoreSettings::default();
        settings.slots.push(DeliverySlot::new("6-8", "Again", 6, 0));
        assert!(matches!(settings.validate(), Err(CommerceError::InvalidSettings(_))));

        let mut settings = StoreSettings::default();
        settings.slots.push(DeliverySlot::new("x", " ", 6, 0));
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_effective_falls_back_to_default_slots() {
        let settings = StoreSettings {
            apartments: vec!["Tower Gardens".into()],
            slots: vec![
                DeliverySlot::new("late", "Late", 25, 0),
                DeliverySlot::new("8-10", "8-10 AM", 8, 0),
            ],
        };
        let effective = settings.settings();
        assert_eq!(effective.slots, default_slots());
        assert_eq!(effective.apartments, vec!["Tower Gardens"]);
        assert!(effective.slot(&SlotId::new("late")).is_none());
    }

    #[test]
    fn test_effective_keeps_valid_slots() {
        let settings = StoreSettings {
            apartments: vec![],
            slots: vec![DeliverySlot::new("7-9", "7-9 AM", 7, 0)],
        };
        let effective = settings.clone().effective();
        assert_eq!(effective.slots, settings.slots);
    }

    #[test]
    fn test_active_slots() {
        let mut settings = StoreSettings::default();
        settings.slots[1] = settings.slots[1].clone().inactive();
        let active: Vec<String> = settings
            .active_slots()
            .into_iter()
            .map(|s| s.id.into_inner())
            .collect();
        assert_eq!(active, vec!["6-8", "17-19"]);
    }

    #[test]
    fn test_apartments_from_csv() {
        assert_eq!(
            apartments_from_csv(" Olympia Opaline, ,Test ,"),
            vec!["Olympia Opaline", "Test"]
        );
        assert!(apartments_from_csv("").is_empty());
    }

    #[test]
    fn test_slot_deserialize_defaults() {
        let slot: DeliverySlot =
            serde_json::from_str(r#"{"id":"6-8","label":"6-8 AM","start_hour":6}"#).unwrap();
        assert!(slot.active);
        assert_eq!(slot.start_minute, 0);
        assert_eq!(slot.start_time(), NaiveTime::from_hms_opt(6, 0, 0));
    }

    #[test]
    fn test_has_apartment() {
        let settings = StoreSettings::default();
        assert!(settings.has_apartment(" Test "));
        assert!(!settings.has_apartment("Elsewhere"));
    }
}
