//! Delivery addresses inside the served apartment complexes.

use crate::error::CommerceError;
use crate::ids::AddressId;
use crate::settings::StoreSettings;
use serde::{Deserialize, Serialize};

/// Storage key prefix for saved address books.
pub const ADDRESS_KEY_PREFIX: &str = "butterbee.addresses";

/// Maximum length of each address field, in characters.
pub const MAX_FIELD_LEN: usize = 100;

/// Door, tower and apartment complex.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DeliveryAddress {
    pub door: String,
    pub tower: String,
    pub apartment: String,
}

impl DeliveryAddress {
    /// Build an address from raw form input, trimming every field.
    pub fn new(
        door: impl AsRef<str>,
        tower: impl AsRef<str>,
        apartment: impl AsRef<str>,
    ) -> Self {
        Self {
            door: door.as_ref().trim().to_string(),
            tower: tower.as_ref().trim().to_string(),
            apartment: apartment.as_ref().trim().to_string(),
        }
    }

    /// Check that every field is present and short enough.
    pub fn validate(&self) -> Result<(), CommerceError> {
        for (field, value) in [
            ("door", &self.door),
            ("tower", &self.tower),
            ("apartment", &self.apartment),
        ] {
            let value = value.trim();
            if value.is_empty() {
                return Err(CommerceError::InvalidAddress(format!("{} is required", field)));
            }
            if value.chars().count() > MAX_FIELD_LEN {
                return Err(CommerceError::InvalidAddress(format!(
                    "{} is longer than {} characters",
                    field, MAX_FIELD_LEN
                )));
            }
        }
        Ok(())
    }

    /// Validate, and also require the apartment to be one the shop serves.
    pub fn validate_for(&self, settings: &StoreSettings) -> Result<(), CommerceError> {
        self.validate()?;
        if !settings.has_apartment(&self.apartment) {
            return Err(CommerceError::InvalidAddress(format!(
                "we do not deliver to {}",
                self.apartment
            )));
        }
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }

    /// "Door 12, Tower B, Apt Olympia Opaline", skipping empty parts.
    pub fn one_line(&self) -> String {
        [
            ("Door", &self.door),
            ("Tower", &self.tower),
            ("Apt", &self.apartment),
        ]
        .iter()
        .filter(|(_, v)| !v.trim().is_empty())
        .map(|(label, v)| format!("{} {}", label, v.trim()))
        .collect::<Vec<_>>()
        .join(", ")
    }
}

impl std::fmt::Display for DeliveryAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.one_line())
    }
}

/// An address kept in a customer's address book.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SavedAddress {
    pub id: AddressId,
    #[serde(flatten)]
    pub address: DeliveryAddress,
    #[serde(default)]
    pub is_default: bool,
    /// Bumped on every change; larger is more recent.
    #[serde(default)]
    pub revision: u64,
}

/// Saved addresses with at most one default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AddressBook {
    #[serde(default)]
    addresses: Vec<SavedAddress>,
    #[serde(default)]
    revision: u64,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save a validated address. Saving as default demotes the previous one.
    pub fn add(
        &mut self,
        address: DeliveryAddress,
        is_default: bool,
    ) -> Result<AddressId, CommerceError> {
        address.validate()?;
        if is_default {
            self.clear_default();
        }
        let id = AddressId::generate();
        let revision = self.bump();
        self.addresses.push(SavedAddress {
            id: id.clone(),
            address,
            is_default,
            revision,
        });
        Ok(id)
    }

    /// Make an existing address the default.
    pub fn make_default(&mut self, id: &AddressId) -> Result<(), CommerceError> {
        if self.get(id).is_none() {
            return Err(CommerceError::AddressNotFound(id.to_string()));
        }
        self.clear_default();
        let revision = self.bump();
        if let Some(saved) = self.addresses.iter_mut().find(|a| &a.id == id) {
            saved.is_default = true;
            saved.revision = revision;
        }
        Ok(())
    }

    /// Delete an address.
    pub fn remove(&mut self, id: &AddressId) -> Result<SavedAddress, CommerceError> {
        let index = self
            .addresses
            .iter()
            .position(|a| &a.id == id)
            .ok_or_else(|| CommerceError::AddressNotFound(id.to_string()))?;
        Ok(self.addresses.remove(index))
    }

    pub fn get(&self, id: &AddressId) -> Option<&SavedAddress> {
        self.addresses.iter().find(|a| &a.id == id)
    }

    /// The address to pre-fill checkout with: the default, else the first listed.
    pub fn default_address(&self) -> Option<&SavedAddress> {
        self.addresses
            .iter()
            .find(|a| a.is_default)
            .or_else(|| self.list().into_iter().next())
    }

    /// Default first, then most recently changed.
    pub fn list(&self) -> Vec<&SavedAddress> {
        let mut list: Vec<&SavedAddress> = self.addresses.iter().collect();
        list.sort_by(|a, b| {
            b.is_default
                .cmp(&a.is_default)
                .then(b.revision.cmp(&a.revision))
        });
        list
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    fn clear_default(&mut self) {
        for saved in &mut self.addresses {
            saved.is_default = false;
        }
    }

    fn bump(&mut self) -> u64 {
        self.revision += 1;
        self.revision
    }
}
