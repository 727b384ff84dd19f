//! Product records served by the catalog.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum product name length, in characters.
pub const MIN_NAME_LEN: usize = 2;
/// Maximum product name length, in characters.
pub const MAX_NAME_LEN: usize = 120;
/// Minimum description length for products created by the admin.
pub const MIN_DESCRIPTION_LEN: usize = 2;
/// Maximum description length, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Which part of the shop a product is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Department {
    #[default]
    Food,
    Clothes,
    Sports,
}

impl Department {
    pub const ALL: [Department; 3] = [Department::Food, Department::Clothes, Department::Sports];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Food => "FOOD",
            Department::Clothes => "CLOTHES",
            Department::Sports => "SPORTS",
        }
    }

    /// Read a department from loose user input ("foods", "Clothing", "sport").
    pub fn from_alias(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "food" | "foods" => Some(Department::Food),
            "clothes" | "clothing" => Some(Department::Clothes),
            "sports" | "sport" => Some(Department::Sports),
            _ => None,
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turn an admin-entered image reference into a servable path.
///
/// URLs (`http(s)://`, `data:`) and `/images/...` paths are kept; a bare file
/// name is placed under `/images/`. Runs of whitespace collapse to one space.
pub fn normalize_image(raw: &str) -> String {
    let image = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if image.is_empty() {
        return image;
    }
    let lower = image.to_lowercase();
    if lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("data:")
        || image.starts_with("/images/")
    {
        return image;
    }
    format!("/images/{}", image.trim_start_matches('/'))
}

/// A product in the catalog.
///
/// The cart stores a copy of this record when a product is first added, so
/// the price here is the one a shopper sees until the cart is repriced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Listing description.
    #[serde(default)]
    pub description: String,
    /// Unit price.
    pub price: Money,
    /// Menu category (e.g., "Breakfast", "Batters").
    #[serde(default)]
    pub category: String,
    /// Shop department.
    #[serde(default)]
    pub department: Department,
    /// Image path or URL, see [`normalize_image`].
    #[serde(default)]
    pub image: String,
    /// Whether the product can currently be ordered.
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl Product {
    /// Create an available product.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            category: String::new(),
            department: Department::default(),
            image: String::new(),
            available: true,
        }
    }

    /// Set the menu category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the department.
    pub fn with_department(mut self, department: Department) -> Self {
        self.department = department;
        self
    }

    /// Set the image, normalizing bare file names.
    pub fn with_image(mut self, image: &str) -> Self {
        self.image = normalize_image(image);
        self
    }

    /// Mark the product as not orderable.
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// Check a product record before it enters the catalog.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.id.as_str().trim().is_empty() {
            return Err(CommerceError::InvalidProduct("empty id".to_string()));
        }
        let name_len = self.name.trim().chars().count();
        if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&name_len) {
            return Err(CommerceError::InvalidProduct(format!(
                "{}: name must be {}-{} characters",
                self.id, MIN_NAME_LEN, MAX_NAME_LEN
            )));
        }
        if self.description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(CommerceError::InvalidProduct(format!(
                "{}: description longer than {} characters",
                self.id, MAX_DESCRIPTION_LEN
            )));
        }
        if self.price.is_negative() {
            return Err(CommerceError::InvalidProduct(format!(
                "{}: negative price",
                self.id
            )));
        }
        Ok(())
    }

    /// Case-insensitive match of `needle` against name, description and category.
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [&self.name, &self.description, &self.category]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}
