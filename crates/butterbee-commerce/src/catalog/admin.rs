//! Admin product edits: create, update and delete.

use serde::{Deserialize, Serialize};

use crate::catalog::product::{
    normalize_image, Department, Product, MAX_DESCRIPTION_LEN, MAX_NAME_LEN, MIN_DESCRIPTION_LEN,
    MIN_NAME_LEN,
};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// A new product as entered by the admin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductDraft {
    /// Slug to use; a fresh id is generated when absent.
    #[serde(default)]
    pub id: Option<ProductId>,
    pub name: String,
    pub description: String,
    /// Whole currency units.
    pub price: i64,
    pub image: String,
    pub category: String,
    #[serde(default)]
    pub department: Department,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

/// Partial update of an existing product. `None` fields are left alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub department: Option<Department>,
    pub available: Option<bool>,
}

fn check_name(name: &str) -> Result<(), CommerceError> {
    let len = name.trim().chars().count();
    if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) {
        return Err(CommerceError::InvalidProduct(format!(
            "name must be {}-{} characters",
            MIN_NAME_LEN, MAX_NAME_LEN
        )));
    }
    Ok(())
}

fn check_description(description: &str) -> Result<(), CommerceError> {
    let len = description.trim().chars().count();
    if !(MIN_DESCRIPTION_LEN..=MAX_DESCRIPTION_LEN).contains(&len) {
        return Err(CommerceError::InvalidProduct(format!(
            "description must be {}-{} characters",
            MIN_DESCRIPTION_LEN, MAX_DESCRIPTION_LEN
        )));
    }
    Ok(())
}

fn check_price(price: i64) -> Result<(), CommerceError> {
    if price < 0 {
        return Err(CommerceError::InvalidProduct("price must not be negative".to_string()));
    }
    Ok(())
}

fn check_required(field: &str, value: &str) -> Result<(), CommerceError> {
    if value.trim().is_empty() {
        return Err(CommerceError::InvalidProduct(format!("{} is required", field)));
    }
    Ok(())
}

impl ProductDraft {
    /// Check every field.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if let Some(ref id) = self.id {
            check_required("id", id.as_str())?;
        }
        check_name(&self.name)?;
        check_description(&self.description)?;
        check_price(self.price)?;
        check_required("image", &self.image)?;
        check_required("category", &self.category)?;
        Ok(())
    }

    /// Validate and build the product record.
    pub fn into_product(self, currency: Currency) -> Result<Product, CommerceError> {
        self.validate()?;
        let id = self.id.unwrap_or_else(ProductId::generate);
        let mut product = Product::new(id, self.name.trim(), Money::new(self.price, currency))
            .with_description(self.description.trim())
            .with_category(self.category.trim())
            .with_department(self.department)
            .with_image(&self.image);
        product.available = self.available;
        Ok(product)
    }
}

impl ProductPatch {
    /// Patch that only changes the price.
    pub fn price(price: i64) -> Self {
        Self {
            price: Some(price),
            ..Self::default()
        }
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Check the fields that are present.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.is_empty() {
            return Err(CommerceError::InvalidProduct("no changes".to_string()));
        }
        if let Some(ref name) = self.name {
            check_name(name)?;
        }
        if let Some(ref description) = self.description {
            check_description(description)?;
        }
        if let Some(price) = self.price {
            check_price(price)?;
        }
        if let Some(ref image) = self.image {
            check_required("image", image)?;
        }
        if let Some(ref category) = self.category {
            check_required("category", category)?;
        }
        Ok(())
    }

    /// Validate, then write the present fields into `product`.
    ///
    /// The product keeps its currency.
    pub fn apply_to(&self, product: &mut Product) -> Result<(), CommerceError> {
        self.validate()?;
        if let Some(ref name) = self.name {
            product.name = name.trim().to_string();
        }
        if let Some(ref description) = self.description {
            product.description = description.trim().to_string();
        }
        if let Some(price) = self.price {
            product.price = Money::new(price, product.price.currency);
        }
        if let Some(ref image) = self.image {
            product.image = normalize_image(image);
        }
        if let Some(ref category) = self.category {
            product.category = category.trim().to_string();
        }
        if let Some(department) = self.department {
            product.department = department;
        }
        if let Some(available) = self.available {
            product.available = available;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ProductDraft {
        ProductDraft {
            id: Some(ProductId::new("ragi-dosa")),
            name: "Ragi Dosa Batter".to_string(),
            description: "Finger millet, 1 kg".to_string(),
            price: 120,
            image: "ragi.jpg".to_string(),
            category: "Batters".to_string(),
            department: Department::Food,
            available: true,
        }
    }

    #[test]
    fn test_draft_into_product() {
        let product = draft().into_product(Currency::INR).unwrap();
        assert_eq!(product.id.as_str(), "ragi-dosa");
        assert_eq!(product.price, Money::inr(120));
        assert_eq!(product.image, "/images/ragi.jpg");
        assert!(product.validate().is_ok());
    }

    #[test]
    fn test_draft_without_id_gets_one() {
        let product = ProductDraft { id: None, ..draft() }
            .into_product(Currency::INR)
            .unwrap();
        assert!(!product.id.as_str().is_empty());
    }

    #[test]
    fn test_draft_validation() {
        let bad = [
            ProductDraft { name: "R".into(), ..draft() },
            ProductDraft { name: "R".repeat(MAX_NAME_LEN + 1), ..draft() },
            ProductDraft { description: "x".into(), ..draft() },
            ProductDraft { description: "x".repeat(MAX_DESCRIPTION_LEN + 1), ..draft() },
            ProductDraft { price: -1, ..draft() },
            ProductDraft { image: " ".into(), ..draft() },
            ProductDraft { category: "".into(), ..draft() },
        ];
        for d in bad {
            assert!(
                matches!(d.validate(), Err(CommerceError::InvalidProduct(_))),
                "accepted {:?}",
                d
            );
        }
        assert!(ProductDraft { price: 0, ..draft() }.validate().is_ok());
    }

    #[test]
    fn test_draft_deserialize_defaults() {
        let d: ProductDraft = serde_json::from_str(
            r#"{"name":"Ghee","description":"200 ml","price":250,"image":"ghee.jpg","category":"Dairy"}"#,
        )
        .unwrap();
        assert_eq!(d.department, Department::Food);
        assert!(d.available);
        assert!(d.id.is_none());
    }

    #[test]
    fn test_patch_applies_present_fields() {
        let mut product = draft().into_product(Currency::INR).unwrap();
        let patch = ProductPatch {
            price: Some(130),
            image: Some("https://cdn.example.com/r.jpg".into()),
            department: Some(Department::Sports),
            available: Some(false),
            ..ProductPatch::default()
        };
        patch.apply_to(&mut product).unwrap();

        assert_eq!(product.price, Money::inr(130));
        assert_eq!(product.image, "https://cdn.example.com/r.jpg");
        assert_eq!(product.department, Department::Sports);
        assert!(!product.available);
        assert_eq!(product.name, "Ragi Dosa Batter");
    }

    #[test]
    fn test_empty_or_invalid_patch_changes_nothing() {
        let mut product = draft().into_product(Currency::INR).unwrap();
        let before = product.clone();

        assert!(ProductPatch::default().apply_to(&mut product).is_err());
        assert!(ProductPatch::price(-5).apply_to(&mut product).is_err());
        let short = ProductPatch {
            name: Some("R".into()),
            price: Some(10),
            ..ProductPatch::default()
        };
        assert!(short.apply_to(&mut product).is_err());
        assert_eq!(product, before);
    }
}
