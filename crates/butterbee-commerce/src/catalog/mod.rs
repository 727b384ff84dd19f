//! Product catalog module.
//!
//! The cart and checkout only read from the catalog. Admin edits go through
//! [`StaticCatalog`] and are validated like the shop's product form.

mod admin;
mod product;

pub use admin::{ProductDraft, ProductPatch};
pub use product::{
    normalize_image, Department, Product, MAX_DESCRIPTION_LEN, MAX_NAME_LEN,
    MIN_DESCRIPTION_LEN, MIN_NAME_LEN,
};

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Currency;

/// Storage key for an admin-edited product list.
pub const CATALOG_KEY: &str = "butterbee.catalog";

/// Read-only source of product records.
pub trait Catalog {
    /// Look up a single product.
    fn product(&self, id: &ProductId) -> Option<Product>;

    /// All products, in catalog order.
    fn products(&self) -> Vec<Product>;

    /// Look up a product that can be put in a cart right now.
    fn orderable(&self, id: &ProductId) -> Result<Product, CommerceError> {
        let product = self
            .product(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))?;
        if !product.available {
            return Err(CommerceError::ProductUnavailable(id.to_string()));
        }
        Ok(product)
    }
}

/// Catalog held in memory, typically loaded from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    /// Build a catalog, rejecting invalid or duplicate products.
    pub fn new(products: Vec<Product>) -> Result<Self, CommerceError> {
        let mut seen = std::collections::HashSet::new();
        for product in &products {
            product.validate()?;
            if !seen.insert(product.id.clone()) {
                return Err(CommerceError::InvalidProduct(format!(
                    "duplicate id {}",
                    product.id
                )));
            }
        }
        Ok(Self { products })
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Add a product from an admin draft.
    pub fn create(
        &mut self,
        draft: ProductDraft,
        currency: Currency,
    ) -> Result<Product, CommerceError> {
        let product = draft.into_product(currency)?;
        if self.products.iter().any(|p| p.id == product.id) {
            return Err(CommerceError::InvalidProduct(format!(
                "duplicate id {}",
                product.id
            )));
        }
        tracing::info!(product = %product.id, "product created");
        self.products.push(product.clone());
        Ok(product)
    }

    /// Apply an admin edit, returning the updated product.
    pub fn update(&mut self, id: &ProductId, patch: &ProductPatch) -> Result<Product, CommerceError> {
        let product = self
            .products
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))?;
        patch.apply_to(product)?;
        tracing::info!(product = %id, "product updated");
        Ok(product.clone())
    }

    /// Delete a product, returning it.
    pub fn remove(&mut self, id: &ProductId) -> Result<Product, CommerceError> {
        let index = self
            .products
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))?;
        tracing::info!(product = %id, "product removed");
        Ok(self.products.remove(index))
    }
}

impl Catalog for StaticCatalog {
    fn product(&self, id: &ProductId) -> Option<Product> {
        self.products.iter().find(|p| &p.id == id).cloned()
    }

    fn products(&self) -> Vec<Product> {
        self.products.clone()
    }
}

/// Menu listing filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Only products with this availability.
    pub available: Option<bool>,
    /// Only products in this category (exact match).
    pub category: Option<String>,
    /// Only products in this department.
    pub department: Option<Department>,
    /// Free-text query over name, description and category.
    pub query: Option<String>,
}

impl ProductFilter {
    /// Filter that only lets available products through.
    pub fn available_only() -> Self {
        Self {
            available: Some(true),
            ..Self::default()
        }
    }

    /// Check whether a product passes the filter.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(available) = self.available {
            if product.available != available {
                return false;
            }
        }
        if let Some(ref category) = self.category {
            if &product.category != category {
                return false;
            }
        }
        if let Some(department) = self.department {
            if product.department != department {
                return false;
            }
        }
        match self.query {
            Some(ref q) => product.matches_text(q),
            None => true,
        }
    }

    /// Apply the filter to a catalog, sorted by name.
    pub fn apply(&self, catalog: &dyn Catalog) -> Vec<Product> {
        let mut products: Vec<Product> = catalog
            .products()
            .into_iter()
            .filter(|p| self.matches(p))
            .collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        products
    }
}
