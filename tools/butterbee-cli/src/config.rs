//! CLI configuration.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use butterbee_commerce::cart::PricingMode;
use butterbee_commerce::catalog::{Department, Product, StaticCatalog};
use butterbee_commerce::settings::{SettingsSource, StoreSettings};
use butterbee_commerce::{Currency, Money};
use serde::{Deserialize, Serialize};

/// File names searched for, in order, in every directory up to the root.
pub const CONFIG_NAMES: [&str; 3] = ["butterbee.toml", ".butterbee.toml", "butterbee.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub shop: ShopConfig,

    #[serde(default)]
    pub cart: CartConfig,

    /// Apartments and delivery slots. Empty lists mean the built-in defaults.
    #[serde(default)]
    pub settings: StoreSettings,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Shop currency.
    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.shop.currency)
            .ok_or_else(|| anyhow!("Unknown currency: {}", self.shop.currency))
    }

    /// Build the catalog from `[[catalog.products]]`.
    pub fn catalog(&self) -> Result<StaticCatalog> {
        let currency = self.currency()?;
        let products = self
            .catalog
            .products
            .iter()
            .map(|p| p.to_product(currency))
            .collect();
        StaticCatalog::new(products).context("Invalid catalog")
    }

    /// Settings with defaults filled in. Invalid slot definitions are
    /// replaced by the default slots.
    pub fn store_settings(&self) -> StoreSettings {
        self.settings.settings()
    }
}

/// Shop-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Name shown in order summaries.
    #[serde(default = "default_shop_name")]
    pub name: String,

    /// ISO currency code of catalog prices.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// WhatsApp number orders are sent to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp_phone: Option<String>,

    /// Where carts, addresses and orders are kept.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Session key used when `--session` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
}

fn default_shop_name() -> String {
    "ButterBee".to_string()
}

fn default_currency() -> String {
    Currency::INR.code().to_string()
}

fn default_data_dir() -> String {
    ".butterbee".to_string()
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            name: default_shop_name(),
            currency: default_currency(),
            whatsapp_phone: None,
            data_dir: default_data_dir(),
            session: None,
        }
    }
}

/// Cart behaviour.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartConfig {
    /// "snapshot" charges the price seen when adding; "live" the current one.
    #[serde(default)]
    pub pricing: PricingMode,
}

/// Menu served by the shop.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub products: Vec<ProductConfig>,
}

/// A product as written in the config file, priced in shop currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductConfig {
    pub id: String,
    pub name: String,
    pub price: i64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub department: Department,
    #[serde(default)]
    pub image: String,
    #[serde(default = "default_true")]
    pub available: bool,
}

fn default_true() -> bool {
    true
}

impl ProductConfig {
    fn to_product(&self, currency: Currency) -> Product {
        let mut product = Product::new(self.id.as_str(), &self.name, Money::new(self.price, currency))
            .with_category(&self.category)
            .with_description(&self.description)
            .with_department(self.department)
            .with_image(&self.image);
        if !self.available {
            product = product.unavailable();
        }
        product
    }
}

/// Generate a starter butterbee.toml bound to `session`.
pub fn generate_default_config(name: &str, session: &str) -> String {
    format!(
        r#"# ButterBee storefront configuration

[shop]
name = "{name}"
currency = "INR"
# whatsapp_phone = "919800000000"
data_dir = ".butterbee"
session = "{session}"

[cart]
# "snapshot" keeps the price seen when an item was added, "live" follows the menu
pricing = "snapshot"

[settings]
apartments = ["Olympia Opaline", "Test"]

[[settings.slots]]
id = "6-8"
label = "6–8 AM"
start_hour = 6
start_minute = 0

[[settings.slots]]
id = "8-10"
label = "8–10 AM"
start_hour = 8
start_minute = 0

[[settings.slots]]
id = "17-19"
label = "5–7 PM"
start_hour = 17
start_minute = 0

[[catalog.products]]
id = "dosa-batter"
name = "Dosa Batter"
price = 100
category = "Batters"
description = "Stone-ground, 1 kg"

[[catalog.products]]
id = "idli-batter"
name = "Idli Batter"
price = 90
category = "Batters"

[[catalog.products]]
id = "ghee"
name = "Cultured Ghee"
price = 250
category = "Dairy"
description = "Small-batch, 200 ml"
"#,
        name = name,
        session = session
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use butterbee_commerce::catalog::Catalog;

    #[test]
    fn test_default_config_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config("ButterBee", "sess_test")).unwrap();
        assert_eq!(config.shop.name, "ButterBee");
        assert_eq!(config.shop.session.as_deref(), Some("sess_test"));
        assert_eq!(config.cart.pricing, PricingMode::Snapshot);
        assert_eq!(config.store_settings(), StoreSettings::default());

        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.products()[0].price, Money::inr(100));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config.currency().unwrap(), Currency::INR);
        assert_eq!(config.shop.data_dir, ".butterbee");
        assert_eq!(config.store_settings(), StoreSettings::default());
        assert!(config.catalog().unwrap().is_empty());
    }

    #[test]
    fn test_live_pricing_and_unavailable_product() {
        let config: CliConfig = toml::from_str(
            r#"
            [cart]
            pricing = "live"

            [[catalog.products]]
            id = "vada"
            name = "Medu Vada"
            price = 30
            available = false
            "#,
        )
        .unwrap();
        assert_eq!(config.cart.pricing, PricingMode::Live);
        let catalog = config.catalog().unwrap();
        assert!(!catalog.products()[0].available);
    }

    #[test]
    fn test_invalid_slots_fall_back_to_defaults() {
        let config: CliConfig = toml::from_str(
            r#"
            [settings]
            apartments = ["Tower Gardens"]

            [[settings.slots]]
            id = "late"
            label = "Late"
            start_hour = 25
            "#,
        )
        .unwrap();
        assert!(config.settings.validate().is_err());
        let settings = config.store_settings();
        assert_eq!(settings.slots, StoreSettings::default().slots);
        assert_eq!(settings.apartments, vec!["Tower Gardens"]);
    }

    #[test]
    fn test_product_department_and_image() {
        let config: CliConfig = toml::from_str(
            r#"
            [[catalog.products]]
            id = "jersey"
            name = "Cricket Jersey"
            price = 799
            department = "CLOTHES"
            image = "jersey.jpg"
            "#,
        )
        .unwrap();
        let product = &config.catalog().unwrap().products()[0];
        assert_eq!(product.department, Department::Clothes);
        assert_eq!(product.image, "/images/jersey.jpg");
    }

    #[test]
    fn test_bad_currency() {
        let config: CliConfig = toml::from_str("[shop]\ncurrency = \"XYZ\"").unwrap();
        assert!(config.currency().is_err());
        assert!(config.catalog().is_err());
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("butterbee.json");
        std::fs::write(&path, r#"{"shop": {"name": "Test Shop"}}"#).unwrap();
        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.shop.name, "Test Shop");
        assert_eq!(config.shop.currency, "INR");
    }
}
