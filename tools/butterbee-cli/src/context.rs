//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use butterbee_cache::{Cache, FileStore, SessionId};
use butterbee_commerce::cart::CartStore;
use butterbee_commerce::catalog::{Catalog, Product, StaticCatalog, CATALOG_KEY};
use butterbee_commerce::checkout::{AddressBook, Checkout, OrderBook, ADDRESS_KEY_PREFIX};
use butterbee_commerce::settings::StoreSettings;
use chrono::NaiveDateTime;

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Where the config was loaded from, if anywhere.
    pub config_path: Option<PathBuf>,
    /// Shopper session the cart and addresses belong to.
    pub session: SessionId,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, session: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = resolve(&cwd, path);
                (CliConfig::load(&path)?, Some(path))
            }
            None => match Self::find_config(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        match config_path {
            Some(ref path) => output.debug(&format!("Using config {}", path.display())),
            None => output.debug("No config file found, using defaults"),
        }

        let session = session
            .map(SessionId::from)
            .or_else(|| config.shop.session.as_deref().map(SessionId::from))
            .unwrap_or_default();

        Ok(Self {
            config,
            output,
            cwd,
            config_path,
            session,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    return Some(config_path);
                }
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Directory holding carts, addresses and orders, relative to the config
    /// file when there is one.
    pub fn data_dir(&self) -> PathBuf {
        let base = self
            .config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(&self.cwd);
        resolve(base, &self.config.shop.data_dir)
    }

    fn store(&self) -> Result<FileStore> {
        let dir = self.data_dir();
        FileStore::open(&dir).with_context(|| format!("Failed to open data dir {}", dir.display()))
    }

    /// The session's cart.
    pub fn cart(&self) -> Result<CartStore<FileStore>> {
        Ok(CartStore::open(self.store()?, &self.session, self.config.currency()?))
    }

    /// The menu: the product list saved by `product` edits when there is one,
    /// otherwise `[[catalog.products]]` from the config.
    pub fn catalog(&self) -> Result<StaticCatalog> {
        let cache = Cache::new(self.store()?);
        let saved: Option<Vec<Product>> = cache
            .get(CATALOG_KEY)
            .context("Failed to read saved product list")?;
        match saved {
            Some(products) => StaticCatalog::new(products).context("Invalid saved product list"),
            None => self.config.catalog(),
        }
    }

    pub fn save_catalog(&self, catalog: &StaticCatalog) -> Result<()> {
        let cache = Cache::new(self.store()?);
        cache
            .set(CATALOG_KEY, &catalog.products())
            .context("Failed to save product list")
    }

    pub fn settings(&self) -> StoreSettings {
        self.config.store_settings()
    }

    pub fn order_book(&self) -> Result<OrderBook<FileStore>> {
        Ok(OrderBook::new(self.store()?))
    }

    /// Checkout knobs from `[shop]` and `[cart]`.
    pub fn checkout(&self) -> Checkout {
        Checkout {
            shop_name: self.config.shop.name.clone(),
            whatsapp_phone: self.config.shop.whatsapp_phone.clone(),
            pricing: self.config.cart.pricing,
        }
    }

    /// The session's saved addresses.
    pub fn address_book(&self) -> Result<AddressBook> {
        let cache = Cache::new(self.store()?);
        let book: Option<AddressBook> = cache
            .get(&self.session.key(ADDRESS_KEY_PREFIX))
            .context("Failed to read saved addresses")?;
        Ok(book.unwrap_or_default())
    }

    pub fn save_address_book(&self, book: &AddressBook) -> Result<()> {
        let cache = Cache::new(self.store()?);
        cache
            .set(&self.session.key(ADDRESS_KEY_PREFIX), book)
            .context("Failed to save addresses")
    }

    /// Local wall-clock time.
    pub fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Resolve a path relative to `base`.
fn resolve(base: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
