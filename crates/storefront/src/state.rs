//! Application state constructed once at startup and passed explicitly.

use std::sync::Arc;

use crate::cart::CartManager;
use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::store::{CartStore, FileStore};

/// Everything a view needs: configuration, the catalog, and the session's
/// single cart manager.
///
/// The cart manager is not shareable across threads; the whole state lives
/// on the thread that drives the UI.
#[derive(Debug)]
pub struct AppState {
    config: StorefrontConfig,
    catalog: Arc<Catalog>,
    cart: CartManager,
}

impl AppState {
    /// Create the application state with a file-backed cart store.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured catalog file cannot be loaded.
    pub fn new(config: StorefrontConfig) -> Result<Self> {
        let store = FileStore::new(&config.data_dir, &config.cart_key);
        tracing::debug!(path = %store.path().display(), "Using file cart store");
        Self::with_store(config, Box::new(store))
    }

    /// Create the application state with an explicit cart store.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured catalog file cannot be loaded.
    pub fn with_store(config: StorefrontConfig, store: Box<dyn CartStore>) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::load(path)?,
            None => Catalog::builtin(),
        };
        let catalog = Arc::new(catalog);
        let cart = CartManager::open(Arc::clone(&catalog), store);

        Ok(Self {
            config,
            catalog,
            cart,
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Get a reference to the cart manager.
    #[must_use]
    pub const fn cart(&self) -> &CartManager {
        &self.cart
    }

    /// Get a mutable reference to the cart manager.
    pub fn cart_mut(&mut self) -> &mut CartManager {
        &mut self.cart
    }
}
