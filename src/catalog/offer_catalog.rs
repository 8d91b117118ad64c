//! Product catalog routing offers to per-product indices.
//!
//! ## Locking
//!
//! ```text
//! products: RwLock<HashMap<ProductId, Arc<RwLock<OfferIndex>>>>
//!                  |                          |
//!                  |                          +-- per-product lock: insert takes
//!                  |                              write, query takes read
//!                  +-- map lock: held only to look up or register a product
//! ```
//!
//! Offer operations take the map read lock just long enough to clone the
//! product's `Arc`, then release it before touching the index. Writers on
//! different products therefore never wait on each other, and a query on a
//! product cannot observe a half-applied insert on that product.
//!
//! ## Example
//!
//! ```
//! use offer_index::catalog::OfferCatalog;
//! use offer_index::error::CatalogError;
//! use offer_index::types::{OfferId, Price, ProductId};
//!
//! let catalog = OfferCatalog::new();
//! let p1 = ProductId::new("P1");
//! catalog.register_product(p1.clone());
//!
//! let ten: Price = "10.00".parse().unwrap();
//! catalog.add_offer(OfferId::new("O1"), &p1, ten).unwrap();
//!
//! let twelve: Price = "12.00".parse().unwrap();
//! assert_eq!(catalog.closest_offer(&p1, twelve), Ok(Some(OfferId::new("O1"))));
//!
//! let p2 = ProductId::new("P2");
//! assert_eq!(
//!     catalog.closest_offer(&p2, ten),
//!     Err(CatalogError::UnknownProduct(p2.clone()))
//! );
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use tracing::{debug, info, trace, warn};

use crate::config::CatalogConfig;
use crate::error::{CatalogError, Result};
use crate::index::OfferIndex;
use crate::types::{OfferId, Price, ProductId};

type SharedIndex = Arc<RwLock<OfferIndex>>;

/// Catalog of per-product offer indices.
///
/// Safe to share across threads as `Arc<OfferCatalog>`.
#[derive(Debug)]
pub struct OfferCatalog {
    /// Product to index mapping
    /// Entries are added by registration and never removed
    products: RwLock<HashMap<ProductId, SharedIndex>>,

    config: CatalogConfig,
}

impl Default for OfferCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl OfferCatalog {
    /// Create an empty catalog with default configuration
    pub fn new() -> Self {
        Self::with_config(CatalogConfig::default())
    }

    /// Create an empty catalog with the given configuration
    pub fn with_config(config: CatalogConfig) -> Self {
        Self {
            products: RwLock::new(HashMap::with_capacity(config.product_capacity)),
            config,
        }
    }

    /// The configuration this catalog was built with
    #[inline]
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    // ========================================================================
    // Products
    // ========================================================================

    /// Register a product, creating an empty index for it
    ///
    /// Registering an already known product leaves its index untouched.
    ///
    /// # Returns
    ///
    /// `true` if the product was newly registered
    pub fn register_product(&self, product_id: ProductId) -> bool {
        let products = self.products.upgradable_read();
        if products.contains_key(&product_id) {
            trace!(product = %product_id, "product already registered");
            return false;
        }

        let mut products = RwLockUpgradableReadGuard::upgrade(products);
        debug!(product = %product_id, "registering product");
        products.insert(product_id, Arc::new(RwLock::new(OfferIndex::new())));
        true
    }

    /// Check whether a product is registered
    pub fn contains_product(&self, product_id: &ProductId) -> bool {
        self.products.read().contains_key(product_id)
    }

    /// Number of registered products
    pub fn product_count(&self) -> usize {
        self.products.read().len()
    }

    // ========================================================================
    // Offers
    // ========================================================================

    /// Add an offer for a product at a price
    ///
    /// An existing offer at the same price is replaced.
    ///
    /// # Returns
    ///
    /// The replaced offer, if any
    ///
    /// # Errors
    ///
    /// `CatalogError::UnknownProduct` if the product was never registered
    pub fn add_offer(
        &self,
        offer_id: OfferId,
        product_id: &ProductId,
        price: Price,
    ) -> Result<Option<OfferId>> {
        let index = self.index(product_id)?;
        debug!(product = %product_id, offer = %offer_id, %price, "adding offer");

        let replaced = index.write().insert(offer_id, price);

        if let Some(previous) = &replaced {
            if self.config.log_replacements {
                info!(product = %product_id, replaced = %previous, %price, "offer replaced");
            } else {
                debug!(product = %product_id, replaced = %previous, %price, "offer replaced");
            }
        }

        Ok(replaced)
    }

    /// Find the product's offer at the greatest price not exceeding `price`
    ///
    /// # Returns
    ///
    /// * `Ok(Some(offer))` - The closest offer at or below `price`
    /// * `Ok(None)` - The product has no offer at or below `price`
    ///
    /// # Errors
    ///
    /// `CatalogError::UnknownProduct` if the product was never registered
    pub fn closest_offer(&self, product_id: &ProductId, price: Price) -> Result<Option<OfferId>> {
        let index = self.index(product_id)?;
        let found = index.read().closest_at_or_below(price);

        trace!(product = %product_id, %price, found = ?found, "closest offer query");
        Ok(found)
    }

    /// Number of distinct offer prices held for a product
    pub fn offer_count(&self, product_id: &ProductId) -> Result<usize> {
        Ok(self.index(product_id)?.read().len())
    }

    /// Snapshot of a product's offers in ascending price order
    pub fn offers(&self, product_id: &ProductId) -> Result<Vec<(Price, OfferId)>> {
        Ok(self.index(product_id)?.read().entries())
    }

    /// SHA-256 digest of a product's offers
    pub fn state_root(&self, product_id: &ProductId) -> Result<[u8; 32]> {
        Ok(self.index(product_id)?.read().state_root())
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Resolve a product's index, releasing the map lock before returning
    fn index(&self, product_id: &ProductId) -> Result<SharedIndex> {
        let index = self.products.read().get(product_id).cloned();
        index.ok_or_else(|| {
            warn!(product = %product_id, "operation on unknown product");
            CatalogError::UnknownProduct(product_id.clone())
        })
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
