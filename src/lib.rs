//! # Offer Index
//!
//! Per-product offer index answering "which offer has the closest price at or
//! below P" in O(log n).
//!
//! ## Architecture
//!
//! - **Types**: Identifiers and fixed-point prices (ProductId, OfferId, Price)
//! - **Index**: Price-ordered offers for a single product
//! - **Catalog**: Product to index mapping with per-product locking
//!
//! ## Design Principles
//!
//! 1. **No Floating Point**: Prices are fixed-point (10^8 scaling), so equal
//!    prices are always the same key
//! 2. **Floor Semantics**: Queries return the greatest price at or below the
//!    request, never a higher one
//! 3. **Per-Product Locking**: Operations on different products do not contend
//! 4. **Caller-Supplied Identifiers**: The index stores identifiers, it never
//!    mints them
//!
//! ## Example
//!
//! ```
//! use offer_index::{OfferCatalog, OfferId, Price, ProductId};
//!
//! let catalog = OfferCatalog::new();
//! let p1: ProductId = "P1".parse().unwrap();
//! catalog.register_product(p1.clone());
//!
//! catalog.add_offer(OfferId::new("O1"), &p1, "10.00".parse().unwrap()).unwrap();
//! catalog.add_offer(OfferId::new("O3"), &p1, "20.00".parse().unwrap()).unwrap();
//!
//! let query: Price = "15.00".parse().unwrap();
//! assert_eq!(catalog.closest_offer(&p1, query).unwrap(), Some(OfferId::new("O1")));
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: ProductId, OfferId, Price
pub mod types;

/// Error types
pub mod error;

/// Catalog configuration
pub mod config;

/// Offer index: price-ordered offers for one product
pub mod index;

/// Catalog: product to offer index mapping
pub mod catalog;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use catalog::OfferCatalog;
pub use config::CatalogConfig;
pub use error::{CatalogError, IdError, PriceError};
pub use index::OfferIndex;
pub use types::{OfferId, Price, ProductId};
