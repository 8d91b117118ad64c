//! Offer catalog: product identifiers mapped to their offer indices.
//!
//! ## Operations
//!
//! | Caller action | Catalog operation |
//! |---------------|-------------------|
//! | Product record created/loaded | [`OfferCatalog::register_product`] |
//! | Offer added at a price | [`OfferCatalog::add_offer`] |
//! | Nearest offer at or below a price | [`OfferCatalog::closest_offer`] |
//!
//! Offer operations on a product that was never registered fail with
//! [`CatalogError::UnknownProduct`](crate::error::CatalogError::UnknownProduct).
//! The catalog never registers a product implicitly.

pub mod offer_catalog;

pub use offer_catalog::OfferCatalog;
