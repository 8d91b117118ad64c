//! Per-product offer index.
//!
//! ## Components
//!
//! - [`OfferIndex`]: offers for one product keyed by price, with
//!   closest-at-or-below lookup

pub mod offer_index;

pub use offer_index::OfferIndex;
