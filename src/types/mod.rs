//! Core value types for the offer index
//!
//! ## Types
//!
//! - [`ProductId`]: Identifier of a registered product
//! - [`OfferId`]: Identifier of an offer, supplied by the caller
//! - [`Price`]: Fixed-point price (scaled by 10^8)
//!
//! ## Fixed-Point Prices
//!
//! Prices are stored as `i64` scaled by 10^8.
//! Example: 50000.12345678 is stored as 5_000_012_345_678i64

mod ids;
pub mod price;

// Re-export all types at module level
pub use ids::{OfferId, ProductId};
pub use price::Price;
