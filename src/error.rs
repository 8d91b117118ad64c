//! Error types for the offer index.
//!
//! `CatalogError` is what the catalog returns; a query that finds no offer at
//! or below the requested price is `Ok(None)`, not an error. `PriceError` and
//! `IdError` are raised when parsing caller input into the core types.

use thiserror::Error;

use crate::types::ProductId;

/// Errors returned by [`OfferCatalog`](crate::catalog::OfferCatalog)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The product was never registered with the catalog
    #[error("No such product: {0}")]
    UnknownProduct(ProductId),
}

/// Errors from parsing a decimal price string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    /// Not a decimal number
    #[error("invalid price: {0:?}")]
    Invalid(String),

    /// More fractional digits than the fixed-point scale holds
    #[error("price {0} has more than 8 decimal places")]
    TooPrecise(String),

    /// Does not fit in the fixed-point range
    #[error("price {0} is out of range")]
    OutOfRange(String),
}

/// Errors from parsing an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("identifier must not be empty")]
    Empty,
}

/// Result alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
