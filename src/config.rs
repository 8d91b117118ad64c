//! Catalog configuration.

/// Tuning knobs for [`OfferCatalog`](crate::catalog::OfferCatalog).
///
/// ## Example
///
/// ```
/// use offer_index::{CatalogConfig, OfferCatalog};
///
/// let config = CatalogConfig::default()
///     .with_product_capacity(10_000)
///     .with_log_replacements(true);
/// let catalog = OfferCatalog::with_config(config);
/// assert_eq!(catalog.product_count(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Number of products to pre-allocate map slots for
    pub product_capacity: usize,

    /// Log overwritten offers at `info` instead of `debug`
    pub log_replacements: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            product_capacity: 64,
            log_replacements: false,
        }
    }
}

impl CatalogConfig {
    pub fn with_product_capacity(mut self, capacity: usize) -> Self {
        self.product_capacity = capacity;
        self
    }

    pub fn with_log_replacements(mut self, enabled: bool) -> Self {
        self.log_replacements = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = CatalogConfig::default()
            .with_product_capacity(5)
            .with_log_replacements(true);
        assert_eq!(config.product_capacity, 5);
        assert!(config.log_replacements);
    }
}
