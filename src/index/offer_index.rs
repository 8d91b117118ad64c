//! Price-ordered offer index for a single product.
//!
//! ## Architecture
//!
//! Offers are held in a `BTreeMap<Price, OfferId>`:
//!
//! - **One offer per price**: inserting at an existing price replaces the
//!   previous offer (last write wins)
//! - **Floor lookup**: `range(..=price).next_back()` finds the greatest stored
//!   price at or below the query
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Insert | O(log n) |
//! | Closest at or below | O(log n) |
//! | Lowest / highest | O(log n) |
//! | State root | O(n) |
//!
//! ## Example
//!
//! ```
//! use offer_index::index::OfferIndex;
//! use offer_index::types::{OfferId, Price};
//!
//! let mut index = OfferIndex::new();
//! index.insert(OfferId::new("O1"), "10.00".parse().unwrap());
//! index.insert(OfferId::new("O3"), "20.00".parse().unwrap());
//!
//! let hit = index.closest_at_or_below("15.00".parse().unwrap());
//! assert_eq!(hit, Some(OfferId::new("O1")));
//!
//! assert!(index.closest_at_or_below("5.00".parse().unwrap()).is_none());
//! ```

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};

use crate::types::{OfferId, Price};

/// Offers for one product, ordered by price.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferIndex {
    /// Price levels (sorted low to high)
    /// Key: price, Value: the winning offer at that price
    offers: BTreeMap<Price, OfferId>,
}

impl OfferIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self {
            offers: BTreeMap::new(),
        }
    }

    // ========================================================================
    // Size
    // ========================================================================

    /// Number of distinct prices held
    #[inline]
    pub fn len(&self) -> usize {
        self.offers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Insert an offer at a price
    ///
    /// If an offer already exists at `price` it is replaced.
    ///
    /// # Returns
    ///
    /// The offer that was replaced, or None if the price was new
    ///
    /// # Example
    ///
    /// ```
    /// use offer_index::index::OfferIndex;
    /// use offer_index::types::{OfferId, Price};
    ///
    /// let mut index = OfferIndex::new();
    /// let ten: Price = "10.00".parse().unwrap();
    ///
    /// assert_eq!(index.insert(OfferId::new("O1"), ten), None);
    /// assert_eq!(index.insert(OfferId::new("O2"), ten), Some(OfferId::new("O1")));
    /// assert_eq!(index.len(), 1);
    /// ```
    pub fn insert(&mut self, offer_id: OfferId, price: Price) -> Option<OfferId> {
        self.offers.insert(price, offer_id)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Find the offer at the greatest stored price not exceeding `price`
    ///
    /// An exact price match returns that entry. Returns None when the index
    /// is empty or every stored price is above `price`.
    pub fn closest_at_or_below(&self, price: Price) -> Option<OfferId> {
        self.floor_entry(price).map(|(_, offer)| offer.clone())
    }

    /// Borrowing form of [`closest_at_or_below`](Self::closest_at_or_below)
    /// that also yields the matched price
    #[inline]
    pub fn floor_entry(&self, price: Price) -> Option<(Price, &OfferId)> {
        self.offers
            .range(..=price)
            .next_back()
            .map(|(p, offer)| (*p, offer))
    }

    /// Offer at exactly `price`
    #[inline]
    pub fn get(&self, price: Price) -> Option<&OfferId> {
        self.offers.get(&price)
    }

    /// Lowest-priced entry
    pub fn lowest(&self) -> Option<(Price, &OfferId)> {
        self.offers.first_key_value().map(|(p, offer)| (*p, offer))
    }

    /// Highest-priced entry
    pub fn highest(&self) -> Option<(Price, &OfferId)> {
        self.offers.last_key_value().map(|(p, offer)| (*p, offer))
    }

    /// Iterate entries in ascending price order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (Price, &OfferId)> + '_ {
        self.offers.iter().map(|(p, offer)| (*p, offer))
    }

    /// Owned snapshot of all entries in ascending price order
    pub fn entries(&self) -> Vec<(Price, OfferId)> {
        self.offers
            .iter()
            .map(|(p, offer)| (*p, offer.clone()))
            .collect()
    }

    // ========================================================================
    // State Root
    // ========================================================================

    /// SHA-256 digest of the index contents
    ///
    /// Entries are hashed in price order as `price (8 bytes BE) ||
    /// id length (8 bytes BE) || id bytes`. Two indices holding the same
    /// entries produce the same root regardless of insertion history.
    pub fn state_root(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        for (price, offer) in &self.offers {
            let id = offer.as_str().as_bytes();
            hasher.update(price.to_be_bytes());
            hasher.update((id.len() as u64).to_be_bytes());
            hasher.update(id);
        }

        let mut root = [0u8; 32];
        root.copy_from_slice(&hasher.finalize());
        root
    }

    /// State root as a hex string
    pub fn state_root_hex(&self) -> String {
        hex::encode(self.state_root())
    }
}

impl Extend<(OfferId, Price)> for OfferIndex {
    fn extend<I: IntoIterator<Item = (OfferId, Price)>>(&mut self, iter: I) {
        for (offer_id, price) in iter {
            self.insert(offer_id, price);
        }
    }
}

impl FromIterator<(OfferId, Price)> for OfferIndex {
    fn from_iter<I: IntoIterator<Item = (OfferId, Price)>>(iter: I) -> Self {
        let mut index = OfferIndex::new();
        index.extend(iter);
        index
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
