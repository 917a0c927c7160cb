//! The listing registry.
//!
//! Uses a `BTreeMap<AssetKey, Listing>` so iteration is ordered by contract
//! then token. An auxiliary `HashMap<Address, BTreeSet<AssetKey>>` indexes
//! listings per seller.
//!
//! At most one listing exists per [`AssetKey`]: `insert` refuses a key that
//! is already present.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use nftmarket_types::{Address, Amount, AssetKey, Listing, MarketError, Result};

/// Active listings keyed by asset.
#[derive(Debug, Default)]
pub struct ListingBook {
    listings: BTreeMap<AssetKey, Listing>,
    /// Fast lookup: seller -> listed assets.
    by_seller: HashMap<Address, BTreeSet<AssetKey>>,
}

impl ListingBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =================================================================
    // Mutation
    // =================================================================

    /// Add a listing for `asset`.
    pub fn insert(&mut self, asset: AssetKey, listing: Listing) -> Result<()> {
        if self.listings.contains_key(&asset) {
            return Err(MarketError::AlreadyListed(asset));
        }
        self.by_seller
            .entry(listing.seller)
            .or_default()
            .insert(asset);
        self.listings.insert(asset, listing);
        Ok(())
    }

    /// Remove and return the listing for `asset`.
    pub fn remove(&mut self, asset: &AssetKey) -> Result<Listing> {
        let listing = self
            .listings
            .remove(asset)
            .ok_or(MarketError::NotListed(*asset))?;

        if let Some(assets) = self.by_seller.get_mut(&listing.seller) {
            assets.remove(asset);
            if assets.is_empty() {
                self.by_seller.remove(&listing.seller);
            }
        }
        Ok(listing)
    }

    /// Replace the price of an existing listing and refresh `listed_at`.
    pub fn reprice(&mut self, asset: &AssetKey, price: Amount) -> Result<&Listing> {
        let listing = self
            .listings
            .get_mut(asset)
            .ok_or(MarketError::NotListed(*asset))?;
        listing.reprice(price);
        Ok(listing)
    }

    // =================================================================
    // Queries
    // =================================================================

    #[must_use]
    pub fn get(&self, asset: &AssetKey) -> Option<&Listing> {
        self.listings.get(asset)
    }

    #[must_use]
    pub fn contains(&self, asset: &AssetKey) -> bool {
        self.listings.contains_key(asset)
    }

    /// All listings in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&AssetKey, &Listing)> {
        self.listings.iter()
    }

    /// Assets currently listed by `seller`, in key order.
    #[must_use]
    pub fn listings_by(&self, seller: Address) -> Vec<AssetKey> {
        self.by_seller
            .get(&seller)
            .map(|assets| assets.iter().copied().collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
