//! Listing types: an offer to sell one asset at a fixed price.
//!
//! A [`Listing`] exists for an [`AssetKey`](crate::AssetKey) exactly while
//! the asset is for sale. It is created by listing, re-priced in place, and
//! destroyed by un-listing or by a successful purchase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Address, Amount};

/// An active fixed-price offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// The account that listed the asset and receives the proceeds.
    pub seller: Address,
    /// Minimum payment accepted. Always strictly positive.
    pub price: Amount,
    /// When the listing was created or last re-priced.
    pub listed_at: DateTime<Utc>,
}

impl Listing {
    #[must_use]
    pub fn new(seller: Address, price: Amount) -> Self {
        Self {
            seller,
            price,
            listed_at: Utc::now(),
        }
    }

    /// Whether `paid` covers the asking price. Overpayment is accepted.
    #[must_use]
    pub fn accepts(&self, paid: Amount) -> bool {
        paid >= self.price
    }

    #[must_use]
    pub fn is_seller(&self, caller: Address) -> bool {
        self.seller == caller
    }

    /// Set a new price. A re-price counts as a fresh listing time.
    pub fn reprice(&mut self, price: Amount) {
        self.price = price;
        self.listed_at = Utc::now();
    }
}
