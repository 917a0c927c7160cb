//! Sold-item records: the append-only ledger of completed sales.
//!
//! A [`SoldItemRecord`] is immutable once appended. `sold_price` is the full
//! amount the buyer paid, which may exceed the listed price.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Address, Amount, AssetKey, SaleId};

/// One completed sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoldItemRecord {
    /// Deterministic ID derived from the asset and `sequence`.
    pub sale_id: SaleId,
    /// Position in the sold-items ledger, starting at 0.
    pub sequence: u64,
    /// The asset that changed hands.
    pub asset: AssetKey,
    /// The full amount paid.
    pub sold_price: Amount,
    /// The listing's seller.
    pub seller: Address,
    /// The purchaser.
    pub buyer: Address,
    /// When the sale completed.
    pub sold_at: DateTime<Utc>,
}

impl SoldItemRecord {
    #[must_use]
    pub fn new(
        sequence: u64,
        asset: AssetKey,
        sold_price: Amount,
        seller: Address,
        buyer: Address,
    ) -> Self {
        Self {
            sale_id: SaleId::deterministic(&asset, sequence),
            sequence,
            asset,
            sold_price,
            seller,
            buyer,
            sold_at: Utc::now(),
        }
    }
}

impl std::fmt::Display for SoldItemRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Sale[{}] {} {} -> {} for {}",
            self.sequence, self.asset, self.seller, self.buyer, self.sold_price,
        )
    }
}
