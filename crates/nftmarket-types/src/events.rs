//! Notifications emitted by exchange operations.
//!
//! Events form an append-only trail that callers drain after each operation.
//! Re-pricing a listing emits [`MarketEvent::ItemListed`] again with the new
//! price; it is a re-list, not a separate kind. Share updates emit nothing.

use serde::{Deserialize, Serialize};

use crate::{Address, Amount, AssetKey};

/// Every notification the exchange can emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketEvent {
    /// An asset was listed or re-priced.
    ItemListed {
        seller: Address,
        asset: AssetKey,
        price: Amount,
    },
    /// A listing was withdrawn by its seller.
    ItemUnlisted { seller: Address, asset: AssetKey },
    /// A listed asset was bought.
    ItemTransferred { buyer: Address, asset: AssetKey },
    /// A seller withdrew their accumulated proceeds.
    ProceedsWithdrawn { seller: Address, amount: Amount },
    /// The operator withdrew the revenue pool.
    RevenueWithdrawn { operator: Address, amount: Amount },
}


impl std::fmt::Display for MarketEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ItemListed { .. } => write!(f, "ITEM_LISTED"),
            Self::ItemUnlisted { .. } => write!(f, "ITEM_UNLISTED"),
            Self::ItemTransferred { .. } => write!(f, "ITEM_TRANSFERRED"),
            Self::ProceedsWithdrawn { .. } => write!(f, "PROCEEDS_WITHDRAWN"),
            Self::RevenueWithdrawn { .. } => write!(f, "REVENUE_WITHDRAWN"),
        }
    }
}
