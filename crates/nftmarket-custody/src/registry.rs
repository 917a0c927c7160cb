//! Asset registry: ownership and transfer authorization per asset.
//!
//! The exchange never holds assets. Sellers keep ownership while listed and
//! grant the exchange permission to move the asset; on purchase the exchange
//! asks the registry to move it straight from seller to buyer.

use std::collections::{HashMap, HashSet};

use nftmarket_types::{Address, AssetKey, MarketError, Result, TokenId};

/// Ownership and transfer authorization for non-fungible assets.
pub trait AssetRegistry {
    /// Current owner, or `None` if the asset does not exist.
    fn owner_of(&self, asset: &AssetKey) -> Option<Address>;

    /// Whether `operator` may transfer `asset` on its owner's behalf.
    fn is_approved_for_transfer(&self, asset: &AssetKey, operator: Address) -> bool;

    /// Move `asset` from `from` to `to`, performed by `operator`.
    ///
    /// # Errors
    /// Returns [`MarketError::TransferFailed`] if the asset does not exist,
    /// `from` is not its owner, or `operator` is not authorized. A failed
    /// transfer changes nothing.
    fn transfer(
        &mut self,
        asset: &AssetKey,
        operator: Address,
        from: Address,
        to: Address,
    ) -> Result<()>;
}

/// In-memory registry hosting any number of asset contracts.
///
/// Token IDs are minted sequentially per contract starting at 0.
/// Authorization follows the familiar per-token approval plus
/// approved-for-all operator model.
pub struct InMemoryAssetRegistry {
    /// Owner of every minted asset.
    owners: HashMap<AssetKey, Address>,
    /// Single approved spender per asset, cleared on transfer.
    token_approvals: HashMap<AssetKey, Address>,
    /// `(contract, owner, operator)` triples approved for all of an owner's assets.
    operator_approvals: HashSet<(Address, Address, Address)>,
    /// Next token ID to mint per contract.
    next_token: HashMap<Address, TokenId>,
}

impl InMemoryAssetRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            owners: HashMap::new(),
            token_approvals: HashMap::new(),
            operator_approvals: HashSet::new(),
            next_token: HashMap::new(),
        }
    }

    /// Mint the next token of `contract` to `to`.
    ///
    /// # Errors
    /// `Internal` once the contract's token IDs are exhausted.
    pub fn mint(&mut self, contract: Address, to: Address) -> Result<AssetKey> {
        let slot = self.next_token.entry(contract).or_insert(TokenId(0));
        let token_id = *slot;
        *slot = token_id.next().ok_or_else(|| {
            MarketError::Internal(format!("token ids exhausted for contract {contract}"))
        })?;

        let key = AssetKey::new(contract, token_id);
        self.owners.insert(key, to);
        tracing::debug!(asset = %key, owner = %to, "Asset minted");
        Ok(key)
    }

    /// Approve `spender` to transfer `asset`.
    ///
    /// # Errors
    /// - `TransferFailed` if the asset does not exist
    /// - `NotOwner` if `caller` is neither the owner nor an approved-for-all operator
    pub fn approve(&mut self, caller: Address, asset: &AssetKey, spender: Address) -> Result<()> {
        let owner = self
            .owners
            .get(asset)
            .copied()
            .ok_or_else(|| MarketError::TransferFailed {
                reason: format!("asset {asset} does not exist"),
            })?;

        if caller != owner && !self.is_approved_for_all(asset.contract, owner, caller) {
            return Err(MarketError::NotOwner {
                caller,
                asset: *asset,
            });
        }

        self.token_approvals.insert(*asset, spender);
        Ok(())
    }

    /// Grant or revoke `operator` control over all of `owner`'s assets in `contract`.
    pub fn set_approval_for_all(
        &mut self,
        owner: Address,
        contract: Address,
        operator: Address,
        approved: bool,
    ) {
        if approved {
            self.operator_approvals.insert((contract, owner, operator));
        } else {
            self.operator_approvals.remove(&(contract, owner, operator));
        }
    }

    /// The per-token approved spender, if any.
    #[must_use]
    pub fn get_approved(&self, asset: &AssetKey) -> Option<Address> {
        self.token_approvals.get(asset).copied()
    }

    #[must_use]
    pub fn is_approved_for_all(&self, contract: Address, owner: Address, operator: Address) -> bool {
        self.operator_approvals
            .contains(&(contract, owner, operator))
    }

    /// Number of assets of `contract` held by `owner`.
    #[must_use]
    pub fn balance_of(&self, contract: Address, owner: Address) -> usize {
        self.owners
            .iter()
            .filter(|(key, holder)| key.contract == contract && **holder == owner)
            .count()
    }
}

impl Default for InMemoryAssetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetRegistry for InMemoryAssetRegistry {
    fn owner_of(&self, asset: &AssetKey) -> Option<Address> {
        self.owners.get(asset).copied()
    }

    fn is_approved_for_transfer(&self, asset: &AssetKey, operator: Address) -> bool {
        let Some(owner) = self.owner_of(asset) else {
            return false;
        };
        self.get_approved(asset) == Some(operator)
            || self.is_approved_for_all(asset.contract, owner, operator)
    }

    fn transfer(
        &mut self,
        asset: &AssetKey,
        operator: Address,
        from: Address,
        to: Address,
    ) -> Result<()> {
        let owner = self
            .owner_of(asset)
            .ok_or_else(|| MarketError::TransferFailed {
                reason: format!("asset {asset} does not exist"),
            })?;

        if owner != from {
            return Err(MarketError::TransferFailed {
                reason: format!("{from} does not own {asset}"),
            });
        }
        if operator != owner && !self.is_approved_for_transfer(asset, operator) {
            return Err(MarketError::TransferFailed {
                reason: format!("{operator} is not approved to transfer {asset}"),
            });
        }
        if to.is_zero() {
            return Err(MarketError::TransferFailed {
                reason: "transfer to the zero address".into(),
            });
        }

        self.owners.insert(*asset, to);
        self.token_approvals.remove(asset);
        tracing::debug!(asset = %asset, from = %from, to = %to, "Asset transferred");
        Ok(())
    }
}
