//! Thread-safe handle to an [`Exchange`].
//!
//! Every operation runs under one mutex, so operations are serialized and
//! each one observes the effects of the previous. A poisoned lock surfaces as
//! [`MarketError::Internal`] instead of a panic.

use std::sync::{Arc, Mutex, MutexGuard};

use nftmarket_custody::{AssetRegistry, ValueTransfer};
use nftmarket_types::{Address, Amount, AssetKey, Listing, MarketError, Result, SoldItemRecord};

use crate::exchange::Exchange;

/// Cloneable, `Send + Sync` wrapper around an [`Exchange`].
pub struct SharedExchange<R, P> {
    inner: Arc<Mutex<Exchange<R, P>>>,
}

impl<R, P> Clone for SharedExchange<R, P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R, P> SharedExchange<R, P>
where
    R: AssetRegistry,
    P: ValueTransfer,
{
    #[must_use]
    pub fn new(exchange: Exchange<R, P>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(exchange)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Exchange<R, P>>> {
        self.inner
            .lock()
            .map_err(|_| MarketError::Internal("exchange lock poisoned".into()))
    }

    /// Run `f` with exclusive access to the exchange.
    pub fn with<T>(&self, f: impl FnOnce(&mut Exchange<R, P>) -> T) -> Result<T> {
        let mut guard = self.lock()?;
        Ok(f(&mut *guard))
    }

    pub fn list_nft(&self, caller: Address, asset: AssetKey, price: Amount) -> Result<()> {
        self.lock()?.list_nft(caller, asset, price)
    }

    pub fn purchase_nft(
        &self,
        caller: Address,
        asset: AssetKey,
        paid: Amount,
    ) -> Result<SoldItemRecord> {
        self.lock()?.purchase_nft(caller, asset, paid)
    }

    pub fn unlist_nft(&self, caller: Address, asset: AssetKey) -> Result<Listing> {
        self.lock()?.unlist_nft(caller, asset)
    }

    pub fn update_list_nft(&self, caller: Address, asset: AssetKey, price: Amount) -> Result<()> {
        self.lock()?.update_list_nft(caller, asset, price)
    }

    pub fn withdraw(&self, caller: Address) -> Result<Amount> {
        self.lock()?.withdraw(caller)
    }

    pub fn withdraw_revenue(&self, caller: Address) -> Result<Amount> {
        self.lock()?.withdraw_revenue(caller)
    }

    pub fn update_share(&self, caller: Address, new_percent: u32) -> Result<()> {
        self.lock()?.update_share(caller, new_percent)
    }

    pub fn calculate_share(&self, price: Amount) -> Result<Amount> {
        Ok(self.lock()?.calculate_share(price))
    }

    /// Snapshot of the sold-item ledger.
    pub fn sold_items(&self) -> Result<Vec<SoldItemRecord>> {
        Ok(self.lock()?.sold_items().to_vec())
    }

    pub fn listing(&self, asset: &AssetKey) -> Result<Option<Listing>> {
        Ok(self.lock()?.listing(asset).cloned())
    }

    pub fn proceeds(&self, seller: Address) -> Result<Amount> {
        Ok(self.lock()?.proceeds(seller))
    }

    pub fn revenue_pool(&self) -> Result<Amount> {
        Ok(self.lock()?.revenue_pool())
    }

    pub fn verify_conservation(&self) -> Result<()> {
        self.lock()?.verify_conservation()
    }
}
