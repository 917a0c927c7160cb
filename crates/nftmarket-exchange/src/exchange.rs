//! The exchange state machine.
//!
//! Per asset: **Unlisted → Listed → Unlisted** (by sale or un-list);
//! re-pricing is a `Listed → Listed` self-transition.
//!
//! ## Purchase
//!
//! 1. Validate the listing and payment
//! 2. Pre-compute the revenue split and check both credits fit
//! 3. Remove the listing
//! 4. Ask the registry to move the asset seller → buyer; on failure the
//!    listing is put back and nothing else has changed
//! 5. Credit the seller `paid - share` and the pool `share`
//! 6. Append the sold-item record and emit `ItemTransferred`
//!
//! Every operation either applies all of its effects or returns an error
//! with the exchange unchanged.

use nftmarket_custody::{AssetRegistry, ValueTransfer};
use nftmarket_types::{
    constants, Address, Amount, AssetKey, Listing, MarketConfig, MarketError, MarketEvent, Result,
    SharePercent, SoldItemRecord,
};
use rust_decimal::Decimal;

use crate::conservation::ValueConservation;
use crate::listing_book::ListingBook;
use crate::proceeds::SellerProceeds;
use crate::revenue::RevenueAccount;

/// Fixed-price exchange backed by one [`RevenueAccount`].
pub struct Exchange<R, P> {
    config: MarketConfig,
    revenue: RevenueAccount,
    listings: ListingBook,
    proceeds: SellerProceeds,
    /// Append-only, never pruned.
    sold_items: Vec<SoldItemRecord>,
    conservation: ValueConservation,
    /// Notifications not yet drained by the caller.
    events: Vec<MarketEvent>,
    registry: R,
    payments: P,
}

impl<R, P> Exchange<R, P>
where
    R: AssetRegistry,
    P: ValueTransfer,
{
    /// Build an exchange from a validated config and its collaborators.
    pub fn new(config: MarketConfig, registry: R, payments: P) -> Result<Self> {
        config.validate()?;
        tracing::info!(
            engine = constants::ENGINE_NAME,
            version = constants::VERSION,
            exchange = %config.exchange,
            operator = %config.operator,
            share = %config.share_percent,
            "Exchange created"
        );
        Ok(Self {
            revenue: RevenueAccount::from_config(&config),
            config,
            listings: ListingBook::new(),
            proceeds: SellerProceeds::new(),
            sold_items: Vec::new(),
            conservation: ValueConservation::new(),
            events: Vec::new(),
            registry,
            payments,
        })
    }

    // =================================================================
    // Listing
    // =================================================================

    /// List `asset` for sale at `price`.
    ///
    /// # Errors
    /// - `NotOwner` if the registry does not report `caller` as the owner
    /// - `NotApproved` if the exchange may not transfer the asset
    /// - `PriceTooLow` if `price <= 0`
    /// - `InvalidAmount` if `price` has a fractional part
    /// - `AlreadyListed` if the asset already has a listing
    pub fn list_nft(&mut self, caller: Address, asset: AssetKey, price: Amount) -> Result<()> {
        if self.registry.owner_of(&asset) != Some(caller) {
            return Err(MarketError::NotOwner { caller, asset });
        }
        if !self
            .registry
            .is_approved_for_transfer(&asset, self.config.exchange)
        {
            return Err(MarketError::NotApproved(asset));
        }
        if price <= Decimal::ZERO {
            return Err(MarketError::PriceTooLow { price });
        }
        ensure_whole_units(price)?;

        self.listings.insert(asset, Listing::new(caller, price))?;

        tracing::info!(seller = %caller, asset = %asset, price = %price, "Item listed");
        self.events.push(MarketEvent::ItemListed {
            seller: caller,
            asset,
            price,
        });
        Ok(())
    }

    /// Withdraw the listing for `asset`. Returns the removed listing.
    ///
    /// # Errors
    /// - `NotListed` if there is no listing
    /// - `NotOwner` if `caller` is not the listing's seller
    pub fn unlist_nft(&mut self, caller: Address, asset: AssetKey) -> Result<Listing> {
        self.ensure_seller(caller, &asset)?;
        let listing = self.listings.remove(&asset)?;

        tracing::debug!(seller = %caller, asset = %asset, "Item unlisted");
        self.events.push(MarketEvent::ItemUnlisted {
            seller: caller,
            asset,
        });
        Ok(listing)
    }

    /// Change the price of an existing listing. Emits `ItemListed` with the
    /// new price.
    ///
    /// # Errors
    /// - `NotListed` if there is no listing
    /// - `NotOwner` if `caller` is not the listing's seller
    /// - `PriceTooLow` if `new_price <= 0`
    /// - `InvalidAmount` if `new_price` has a fractional part
    pub fn update_list_nft(
        &mut self,
        caller: Address,
        asset: AssetKey,
        new_price: Amount,
    ) -> Result<()> {
        self.ensure_seller(caller, &asset)?;
        if new_price <= Decimal::ZERO {
            return Err(MarketError::PriceTooLow { price: new_price });
        }
        ensure_whole_units(new_price)?;

        self.listings.reprice(&asset, new_price)?;

        tracing::debug!(seller = %caller, asset = %asset, price = %new_price, "Item re-priced");
        self.events.push(MarketEvent::ItemListed {
            seller: caller,
            asset,
            price: new_price,
        });
        Ok(())
    }

    fn ensure_seller(&self, caller: Address, asset: &AssetKey) -> Result<()> {
        let listing = self
            .listings
            .get(asset)
            .ok_or(MarketError::NotListed(*asset))?;
        if listing.is_seller(caller) {
            Ok(())
        } else {
            Err(MarketError::NotOwner {
                caller,
                asset: *asset,
            })
        }
    }

    // =================================================================
    // Purchase
    // =================================================================

    /// Buy `asset` for `paid`. Overpayment is accepted and kept: the full
    /// `paid` amount is the sale price and is split between seller and pool.
    ///
    /// # Errors
    /// - `NotListed` if there is no listing
    /// - `InvalidAmount` if `paid` has a fractional part
    /// - `PriceNotEnough` if `paid` is below the listed price
    /// - `BalanceOverflow` if a credit or the received total would overflow
    /// - `TransferFailed` if the registry refuses the transfer
    pub fn purchase_nft(
        &mut self,
        caller: Address,
        asset: AssetKey,
        paid: Amount,
    ) -> Result<SoldItemRecord> {
        let listing = self
            .listings
            .get(&asset)
            .ok_or(MarketError::NotListed(asset))?;
        ensure_whole_units(paid)?;
        if !listing.accepts(paid) {
            return Err(MarketError::PriceNotEnough {
                price: listing.price,
                paid,
            });
        }
        let seller = listing.seller;

        let share = self.revenue.calculate_share(paid);
        let seller_cut = paid - share;
        self.proceeds.ensure_can_credit(seller, seller_cut)?;
        self.revenue.ensure_can_credit(share)?;
        self.conservation.ensure_can_record_sale(paid)?;

        let listing = self.listings.remove(&asset)?;
        if let Err(err) = self
            .registry
            .transfer(&asset, self.config.exchange, seller, caller)
        {
            tracing::warn!(
                asset = %asset,
                seller = %seller,
                buyer = %caller,
                error = %err,
                "Asset transfer failed, purchase rolled back"
            );
            self.listings.insert(asset, listing)?;
            return Err(match err {
                MarketError::TransferFailed { .. } => err,
                other => MarketError::TransferFailed {
                    reason: other.to_string(),
                },
            });
        }

        // Checked above; cannot fail from here on.
        self.conservation.record_sale(paid)?;
        self.proceeds.credit(seller, seller_cut);
        self.revenue.credit_revenue(share);

        let sequence = self.sold_items.len() as u64;
        let record = SoldItemRecord::new(sequence, asset, paid, seller, caller);
        self.sold_items.push(record.clone());

        tracing::info!(
            sale = %record.sale_id,
            asset = %asset,
            seller = %seller,
            buyer = %caller,
            paid = %paid,
            share = %share,
            "Item sold"
        );
        self.events.push(MarketEvent::ItemTransferred {
            buyer: caller,
            asset,
        });
        Ok(record)
    }

    // =================================================================
    // Withdrawals
    // =================================================================

    /// Pay `caller` everything they are owed from sales.
    ///
    /// # Errors
    /// - `NoFunds` if nothing is owed
    /// - `TransferFailed` if the payout fails; the balance is restored
    pub fn withdraw(&mut self, caller: Address) -> Result<Amount> {
        let amount = self.proceeds.withdraw(caller, &mut self.payments)?;
        self.conservation.record_payout(amount)?;

        tracing::info!(seller = %caller, amount = %amount, "Proceeds withdrawn");
        self.events.push(MarketEvent::ProceedsWithdrawn {
            seller: caller,
            amount,
        });
        Ok(amount)
    }

    /// Operator-only: pay out the whole revenue pool.
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is not the operator
    /// - `NoFunds` if the pool is empty
    /// - `TransferFailed` if the payout fails; the pool is restored
    pub fn withdraw_revenue(&mut self, caller: Address) -> Result<Amount> {
        let amount = self.revenue.withdraw_revenue(caller, &mut self.payments)?;
        self.conservation.record_payout(amount)?;

        self.events.push(MarketEvent::RevenueWithdrawn {
            operator: caller,
            amount,
        });
        Ok(amount)
    }

    /// Operator-only: change the platform share for future sales.
    pub fn update_share(&mut self, caller: Address, new_percent: u32) -> Result<()> {
        self.revenue.update_share(caller, new_percent)?;
        self.config.share_percent = self.revenue.share_percent();
        Ok(())
    }

    // =================================================================
    // Queries
    // =================================================================

    /// The platform's cut of `price` at the current percentage.
    #[must_use]
    pub fn calculate_share(&self, price: Amount) -> Amount {
        self.revenue.calculate_share(price)
    }

    /// Every sale so far, oldest first.
    #[must_use]
    pub fn sold_items(&self) -> &[SoldItemRecord] {
        &self.sold_items
    }

    #[must_use]
    pub fn listing(&self, asset: &AssetKey) -> Option<&Listing> {
        self.listings.get(asset)
    }

    #[must_use]
    pub fn is_listed(&self, asset: &AssetKey) -> bool {
        self.listings.contains(asset)
    }

    #[must_use]
    pub fn listings(&self) -> &ListingBook {
        &self.listings
    }

    /// Amount owed to `seller`.
    #[must_use]
    pub fn proceeds(&self, seller: Address) -> Amount {
        self.proceeds.balance(seller)
    }

    #[must_use]
    pub fn revenue_pool(&self) -> Amount {
        self.revenue.revenue_pool()
    }

    #[must_use]
    pub fn share_percent(&self) -> SharePercent {
        self.revenue.share_percent()
    }

    #[must_use]
    pub fn revenue(&self) -> &RevenueAccount {
        &self.revenue
    }

    #[must_use]
    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// The exchange's own address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.config.exchange
    }

    /// Events not yet drained.
    #[must_use]
    pub fn events(&self) -> &[MarketEvent] {
        &self.events
    }

    /// Take all pending events.
    pub fn drain_events(&mut self) -> Vec<MarketEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Direct registry access for the embedding host (minting, approvals).
    pub fn registry_mut(&mut self) -> &mut R {
        &mut self.registry
    }

    #[must_use]
    pub fn payments(&self) -> &P {
        &self.payments
    }

    pub fn payments_mut(&mut self) -> &mut P {
        &mut self.payments
    }

    /// Check that held balances account for every unit received.
    pub fn verify_conservation(&self) -> Result<()> {
        let held = self
            .proceeds
            .total_owed()?
            .checked_add(self.revenue.revenue_pool())
            .ok_or(MarketError::BalanceOverflow)?;
        self.conservation.verify(held)
    }
}

fn ensure_whole_units(amount: Amount) -> Result<()> {
    if amount.fract().is_zero() {
        Ok(())
    } else {
        Err(MarketError::InvalidAmount(amount))
    }
}
