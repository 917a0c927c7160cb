//! Platform revenue account.
//!
//! Owns the share percentage and the single revenue pool. The exchange
//! credits the platform's cut of every sale here; only the configured
//! operator may change the percentage or drain the pool.
//!
//! Withdrawal zeroes the pool **before** paying out, so a payout that calls
//! back into the exchange observes an empty pool. If the payout fails the
//! pool is restored and the error returned.

use nftmarket_custody::ValueTransfer;
use nftmarket_types::{Address, Amount, MarketConfig, MarketError, Result, SharePercent};
use rust_decimal::Decimal;

/// Share percentage plus the accumulated revenue pool.
#[derive(Debug, Clone)]
pub struct RevenueAccount {
    /// The only identity allowed to re-configure and withdraw.
    operator: Address,
    /// Current platform share.
    share: SharePercent,
    /// Revenue accumulated since the last withdrawal.
    pool: Amount,
    /// Sum of all successful revenue withdrawals.
    total_withdrawn: Amount,
}

impl RevenueAccount {
    #[must_use]
    pub fn new(operator: Address, share: SharePercent) -> Self {
        Self {
            operator,
            share,
            pool: Decimal::ZERO,
            total_withdrawn: Decimal::ZERO,
        }
    }

    #[must_use]
    pub fn from_config(config: &MarketConfig) -> Self {
        Self::new(config.operator, config.share_percent)
    }

    #[must_use]
    pub fn operator(&self) -> Address {
        self.operator
    }

    #[must_use]
    pub fn share_percent(&self) -> SharePercent {
        self.share
    }

    #[must_use]
    pub fn revenue_pool(&self) -> Amount {
        self.pool
    }

    #[must_use]
    pub fn total_withdrawn(&self) -> Amount {
        self.total_withdrawn
    }

    /// The platform's cut of `price` at the current percentage, rounded down.
    #[must_use]
    pub fn calculate_share(&self, price: Amount) -> Amount {
        self.share.of(price)
    }

    fn ensure_operator(&self, caller: Address) -> Result<()> {
        if caller == self.operator {
            Ok(())
        } else {
            Err(MarketError::Unauthorized(caller))
        }
    }

    /// Replace the share percentage. Takes effect for the next sale.
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is not the operator
    /// - `InvalidShare` if `new_percent` is outside `[1, 99]`
    pub fn update_share(&mut self, caller: Address, new_percent: u32) -> Result<()> {
        self.ensure_operator(caller)?;
        let share = SharePercent::new(new_percent)?;
        tracing::debug!(old = %self.share, new = %share, "Share percentage updated");
        self.share = share;
        Ok(())
    }

    /// Pay the whole pool out to the operator.
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is not the operator
    /// - `NoFunds` if the pool is empty
    /// - `TransferFailed` if the payout fails; the pool is left untouched
    pub fn withdraw_revenue<P>(&mut self, caller: Address, payments: &mut P) -> Result<Amount>
    where
        P: ValueTransfer + ?Sized,
    {
        self.ensure_operator(caller)?;
        if self.pool <= Decimal::ZERO {
            return Err(MarketError::NoFunds(caller));
        }

        let amount = self.pool;
        self.pool = Decimal::ZERO;

        if let Err(err) = payments.credit_account(caller, amount) {
            self.pool = amount;
            tracing::warn!(operator = %caller, amount = %amount, error = %err, "Revenue payout failed, pool restored");
            return Err(err);
        }

        self.total_withdrawn += amount;
        tracing::info!(operator = %caller, amount = %amount, "Revenue withdrawn");
        Ok(amount)
    }

    /// Check that `amount` can be added to the pool.
    pub(crate) fn ensure_can_credit(&self, amount: Amount) -> Result<()> {
        self.pool
            .checked_add(amount)
            .map(|_| ())
            .ok_or(MarketError::BalanceOverflow)
    }

    /// Add the platform's cut of a sale. Callers check
    /// [`ensure_can_credit`](Self::ensure_can_credit) first.
    pub(crate) fn credit_revenue(&mut self, amount: Amount) {
        self.pool += amount;
    }
}
