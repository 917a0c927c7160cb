//! Per-seller proceeds owed by the exchange.
//!
//! Balances only grow through sales and only shrink through
//! [`SellerProceeds::withdraw`], which zeroes the balance before the payout
//! and restores it if the payout fails.

use std::collections::HashMap;

use nftmarket_custody::ValueTransfer;
use nftmarket_types::{Address, Amount, MarketError, Result};
use rust_decimal::Decimal;

/// Amount owed to each seller.
#[derive(Debug, Default)]
pub struct SellerProceeds {
    owed: HashMap<Address, Amount>,
    total_withdrawn: Amount,
}

impl SellerProceeds {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Amount currently owed to `seller`.
    #[must_use]
    pub fn balance(&self, seller: Address) -> Amount {
        self.owed.get(&seller).copied().unwrap_or(Decimal::ZERO)
    }

    /// Sum owed across all sellers.
    pub fn total_owed(&self) -> Result<Amount> {
        self.owed
            .values()
            .try_fold(Decimal::ZERO, |acc, owed| acc.checked_add(*owed))
            .ok_or(MarketError::BalanceOverflow)
    }

    /// Sum of all successful seller withdrawals.
    #[must_use]
    pub fn total_withdrawn(&self) -> Amount {
        self.total_withdrawn
    }

    pub(crate) fn ensure_can_credit(&self, seller: Address, amount: Amount) -> Result<()> {
        self.balance(seller)
            .checked_add(amount)
            .map(|_| ())
            .ok_or(MarketError::BalanceOverflow)
    }

    /// Add sale proceeds. Callers check
    /// [`ensure_can_credit`](Self::ensure_can_credit) first.
    pub(crate) fn credit(&mut self, seller: Address, amount: Amount) {
        *self.owed.entry(seller).or_insert(Decimal::ZERO) += amount;
    }

    /// Pay everything owed to `caller` out through `payments`.
    ///
    /// # Errors
    /// - `NoFunds` if nothing is owed
    /// - `TransferFailed` if the payout fails; the balance is restored
    pub fn withdraw<P>(&mut self, caller: Address, payments: &mut P) -> Result<Amount>
    where
        P: ValueTransfer + ?Sized,
    {
        let amount = self.balance(caller);
        if amount <= Decimal::ZERO {
            return Err(MarketError::NoFunds(caller));
        }

        // Zero before paying out.
        self.owed.remove(&caller);

        if let Err(err) = payments.credit_account(caller, amount) {
            self.owed.insert(caller, amount);
            tracing::warn!(seller = %caller, amount = %amount, error = %err, "Proceeds payout failed, balance restored");
            return Err(err);
        }

        self.total_withdrawn += amount;
        Ok(amount)
    }
}
