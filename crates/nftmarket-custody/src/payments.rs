//! Value transfer substrate.
//!
//! Payouts (seller withdrawals and revenue withdrawals) leave the exchange
//! through [`ValueTransfer::credit_account`]. A failed payout must surface as
//! an error so the caller can restore the balance it zeroed.

use std::collections::{HashMap, HashSet};

use nftmarket_types::{Address, Amount, MarketError, Result};
use rust_decimal::Decimal;

/// Pays currency out to an account.
pub trait ValueTransfer {
    /// Credit `amount` to `to`.
    ///
    /// # Errors
    /// Returns [`MarketError::TransferFailed`] if the payment did not happen.
    /// Implementations must not partially apply a failed payment.
    fn credit_account(&mut self, to: Address, amount: Amount) -> Result<()>;
}

/// In-memory payment ledger.
///
/// Records every successful payout per account. Accounts can be marked as
/// rejecting to simulate receivers that refuse payment.
pub struct PaymentLedger {
    /// Total received per account.
    balances: HashMap<Address, Decimal>,
    /// Accounts whose payouts fail.
    rejecting: HashSet<Address>,
    /// Sum of all successful payouts.
    total_credited: Decimal,
}

impl PaymentLedger {
    /// Create a new empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
            rejecting: HashSet::new(),
            total_credited: Decimal::ZERO,
        }
    }

    /// Make every future payout to `account` fail.
    pub fn reject(&mut self, account: Address) {
        self.rejecting.insert(account);
    }

    /// Undo [`reject`](Self::reject).
    pub fn accept(&mut self, account: Address) {
        self.rejecting.remove(&account);
    }

    /// Total paid out to `account` so far.
    #[must_use]
    pub fn balance(&self, account: Address) -> Decimal {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    /// Sum of all payouts across accounts.
    #[must_use]
    pub fn total_credited(&self) -> Decimal {
        self.total_credited
    }
}

impl Default for PaymentLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueTransfer for PaymentLedger {
    fn credit_account(&mut self, to: Address, amount: Amount) -> Result<()> {
        if self.rejecting.contains(&to) {
            tracing::warn!(account = %to, amount = %amount, "Payout rejected by receiver");
            return Err(MarketError::TransferFailed {
                reason: format!("receiver {to} rejected payment of {amount}"),
            });
        }
        if amount <= Decimal::ZERO {
            return Err(MarketError::TransferFailed {
                reason: format!("payout amount must be positive, got {amount}"),
            });
        }

        let current = self.balance(to);
        let updated = current
            .checked_add(amount)
            .ok_or(MarketError::BalanceOverflow)?;
        let total = self
            .total_credited
            .checked_add(amount)
            .ok_or(MarketError::BalanceOverflow)?;

        self.balances.insert(to, updated);
        self.total_credited = total;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credit_increases_balance() {
        let mut ledger = PaymentLedger::new();
        let user = Address::random();
        ledger.credit_account(user, Decimal::new(1000, 0)).unwrap();
        ledger.credit_account(user, Decimal::new(500, 0)).unwrap();
        assert_eq!(ledger.balance(user), Decimal::new(1500, 0));
        assert_eq!(ledger.total_credited(), Decimal::new(1500, 0));
    }

    #[test]
    fn rejecting_account_fails_without_change() {
        let mut ledger = PaymentLedger::new();
        let user = Address::random();
        ledger.reject(user);
        let err = ledger.credit_account(user, Decimal::ONE).unwrap_err();
        assert!(matches!(err, MarketError::TransferFailed { .. }));
        assert_eq!(ledger.balance(user), Decimal::ZERO);
        assert_eq!(ledger.total_credited(), Decimal::ZERO);

        ledger.accept(user);
        ledger.credit_account(user, Decimal::ONE).unwrap();
        assert_eq!(ledger.balance(user), Decimal::ONE);
    }

    #[test]
    fn non_positive_amount_fails() {
        let mut ledger = PaymentLedger::new();
        let user = Address::random();
        assert!(ledger.credit_account(user, Decimal::ZERO).is_err());
        assert!(ledger.credit_account(user, Decimal::NEGATIVE_ONE).is_err());
    }

    #[test]
    fn overflow_is_reported() {
        let mut ledger = PaymentLedger::new();
        let user = Address::random();
        ledger.credit_account(user, Decimal::MAX).unwrap();
        let err = ledger.credit_account(user, Decimal::ONE).unwrap_err();
        assert!(matches!(err, MarketError::BalanceOverflow));
        assert_eq!(ledger.balance(user), Decimal::MAX);
    }

    #[test]
    fn unknown_account_is_zero() {
        let ledger = PaymentLedger::new();
        assert_eq!(ledger.balance(Address::random()), Decimal::ZERO);
    }
}
