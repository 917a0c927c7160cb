//! Value conservation invariant checker.
//!
//! Invariant that must hold after every operation:
//! ```text
//! Σ(sold_price) == Σ(seller balances) + revenue pool + Σ(payouts)
//! ```
//!
//! Every unit a buyer pays is either still owed to someone or has been paid
//! out. If this ever breaks, value was created or destroyed by the split.

use nftmarket_types::{Amount, MarketError, Result};
use rust_decimal::Decimal;

/// Running totals of value entering and leaving the exchange.
#[derive(Debug, Default)]
pub struct ValueConservation {
    /// Sum of all purchase payments.
    received: Amount,
    /// Sum of all successful payouts (sellers and operator).
    paid_out: Amount,
}

impl ValueConservation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that a payment of `paid` can be added to the running total.
    pub fn ensure_can_record_sale(&self, paid: Amount) -> Result<()> {
        self.received
            .checked_add(paid)
            .map(|_| ())
            .ok_or(MarketError::BalanceOverflow)
    }

    /// Record a purchase payment.
    pub fn record_sale(&mut self, paid: Amount) -> Result<()> {
        self.received = self
            .received
            .checked_add(paid)
            .ok_or(MarketError::BalanceOverflow)?;
        Ok(())
    }

    /// Record a successful payout. Payouts never exceed what was received.
    pub fn record_payout(&mut self, amount: Amount) -> Result<()> {
        self.paid_out = self
            .paid_out
            .checked_add(amount)
            .ok_or(MarketError::BalanceOverflow)?;
        Ok(())
    }

    /// Value the exchange should currently hold: received - paid out.
    #[must_use]
    pub fn expected_held(&self) -> Amount {
        self.received - self.paid_out
    }

    #[must_use]
    pub fn total_received(&self) -> Amount {
        self.received
    }

    #[must_use]
    pub fn total_paid_out(&self) -> Amount {
        self.paid_out
    }

    /// Verify that the balances the exchange holds (`seller balances +
    /// revenue pool`) match what it received minus what it paid out.
    ///
    /// # Errors
    /// Returns [`MarketError::ValueInvariantViolation`] if actual ≠ expected.
    pub fn verify(&self, actual_held: Amount) -> Result<()> {
        let expected = self.expected_held();
        if actual_held != expected {
            return Err(MarketError::ValueInvariantViolation {
                reason: format!(
                    "held {actual_held} != expected {expected} \
                     (received={}, paid_out={})",
                    self.received, self.paid_out,
                ),
            });
        }
        if actual_held < Decimal::ZERO {
            return Err(MarketError::ValueInvariantViolation {
                reason: format!("negative holdings: {actual_held}"),
            });
        }
        Ok(())
    }
}
