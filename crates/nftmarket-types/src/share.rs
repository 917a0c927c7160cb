//! Amounts and the platform share percentage.
//!
//! Every sale is split between the seller and the platform revenue pool.
//! The platform's cut is `floor(paid * pct / 100)`; the seller absorbs the
//! rounding remainder, so `share + (paid - share) == paid` always holds and
//! no value is created or destroyed by truncation.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{MarketError, constants};

/// A currency amount, denominated in the smallest currency unit.
pub type Amount = Decimal;

/// The platform's share of each sale, in whole percent.
///
/// Only values in `[MIN_SHARE_PERCENT, MAX_SHARE_PERCENT]` can be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct SharePercent(u8);

impl SharePercent {
    /// Validate and wrap a percentage.
    ///
    /// # Errors
    /// Returns [`MarketError::InvalidShare`] outside `[1, 99]`.
    pub fn new(percent: u32) -> crate::Result<Self> {
        if !(constants::MIN_SHARE_PERCENT..=constants::MAX_SHARE_PERCENT).contains(&percent) {
            return Err(MarketError::InvalidShare(percent));
        }
        let pct = u8::try_from(percent).map_err(|_| MarketError::InvalidShare(percent))?;
        Ok(Self(pct))
    }

    #[must_use]
    pub fn get(self) -> u32 {
        u32::from(self.0)
    }

    /// The platform's cut of `price`: `floor(price * pct / 100)`.
    ///
    /// Splits `price` into whole hundreds and a remainder first so the
    /// intermediate product never exceeds `price`. Defined for non-negative
    /// amounts.
    #[must_use]
    pub fn of(self, price: Amount) -> Amount {
        let denominator = Decimal::from(constants::SHARE_DENOMINATOR);
        let pct = Decimal::from(self.0);
        let hundreds = (price / denominator).trunc();
        let remainder = price - hundreds * denominator;
        hundreds * pct + (remainder * pct / denominator).floor()
    }
}

impl SharePercent {
    #[allow(clippy::cast_possible_truncation)]
    const DEFAULT: Self = {
        assert!(
            constants::DEFAULT_SHARE_PERCENT >= constants::MIN_SHARE_PERCENT
                && constants::DEFAULT_SHARE_PERCENT <= constants::MAX_SHARE_PERCENT
        );
        Self(constants::DEFAULT_SHARE_PERCENT as u8)
    };
}

impl Default for SharePercent {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for SharePercent {
    type Error = MarketError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SharePercent> for u32 {
    fn from(share: SharePercent) -> Self {
        share.get()
    }
}

impl fmt::Display for SharePercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
