//! Configuration for a single exchange instance.
//!
//! One [`MarketConfig`] is owned by one exchange; there is no process-wide
//! state. The operator capability is supplied here: only the configured
//! `operator` may re-configure the share or withdraw the revenue pool.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Address, MarketError, SharePercent};

/// Configuration for an exchange instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketConfig {
    /// The exchange's own address, checked against asset-registry approvals.
    pub exchange: Address,
    /// The privileged identity that owns the revenue pool.
    pub operator: Address,
    /// Platform share of each sale.
    #[serde(default)]
    pub share_percent: SharePercent,
}

impl MarketConfig {
    /// Config with the default share percentage.
    #[must_use]
    pub fn new(exchange: Address, operator: Address) -> Self {
        Self {
            exchange,
            operator,
            share_percent: SharePercent::default(),
        }
    }

    #[must_use]
    pub fn with_share(mut self, share_percent: SharePercent) -> Self {
        self.share_percent = share_percent;
        self
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> crate::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Reject configs that can never operate correctly.
    ///
    /// The share range is already enforced by [`SharePercent`].
    pub fn validate(&self) -> crate::Result<()> {
        if self.exchange.is_zero() {
            return Err(MarketError::Configuration(
                "exchange address must not be zero".into(),
            ));
        }
        if self.operator.is_zero() {
            return Err(MarketError::Configuration(
                "operator address must not be zero".into(),
            ));
        }
        if self.exchange == self.operator {
            return Err(MarketError::Configuration(
                "exchange and operator must be distinct".into(),
            ));
        }
        Ok(())
    }
}
