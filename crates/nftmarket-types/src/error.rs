//! Error types for the NftMarket exchange.
//!
//! All errors use the `MK_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Listing errors
//! - 2xx: Price errors
//! - 3xx: Funds / transfer errors
//! - 4xx: Operator / revenue errors
//! - 8xx: Safety invariant errors
//! - 9xx: General / internal errors
//!
//! Every error is local and non-retryable: the failing operation leaves the
//! exchange exactly as it found it.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{Address, AssetKey};

/// Central error enum for all NftMarket operations.
#[derive(Debug, Error)]
pub enum MarketError {
    // =================================================================
    // Listing Errors (1xx)
    // =================================================================
    /// The asset already has an active listing.
    #[error("MK_ERR_100: Asset already listed: {0}")]
    AlreadyListed(AssetKey),

    /// The asset has no active listing.
    #[error("MK_ERR_101: Asset not listed: {0}")]
    NotListed(AssetKey),

    /// The caller does not own the asset (listing) or is not the listing's
    /// seller (un-list / re-price).
    #[error("MK_ERR_102: {caller} is not the owner of {asset}")]
    NotOwner { caller: Address, asset: AssetKey },

    /// The exchange is not approved to transfer the asset.
    #[error("MK_ERR_103: Exchange not approved to transfer {0}")]
    NotApproved(AssetKey),

    // =================================================================
    // Price Errors (2xx)
    // =================================================================
    /// Listing price must be strictly positive.
    #[error("MK_ERR_200: Price too low: {price}")]
    PriceTooLow { price: Decimal },

    /// Payment does not cover the listed price.
    #[error("MK_ERR_201: Payment {paid} does not cover price {price}")]
    PriceNotEnough { price: Decimal, paid: Decimal },

    /// Amounts are whole smallest-currency units.
    #[error("MK_ERR_202: Amount {0} is not a whole number of units")]
    InvalidAmount(Decimal),

    // =================================================================
    // Funds / Transfer Errors (3xx)
    // =================================================================
    /// Nothing to withdraw for this account.
    #[error("MK_ERR_300: No funds to withdraw for {0}")]
    NoFunds(Address),

    /// The underlying asset or value transfer failed.
    #[error("MK_ERR_301: Transfer failed: {reason}")]
    TransferFailed { reason: String },

    /// Crediting a balance would exceed the representable range.
    #[error("MK_ERR_302: Balance overflow")]
    BalanceOverflow,

    // =================================================================
    // Operator / Revenue Errors (4xx)
    // =================================================================
    /// A non-operator called an operator-only operation.
    #[error("MK_ERR_400: {0} is not the operator")]
    Unauthorized(Address),

    /// Share percentage outside `[1, 99]`.
    #[error("MK_ERR_401: Invalid share percentage: {0}")]
    InvalidShare(u32),

    // =================================================================
    // Safety Errors (8xx)
    // =================================================================
    /// Value conservation invariant violated: critical safety alert.
    #[error("MK_ERR_800: Value invariant violation: {reason}")]
    ValueInvariantViolation { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("MK_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("MK_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid config file, missing fields, etc.).
    #[error("MK_ERR_902: Configuration error: {0}")]
    Configuration(String),

    /// Malformed address string.
    #[error("MK_ERR_903: Invalid address: {0}")]
    InvalidAddress(String),

    /// I/O error (config file access).
    #[error("MK_ERR_904: I/O error: {0}")]
    Io(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, MarketError>;

impl From<std::io::Error> for MarketError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MarketError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
