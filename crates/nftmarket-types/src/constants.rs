//! System-wide constants for the NftMarket exchange.

/// Platform share applied when a configuration does not name one.
pub const DEFAULT_SHARE_PERCENT: u32 = 10;

/// Smallest share percentage the operator may configure.
pub const MIN_SHARE_PERCENT: u32 = 1;

/// Largest share percentage the operator may configure.
pub const MAX_SHARE_PERCENT: u32 = 99;

/// Shares are expressed in whole percent of the paid amount.
pub const SHARE_DENOMINATOR: u32 = 100;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "NftMarket";
