//! # nftmarket-types
//!
//! Shared types, errors, and configuration for the **NftMarket** exchange.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`Address`], [`TokenId`], [`AssetKey`], [`SaleId`]
//! - **Money**: [`Amount`], [`SharePercent`]
//! - **Listing model**: [`Listing`]
//! - **Sales ledger**: [`SoldItemRecord`]
//! - **Notifications**: [`MarketEvent`]
//! - **Configuration**: [`MarketConfig`]
//! - **Errors**: [`MarketError`] with `MK_ERR_` prefix codes
//! - **Constants**: share bounds and defaults

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod ids;
pub mod listing;
pub mod sale;
pub mod share;

pub use config::*;
pub use error::*;
pub use events::*;
pub use ids::*;
pub use listing::*;
pub use sale::*;
pub use share::*;

// Constants are accessed via `nftmarket_types::constants::FOO`
// (not re-exported to avoid name collisions).
