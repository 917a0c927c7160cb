//! # nftmarket-custody
//!
//! **Custody boundary**: the two external collaborators the exchange relies
//! on but does not own.
//!
//! 1. **AssetRegistry**: tracks ownership of each non-fungible asset and who
//!    may transfer it on the owner's behalf
//! 2. **ValueTransfer**: pays out currency to an account
//!
//! Both are traits so a host can plug in its own substrate. The in-memory
//! implementations here back the test suites and embedders that need a
//! self-contained exchange.
//!
//! ```text
//! Exchange ──owner_of / is_approved_for_transfer / transfer──▶ AssetRegistry
//! Exchange ──credit_account───────────────────────────────────▶ ValueTransfer
//! ```

pub mod payments;
pub mod registry;

pub use payments::{PaymentLedger, ValueTransfer};
pub use registry::{AssetRegistry, InMemoryAssetRegistry};
