//! # nftmarket-exchange
//!
//! **Fixed-price exchange for non-fungible assets.**
//!
//! Sellers list assets they own and have approved the exchange to move.
//! Buyers pay at least the listed price; the exchange moves the asset,
//! keeps the platform's share in a revenue pool and owes the rest to the
//! seller until they withdraw.
//!
//! - **All-or-nothing**: a failed operation leaves no partial effects
//! - **Pull payments**: sellers and the operator withdraw, nobody is pushed value
//! - **Value conservation**: every unit received is owed or paid out

pub mod conservation;
pub mod exchange;
pub mod listing_book;
pub mod proceeds;
pub mod revenue;
pub mod shared;

pub use conservation::ValueConservation;
pub use exchange::Exchange;
pub use listing_book::ListingBook;
pub use proceeds::SellerProceeds;
pub use revenue::RevenueAccount;
pub use shared::SharedExchange;
