//! Endpoint groups
//!
//! `market` borrows a [`PublicClient`](crate::PublicClient); the private
//! groups borrow a [`TradingClient`](crate::TradingClient) and sign every call.

pub mod account;
pub mod funding;
pub mod market;
pub mod trading;

pub use account::AccountEndpoints;
pub use funding::FundingEndpoints;
pub use market::MarketEndpoints;
pub use trading::TradingEndpoints;
