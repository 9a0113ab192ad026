//! REST API client for the Bitfinex cryptocurrency exchange (v1 API)
//!
//! # Features
//!
//! - **Market Data**: Ticker, stats, order book, trades, lend book, symbols
//! - **Account**: Account info, balances, margin info, positions, history
//! - **Trading**: Place, cancel and query orders
//! - **Funding**: Deposit addresses and withdrawals
//!
//! Responses are returned as `serde_json::Value`, exactly as the exchange sent them.
//!
//! # Authentication
//!
//! Private endpoints are signed with HMAC-SHA384 over a base64 JSON payload,
//! see [`bitfinex_auth`]. Nonces are strictly increasing per client.
//!
//! # Example
//!
//! ```no_run
//! use bitfinex_rest::{Credentials, PublicClient, TradingClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = PublicClient::new()?;
//!     let ticker = client.ticker("btcusd").await?;
//!     println!("BTC/USD: {}", ticker);
//!
//!     // Private endpoints (auth required)
//!     let creds = Credentials::from_env()?;
//!     let trading = TradingClient::new(creds)?;
//!     let balances = trading.balances().await?;
//!     println!("Balances: {}", balances);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Every call maps to exactly one request. Failures are never retried:
//! - [`RestError::Transport`]: network failure or timeout
//! - [`RestError::Remote`]: non-2xx status or an `error` field in the body
//! - [`RestError::Auth`]: signature/nonce/key rejected (also counts as remote)
//! - [`RestError::Decode`]: 2xx body that is not JSON

pub mod client;
pub mod error;
pub mod endpoints;
pub mod types;
mod response;

// Re-export main types
pub use client::{ClientConfig, PublicClient, TradingClient, DEFAULT_BASE_URL};
pub use error::{RestError, RestResult};
pub use bitfinex_auth::{AuthError, Credentials};

// Re-export request types
pub use types::{
    // Market data
    BookParams, LendsParams, TradesParams,
    // Trading
    NewOrder, OrderSide, OrderType,
    // Funding
    DepositRequest, WalletType, WithdrawRequest,
    // History
    BalanceHistoryQuery, MovementsQuery, PastTradesQuery,
};
