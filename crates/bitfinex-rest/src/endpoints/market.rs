//! Public market data endpoints
//!
//! These endpoints don't require authentication.

use crate::client::PublicClient;
use crate::error::{RestError, RestResult};
use crate::types::{BookParams, LendsParams, TradesParams};
use serde_json::Value;
use tracing::instrument;

const NO_QUERY: &[(&str, &str)] = &[];

/// Public market data endpoints
pub struct MarketEndpoints<'a> {
    client: &'a PublicClient,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(client: &'a PublicClient) -> Self {
        Self { client }
    }

    /// Get ticker
    ///
    /// # Arguments
    /// * `symbol` - Trading pair (e.g. "btcusd")
    #[instrument(skip(self))]
    pub async fn ticker(&self, symbol: &str) -> RestResult<Value> {
        let path = symbol_path("pubticker", symbol)?;
        self.client.get(&path, NO_QUERY).await
    }

    /// Get 24h/7d/30d volume statistics
    #[instrument(skip(self))]
    pub async fn stats(&self, symbol: &str) -> RestResult<Value> {
        let path = symbol_path("stats", symbol)?;
        self.client.get(&path, NO_QUERY).await
    }

    /// Get order book
    ///
    /// # Arguments
    /// * `symbol` - Trading pair (e.g. "btcusd")
    /// * `params` - Depth limits and grouping
    #[instrument(skip(self))]
    pub async fn order_book(&self, symbol: &str, params: &BookParams) -> RestResult<Value> {
        let path = symbol_path("book", symbol)?;
        self.client.get(&path, params).await
    }

    /// Get recent trades
    ///
    /// # Arguments
    /// * `symbol` - Trading pair (e.g. "btcusd")
    /// * `params` - Start timestamp and count limit
    #[instrument(skip(self))]
    pub async fn trades(&self, symbol: &str, params: &TradesParams) -> RestResult<Value> {
        let path = symbol_path("trades", symbol)?;
        self.client.get(&path, params).await
    }

    /// Get funding book
    ///
    /// # Arguments
    /// * `currency` - Currency (e.g. "usd")
    /// * `params` - Depth limits; `group` is ignored by the exchange
    #[instrument(skip(self))]
    pub async fn lend_book(&self, currency: &str, params: &BookParams) -> RestResult<Value> {
        let path = symbol_path("lendbook", currency)?;
        self.client.get(&path, params).await
    }

    /// Get recent funding rate snapshots
    #[instrument(skip(self))]
    pub async fn lends(&self, currency: &str, params: &LendsParams) -> RestResult<Value> {
        let path = symbol_path("lends", currency)?;
        self.client.get(&path, params).await
    }

    /// List trading pairs
    #[instrument(skip(self))]
    pub async fn symbols(&self) -> RestResult<Value> {
        self.client.get("/v1/symbols", NO_QUERY).await
    }

    /// List trading pairs with precision and size limits
    #[instrument(skip(self))]
    pub async fn symbol_details(&self) -> RestResult<Value> {
        self.client.get("/v1/symbols_details", NO_QUERY).await
    }
}

/// `/v1/{endpoint}/{symbol}` with the symbol lower-cased
fn symbol_path(endpoint: &str, symbol: &str) -> RestResult<String> {
    Ok(format!("/v1/{}/{}", endpoint, normalize_symbol(symbol)?))
}

/// Lower-case and validate a pair or currency code
pub(crate) fn normalize_symbol(symbol: &str) -> RestResult<String> {
    let symbol = symbol.trim();
    if symbol.is_empty() || !symbol.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(RestError::InvalidParameter(format!(
            "symbol must be non-empty ASCII alphanumerics, got {:?}",
            symbol
        )));
    }
    Ok(symbol.to_ascii_lowercase())
}
