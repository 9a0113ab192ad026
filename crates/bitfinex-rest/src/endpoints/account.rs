//! Private account endpoints
//!
//! These endpoints require authentication.

use crate::client::TradingClient;
use crate::endpoints::market::normalize_symbol;
use crate::error::RestResult;
use crate::types::{to_params, BalanceHistoryQuery, MovementsQuery, PastTradesQuery};
use serde_json::{Map, Value};
use tracing::instrument;

/// Private account endpoints
pub struct AccountEndpoints<'a> {
    client: &'a TradingClient,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(client: &'a TradingClient) -> Self {
        Self { client }
    }

    /// Get account info (fee tiers per pair)
    #[instrument(skip(self))]
    pub async fn account_infos(&self) -> RestResult<Value> {
        self.client.signed_post("/v1/account_infos", Map::new()).await
    }

    /// Get wallet balances
    #[instrument(skip(self))]
    pub async fn balances(&self) -> RestResult<Value> {
        self.client.signed_post("/v1/balances", Map::new()).await
    }

    /// Get margin information
    #[instrument(skip(self))]
    pub async fn margin_infos(&self) -> RestResult<Value> {
        self.client.signed_post("/v1/margin_infos", Map::new()).await
    }

    /// Get active margin positions
    #[instrument(skip(self))]
    pub async fn positions(&self) -> RestResult<Value> {
        self.client.signed_post("/v1/positions", Map::new()).await
    }

    /// Get deposit/withdrawal history
    #[instrument(skip(self))]
    pub async fn movements(&self, query: &MovementsQuery) -> RestResult<Value> {
        let mut query = query.clone();
        query.currency = normalize_symbol(&query.currency)?;

        self.client
            .signed_post("/v1/history/movements", to_params(&query)?)
            .await
    }

    /// Get own trades for a pair
    #[instrument(skip(self))]
    pub async fn past_trades(&self, query: &PastTradesQuery) -> RestResult<Value> {
        let mut query = query.clone();
        query.symbol = normalize_symbol(&query.symbol)?;

        self.client.signed_post("/v1/mytrades", to_params(&query)?).await
    }

    /// Get balance ledger
    #[instrument(skip(self))]
    pub async fn balance_history(&self, query: &BalanceHistoryQuery) -> RestResult<Value> {
        let mut query = query.clone();
        query.currency = normalize_symbol(&query.currency)?;

        self.client.signed_post("/v1/history", to_params(&query)?).await
    }
}
