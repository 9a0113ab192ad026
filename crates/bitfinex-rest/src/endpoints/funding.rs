//! Funding endpoints (deposits and withdrawals)
//!
//! These endpoints require authentication.

use crate::client::TradingClient;
use crate::error::RestResult;
use crate::types::{to_params, DepositRequest, WithdrawRequest};
use serde_json::Value;
use tracing::{info, instrument};

/// Funding endpoints for deposits and withdrawals
pub struct FundingEndpoints<'a> {
    client: &'a TradingClient,
}

impl<'a> FundingEndpoints<'a> {
    pub fn new(client: &'a TradingClient) -> Self {
        Self { client }
    }

    /// Get (or renew) a deposit address
    #[instrument(skip(self))]
    pub async fn deposit_address(&self, request: &DepositRequest) -> RestResult<Value> {
        request.validate()?;
        self.client
            .signed_post("/v1/deposit/new", to_params(request)?)
            .await
    }

    /// Request a withdrawal
    #[instrument(
        skip(self, request),
        fields(withdraw_type = %request.withdraw_type, amount = %request.amount)
    )]
    pub async fn withdraw(&self, request: &WithdrawRequest) -> RestResult<Value> {
        request.validate()?;
        info!("Requesting withdrawal");
        self.client.signed_post("/v1/withdraw", to_params(request)?).await
    }
}
