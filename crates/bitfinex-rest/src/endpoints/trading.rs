//! Trading endpoints for order management
//!
//! These endpoints require authentication.

use crate::client::TradingClient;
use crate::endpoints::market::normalize_symbol;
use crate::error::{RestError, RestResult};
use crate::types::{to_params, NewOrder};
use serde_json::{json, Map, Value};
use tracing::{debug, instrument};

/// Trading endpoints for order management
pub struct TradingEndpoints<'a> {
    client: &'a TradingClient,
}

impl<'a> TradingEndpoints<'a> {
    pub fn new(client: &'a TradingClient) -> Self {
        Self { client }
    }

    /// Get open orders
    #[instrument(skip(self))]
    pub async fn active_orders(&self) -> RestResult<Value> {
        self.client.signed_post("/v1/orders", Map::new()).await
    }

    /// Submit a new order
    ///
    /// The order is validated locally first; nothing is sent if it fails.
    #[instrument(
        skip(self, order),
        fields(symbol = %order.symbol, side = %order.side, order_type = %order.order_type)
    )]
    pub async fn new_order(&self, order: &NewOrder) -> RestResult<Value> {
        order.validate()?;
        let mut order = order.clone();
        order.symbol = normalize_symbol(&order.symbol)?;

        debug!(amount = %order.amount, price = %order.price, "Submitting order");

        self.client.signed_post("/v1/order/new", to_params(&order)?).await
    }

    /// Cancel an order by id
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: u64) -> RestResult<Value> {
        self.client
            .signed_post("/v1/order/cancel", id_param("order_id", json!(order_id)))
            .await
    }

    /// Cancel several orders by id
    #[instrument(skip(self))]
    pub async fn cancel_orders(&self, order_ids: &[u64]) -> RestResult<Value> {
        if order_ids.is_empty() {
            return Err(RestError::InvalidParameter(
                "at least one order id is required".to_string(),
            ));
        }

        self.client
            .signed_post("/v1/order/cancel/multi", id_param("order_ids", json!(order_ids)))
            .await
    }

    /// Cancel all open orders
    #[instrument(skip(self))]
    pub async fn cancel_all_orders(&self) -> RestResult<Value> {
        self.client.signed_post("/v1/order/cancel/all", Map::new()).await
    }

    /// Get the status of an order
    #[instrument(skip(self))]
    pub async fn order_status(&self, order_id: u64) -> RestResult<Value> {
        self.client
            .signed_post("/v1/order/status", id_param("order_id", json!(order_id)))
            .await
    }
}

fn id_param(name: &str, value: Value) -> Map<String, Value> {
    let mut params = Map::new();
    params.insert(name.to_string(), value);
    params
}
