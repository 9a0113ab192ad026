//! Typed request parameters
//!
//! Responses are passed through as `serde_json::Value`; only the requests are
//! typed so that callers get compile-time help building them.

use crate::error::{RestError, RestResult};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Serialize a parameter struct into the map that gets signed
pub(crate) fn to_params<T: Serialize>(params: &T) -> RestResult<Map<String, Value>> {
    match serde_json::to_value(params) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(RestError::InvalidParameter(format!(
            "parameters must serialize to an object, got {}",
            other
        ))),
        Err(e) => Err(RestError::InvalidParameter(e.to_string())),
    }
}

/// Bitfinex encodes boolean query flags as 0/1
fn flag<S: Serializer>(value: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.serialize_u8(u8::from(*v)),
        None => serializer.serialize_none(),
    }
}

fn require_positive(name: &str, value: Decimal) -> RestResult<()> {
    if value <= Decimal::ZERO {
        return Err(RestError::InvalidParameter(format!(
            "{} must be positive, got {}",
            name, value
        )));
    }
    Ok(())
}

fn require_non_empty(name: &str, value: &str) -> RestResult<()> {
    if value.trim().is_empty() {
        return Err(RestError::InvalidParameter(format!("{} must not be empty", name)));
    }
    Ok(())
}

// ============================================================================
// Public Query Parameters
// ============================================================================

/// Depth limits for the order book and lend book
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookParams {
    /// Maximum number of bid levels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_bids: Option<u32>,
    /// Maximum number of ask levels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_asks: Option<u32>,
    /// Aggregate levels by price (order book only)
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "flag")]
    pub group: Option<bool>,
}

impl BookParams {
    /// Same limit on both sides
    pub fn depth(limit: u32) -> Self {
        Self {
            limit_bids: Some(limit),
            limit_asks: Some(limit),
            group: None,
        }
    }

    /// Set price-level grouping
    pub fn with_group(mut self, group: bool) -> Self {
        self.group = Some(group);
        self
    }
}

/// Filters for public trade history
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TradesParams {
    /// Only trades at or after this unix timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
    /// Maximum number of trades
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_trades: Option<u32>,
}

/// Filters for public lend history
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LendsParams {
    /// Only lends at or after this unix timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
    /// Maximum number of entries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_lends: Option<u32>,
}

// ============================================================================
// Trading Types
// ============================================================================

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "buy"),
            OrderSide::Sell => write!(f, "sell"),
        }
    }
}

/// Order type
///
/// Types without the `Exchange` prefix trade on the margin wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OrderType {
    #[serde(rename = "market")]
    Market,
    #[serde(rename = "limit")]
    Limit,
    #[serde(rename = "stop")]
    Stop,
    #[serde(rename = "trailing-stop")]
    TrailingStop,
    #[serde(rename = "fill-or-kill")]
    FillOrKill,
    #[serde(rename = "exchange market")]
    ExchangeMarket,
    #[serde(rename = "exchange limit")]
    ExchangeLimit,
    #[serde(rename = "exchange stop")]
    ExchangeStop,
    #[serde(rename = "exchange trailing-stop")]
    ExchangeTrailingStop,
    #[serde(rename = "exchange fill-or-kill")]
    ExchangeFillOrKill,
}

impl OrderType {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Market => "market",
            OrderType::Limit => "limit",
            OrderType::Stop => "stop",
            OrderType::TrailingStop => "trailing-stop",
            OrderType::FillOrKill => "fill-or-kill",
            OrderType::ExchangeMarket => "exchange market",
            OrderType::ExchangeLimit => "exchange limit",
            OrderType::ExchangeStop => "exchange stop",
            OrderType::ExchangeTrailingStop => "exchange trailing-stop",
            OrderType::ExchangeFillOrKill => "exchange fill-or-kill",
        }
    }

    /// Market orders ignore the price
    pub fn is_market(&self) -> bool {
        matches!(self, OrderType::Market | OrderType::ExchangeMarket)
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request for `/v1/order/new`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrder {
    /// Trading pair (e.g. "btcusd")
    pub symbol: String,
    /// Order size
    pub amount: Decimal,
    /// Limit/stop price; any positive value for market orders
    pub price: Decimal,
    /// Routing exchange
    pub exchange: String,
    /// Buy or sell
    pub side: OrderSide,
    /// Order type
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Hide the order from the book
    pub is_hidden: bool,
    /// Reject if it would take liquidity
    pub is_postonly: bool,
    /// Attach a one-cancels-other order
    pub ocoorder: bool,
    /// Price of the OCO buy leg
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buy_price_oco: Option<Decimal>,
    /// Price of the OCO sell leg
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sell_price_oco: Option<Decimal>,
}

impl NewOrder {
    fn base(
        symbol: impl Into<String>,
        side: OrderSide,
        order_type: OrderType,
        amount: Decimal,
        price: Decimal,
    ) -> Self {
        let symbol: String = symbol.into();
        Self {
            symbol: symbol.to_ascii_lowercase(),
            amount,
            price,
            exchange: "bitfinex".to_string(),
            side,
            order_type,
            is_hidden: false,
            is_postonly: false,
            ocoorder: false,
            buy_price_oco: None,
            sell_price_oco: None,
        }
    }

    /// Exchange-wallet limit order
    pub fn limit(
        symbol: impl Into<String>,
        side: OrderSide,
        amount: Decimal,
        price: Decimal,
    ) -> Self {
        Self::base(symbol, side, OrderType::ExchangeLimit, amount, price)
    }

    /// Exchange-wallet market order
    pub fn market(symbol: impl Into<String>, side: OrderSide, amount: Decimal) -> Self {
        Self::base(symbol, side, OrderType::ExchangeMarket, amount, Decimal::ONE)
    }

    /// Use a different order type (e.g. margin orders)
    pub fn with_type(mut self, order_type: OrderType) -> Self {
        self.order_type = order_type;
        self
    }

    /// Hide the order
    pub fn hidden(mut self) -> Self {
        self.is_hidden = true;
        self
    }

    /// Maker only
    pub fn post_only(mut self) -> Self {
        self.is_postonly = true;
        self
    }

    /// Attach a one-cancels-other leg at `price`
    pub fn with_oco(mut self, price: Decimal) -> Self {
        self.ocoorder = true;
        match self.side {
            OrderSide::Buy => self.buy_price_oco = Some(price),
            OrderSide::Sell => self.sell_price_oco = Some(price),
        }
        self
    }

    /// Check the order locally before signing it
    pub fn validate(&self) -> RestResult<()> {
        require_non_empty("symbol", &self.symbol)?;
        require_positive("amount", self.amount)?;
        require_positive("price", self.price)?;
        if self.ocoorder && self.buy_price_oco.is_none() && self.sell_price_oco.is_none() {
            return Err(RestError::InvalidParameter(
                "ocoorder set without an OCO price".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Funding Types
// ============================================================================

/// Wallet selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletType {
    Trading,
    Exchange,
    Deposit,
}

/// Request for `/v1/deposit/new`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepositRequest {
    /// Deposit method (e.g. "bitcoin", "litecoin", "ethereum")
    pub method: String,
    /// Wallet to credit
    pub wallet_name: WalletType,
    /// Ask for a fresh address instead of the last one
    #[serde(serialize_with = "renew_flag")]
    pub renew: bool,
}

fn renew_flag<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*value))
}

impl DepositRequest {
    /// Deposit address for `method` into `wallet`
    pub fn new(method: impl Into<String>, wallet: WalletType) -> Self {
        Self {
            method: method.into(),
            wallet_name: wallet,
            renew: false,
        }
    }

    /// Request a fresh address
    pub fn renew(mut self) -> Self {
        self.renew = true;
        self
    }

    pub fn validate(&self) -> RestResult<()> {
        require_non_empty("method", &self.method)
    }
}

/// Request for `/v1/withdraw`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WithdrawRequest {
    /// Withdrawal method (e.g. "bitcoin")
    pub withdraw_type: String,
    /// Wallet to debit
    pub walletselected: WalletType,
    /// Amount to withdraw
    pub amount: Decimal,
    /// Destination address
    pub address: String,
    /// Destination tag / payment id, where the network uses one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
}

impl WithdrawRequest {
    pub fn new(
        withdraw_type: impl Into<String>,
        wallet: WalletType,
        amount: Decimal,
        address: impl Into<String>,
    ) -> Self {
        Self {
            withdraw_type: withdraw_type.into(),
            walletselected: wallet,
            amount,
            address: address.into(),
            payment_id: None,
        }
    }

    /// Attach a payment id
    pub fn with_payment_id(mut self, payment_id: impl Into<String>) -> Self {
        self.payment_id = Some(payment_id.into());
        self
    }

    pub fn validate(&self) -> RestResult<()> {
        require_non_empty("withdraw_type", &self.withdraw_type)?;
        require_non_empty("address", &self.address)?;
        require_positive("amount", self.amount)
    }
}

// ============================================================================
// History Queries
// ============================================================================

/// Query for `/v1/history/movements`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MovementsQuery {
    /// Currency (e.g. "btc")
    pub currency: String,
    /// Restrict to one method (e.g. "bitcoin", "wire")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Unix timestamp lower bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<u64>,
    /// Unix timestamp upper bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until: Option<u64>,
    /// Maximum entries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl MovementsQuery {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            ..Default::default()
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_range(mut self, since: Option<u64>, until: Option<u64>) -> Self {
        self.since = since;
        self.until = until;
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Query for `/v1/mytrades`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PastTradesQuery {
    /// Trading pair
    pub symbol: String,
    /// Trades at or after this unix timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
    /// Trades before this unix timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until: Option<u64>,
    /// Maximum entries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_trades: Option<u32>,
    /// Oldest first
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "flag")]
    pub reverse: Option<bool>,
}

impl PastTradesQuery {
    pub fn new(symbol: impl Into<String>) -> Self {
        let symbol: String = symbol.into();
        Self {
            symbol: symbol.to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit_trades = Some(limit);
        self
    }

    pub fn oldest_first(mut self) -> Self {
        self.reverse = Some(true);
        self
    }
}

/// Query for `/v1/history`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BalanceHistoryQuery {
    /// Currency (e.g. "usd")
    pub currency: String,
    /// Unix timestamp lower bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<u64>,
    /// Unix timestamp upper bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until: Option<u64>,
    /// Maximum entries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Restrict to one wallet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet: Option<WalletType>,
}

impl BalanceHistoryQuery {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            ..Default::default()
        }
    }

    pub fn with_wallet(mut self, wallet: WalletType) -> Self {
        self.wallet = Some(wallet);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}
