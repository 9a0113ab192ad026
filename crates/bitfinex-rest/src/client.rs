//! Public and trading client implementations

use crate::endpoints::{AccountEndpoints, FundingEndpoints, MarketEndpoints, TradingEndpoints};
use crate::error::{RestError, RestResult};
use crate::response::read_json;
use crate::types::{
    BalanceHistoryQuery, BookParams, DepositRequest, LendsParams, MovementsQuery, NewOrder,
    PastTradesQuery, TradesParams, WithdrawRequest,
};
use bitfinex_auth::{Credentials, NonceGenerator, RequestSigner};
use reqwest::header::HeaderValue;
use reqwest::{Client, Proxy, Url};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Production API host
pub const DEFAULT_BASE_URL: &str = "https://api.bitfinex.com";

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_BASE_URL: &str = "BITFINEX_BASE_URL";
const ENV_TIMEOUT_SECS: &str = "BITFINEX_TIMEOUT_SECS";
const ENV_PROXY: &str = "BITFINEX_PROXY";

const DEFAULT_USER_AGENT: &str = concat!("bitfinex-rest/", env!("CARGO_PKG_VERSION"));

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API host, e.g. a sandbox instead of production
    pub base_url: String,
    /// Per-request timeout, must be non-zero
    pub timeout: Duration,
    /// Custom user agent
    pub user_agent: Option<String>,
    /// HTTP(S) proxy for all requests, e.g. `http://127.0.0.1:3128`
    pub proxy: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: None,
            proxy: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `BITFINEX_BASE_URL`, `BITFINEX_TIMEOUT_SECS`
    /// and `BITFINEX_PROXY`
    pub fn from_env() -> RestResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> RestResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                RestError::InvalidConfig(format!(
                    "{} must be an integer, got {:?}",
                    ENV_TIMEOUT_SECS, secs
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(proxy) = lookup(ENV_PROXY).filter(|p| !p.trim().is_empty()) {
            config.proxy = Some(proxy);
        }

        config.validate()?;
        Ok(config)
    }

    /// Set base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Route every request through a proxy
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Check every field without building a client
    pub fn validate(&self) -> RestResult<()> {
        self.normalized_base_url()?;
        if self.timeout.is_zero() {
            return Err(RestError::InvalidConfig(
                "timeout must be greater than zero".to_string(),
            ));
        }
        self.proxy_settings()?;
        Ok(())
    }

    /// Validated base URL without a trailing slash
    fn normalized_base_url(&self) -> RestResult<String> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        let url = Url::parse(trimmed).map_err(|e| {
            RestError::InvalidConfig(format!("invalid base URL {:?}: {}", self.base_url, e))
        })?;

        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(RestError::InvalidConfig(format!(
                "base URL must be http(s), got {:?}",
                self.base_url
            )));
        }

        Ok(trimmed.to_string())
    }

    fn proxy_settings(&self) -> RestResult<Option<Proxy>> {
        let Some(raw) = self.proxy.as_deref() else {
            return Ok(None);
        };

        let url = Url::parse(raw.trim())
            .map_err(|e| RestError::InvalidConfig(format!("invalid proxy {:?}: {}", raw, e)))?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(RestError::InvalidConfig(format!(
                "proxy must be an http(s) URL with a host, got {:?}",
                raw
            )));
        }

        Proxy::all(url)
            .map(Some)
            .map_err(|e| RestError::InvalidConfig(format!("invalid proxy {:?}: {}", raw, e)))
    }
}

// ============================================================================
// Public Client
// ============================================================================

/// Client for unauthenticated market-data endpoints
///
/// # Example
///
/// ```no_run
/// use bitfinex_rest::{BookParams, PublicClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = PublicClient::new()?;
///     let ticker = client.ticker("btcusd").await?;
///     println!("last: {}", ticker["last_price"]);
///
///     let book = client.order_book("btcusd", &BookParams::depth(10)).await?;
///     println!("{} bids", book["bids"].as_array().map_or(0, |b| b.len()));
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct PublicClient {
    http_client: Client,
    base_url: String,
}

impl PublicClient {
    /// Create a client for the production host
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        config.validate()?;
        let base_url = config.normalized_base_url()?;
        let user_agent = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);

        let mut builder = Client::builder()
            .timeout(config.timeout)
            .user_agent(user_agent);
        if let Some(proxy) = config.proxy_settings()? {
            builder = builder.proxy(proxy);
        }

        let http_client = builder.build().map_err(|e| {
            RestError::InvalidConfig(format!("failed to build HTTP client: {}", e))
        })?;

        info!(
            base_url = %base_url,
            proxied = config.proxy.is_some(),
            "Created Bitfinex REST client"
        );

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Host this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> RestResult<Url> {
        let joined = format!("{}{}", self.base_url, path);
        Url::parse(&joined).map_err(|e| {
            RestError::InvalidParameter(format!("invalid URL {:?}: {}", joined, e))
        })
    }

    /// Unauthenticated GET
    pub(crate) async fn get<Q>(&self, path: &str, query: &Q) -> RestResult<Value>
    where
        Q: Serialize + ?Sized,
    {
        let url = self.url(path)?;
        debug!("GET {}", path);

        let response = self.http_client.get(url).query(query).send().await?;
        read_json(response, false).await
    }

    // ========================================================================
    // Public Market Endpoints
    // ========================================================================

    /// Get market endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(self)
    }

    /// Ticker for a trading pair (e.g. "btcusd")
    pub async fn ticker(&self, symbol: &str) -> RestResult<Value> {
        self.market().ticker(symbol).await
    }

    /// Volume statistics for a trading pair
    pub async fn stats(&self, symbol: &str) -> RestResult<Value> {
        self.market().stats(symbol).await
    }

    /// Order book for a trading pair
    pub async fn order_book(&self, symbol: &str, params: &BookParams) -> RestResult<Value> {
        self.market().order_book(symbol, params).await
    }

    /// Recent trades for a trading pair
    pub async fn trades(&self, symbol: &str, params: &TradesParams) -> RestResult<Value> {
        self.market().trades(symbol, params).await
    }

    /// Funding book for a currency (e.g. "usd")
    pub async fn lend_book(&self, currency: &str, params: &BookParams) -> RestResult<Value> {
        self.market().lend_book(currency, params).await
    }

    /// Recent funding rates for a currency
    pub async fn lends(&self, currency: &str, params: &LendsParams) -> RestResult<Value> {
        self.market().lends(currency, params).await
    }

    /// All trading pair names
    pub async fn symbols(&self) -> RestResult<Value> {
        self.market().symbols().await
    }

    /// Precision, size limits and margin settings per pair
    pub async fn symbol_details(&self) -> RestResult<Value> {
        self.market().symbol_details().await
    }
}

impl std::fmt::Debug for PublicClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

// ============================================================================
// Trading Client
// ============================================================================

/// Client for authenticated endpoints
///
/// Wraps a [`PublicClient`] so every market-data call is available too.
/// Clones share one nonce sequence.
///
/// # Example
///
/// ```no_run
/// use bitfinex_rest::{Credentials, NewOrder, OrderSide, TradingClient};
/// use rust_decimal_macros::dec;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = TradingClient::new(Credentials::from_env()?)?;
///     println!("{}", client.balances().await?);
///
///     let order = NewOrder::limit("btcusd", OrderSide::Buy, dec!(0.01), dec!(20000));
///     let placed = client.new_order(&order).await?;
///     println!("order id: {}", placed["order_id"]);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct TradingClient {
    public: PublicClient,
    credentials: Credentials,
    nonces: Arc<NonceGenerator>,
}

impl TradingClient {
    /// Create a trading client for the production host
    pub fn new(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a trading client with custom configuration
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> RestResult<Self> {
        Ok(Self::from_parts(PublicClient::with_config(config)?, credentials))
    }

    /// Read credentials and configuration from the environment
    pub fn from_env() -> RestResult<Self> {
        Self::with_config(Credentials::from_env()?, ClientConfig::from_env()?)
    }

    /// Reuse an existing public client
    pub fn from_parts(public: PublicClient, credentials: Credentials) -> Self {
        Self {
            public,
            credentials,
            nonces: Arc::new(NonceGenerator::new()),
        }
    }

    /// The wrapped public client
    pub fn public(&self) -> &PublicClient {
        &self.public
    }

    /// Credentials used for signing
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Signed POST to any private endpoint
    ///
    /// `params` are merged into the payload next to `request` and `nonce`.
    pub async fn signed_post(&self, path: &str, params: Map<String, Value>) -> RestResult<Value> {
        if !path.starts_with("/v1/") {
            return Err(RestError::InvalidParameter(format!(
                "private path must start with /v1/, got {:?}",
                path
            )));
        }

        let url = self.public.url(path)?;
        let signed = RequestSigner::new(&self.credentials, &self.nonces).sign(path, params)?;

        debug!(nonce = signed.nonce, "POST {}", path);

        let mut request = self.public.http_client.post(url);
        for (name, value) in signed.headers() {
            request = request.header(name, header_value(name, value)?);
        }

        let response = request.send().await?;
        read_json(response, true).await
    }

    // ========================================================================
    // Public Market Endpoints
    // ========================================================================

    /// Get market endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        self.public.market()
    }

    /// Ticker for a trading pair (e.g. "btcusd")
    pub async fn ticker(&self, symbol: &str) -> RestResult<Value> {
        self.public.ticker(symbol).await
    }

    /// Volume statistics for a trading pair
    pub async fn stats(&self, symbol: &str) -> RestResult<Value> {
        self.public.stats(symbol).await
    }

    /// Order book for a trading pair
    pub async fn order_book(&self, symbol: &str, params: &BookParams) -> RestResult<Value> {
        self.public.order_book(symbol, params).await
    }

    /// Recent trades for a trading pair
    pub async fn trades(&self, symbol: &str, params: &TradesParams) -> RestResult<Value> {
        self.public.trades(symbol, params).await
    }

    /// Funding book for a currency
    pub async fn lend_book(&self, currency: &str, params: &BookParams) -> RestResult<Value> {
        self.public.lend_book(currency, params).await
    }

    /// Recent funding rates for a currency
    pub async fn lends(&self, currency: &str, params: &LendsParams) -> RestResult<Value> {
        self.public.lends(currency, params).await
    }

    /// All trading pair names
    pub async fn symbols(&self) -> RestResult<Value> {
        self.public.symbols().await
    }

    /// Precision, size limits and margin settings per pair
    pub async fn symbol_details(&self) -> RestResult<Value> {
        self.public.symbol_details().await
    }

    // ========================================================================
    // Private Account Endpoints
    // ========================================================================

    /// Get account endpoints
    pub fn account(&self) -> AccountEndpoints<'_> {
        AccountEndpoints::new(self)
    }

    /// Fee schedule and account settings
    pub async fn account_infos(&self) -> RestResult<Value> {
        self.account().account_infos().await
    }

    /// Wallet balances
    pub async fn balances(&self) -> RestResult<Value> {
        self.account().balances().await
    }

    /// Margin trading status
    pub async fn margin_infos(&self) -> RestResult<Value> {
        self.account().margin_infos().await
    }

    /// Open margin positions
    pub async fn positions(&self) -> RestResult<Value> {
        self.account().positions().await
    }

    /// Deposit and withdrawal history
    pub async fn movements(&self, query: &MovementsQuery) -> RestResult<Value> {
        self.account().movements(query).await
    }

    /// Own trade history for a pair
    pub async fn past_trades(&self, query: &PastTradesQuery) -> RestResult<Value> {
        self.account().past_trades(query).await
    }

    /// Balance ledger for a currency
    pub async fn balance_history(&self, query: &BalanceHistoryQuery) -> RestResult<Value> {
        self.account().balance_history(query).await
    }

    // ========================================================================
    // Private Trading Endpoints
    // ========================================================================

    /// Get trading endpoints
    pub fn trading(&self) -> TradingEndpoints<'_> {
        TradingEndpoints::new(self)
    }

    /// Currently open orders
    pub async fn active_orders(&self) -> RestResult<Value> {
        self.trading().active_orders().await
    }

    /// Submit a new order
    pub async fn new_order(&self, order: &NewOrder) -> RestResult<Value> {
        self.trading().new_order(order).await
    }

    /// Cancel one order
    pub async fn cancel_order(&self, order_id: u64) -> RestResult<Value> {
        self.trading().cancel_order(order_id).await
    }

    /// Cancel several orders at once
    pub async fn cancel_orders(&self, order_ids: &[u64]) -> RestResult<Value> {
        self.trading().cancel_orders(order_ids).await
    }

    /// Cancel every open order
    pub async fn cancel_all_orders(&self) -> RestResult<Value> {
        self.trading().cancel_all_orders().await
    }

    /// Status of one order
    pub async fn order_status(&self, order_id: u64) -> RestResult<Value> {
        self.trading().order_status(order_id).await
    }

    // ========================================================================
    // Private Funding Endpoints
    // ========================================================================

    /// Get funding endpoints
    pub fn funding(&self) -> FundingEndpoints<'_> {
        FundingEndpoints::new(self)
    }

    /// Request a deposit address
    pub async fn deposit_address(&self, request: &DepositRequest) -> RestResult<Value> {
        self.funding().deposit_address(request).await
    }

    /// Request a withdrawal
    pub async fn withdraw(&self, request: &WithdrawRequest) -> RestResult<Value> {
        self.funding().withdraw(request).await
    }
}

impl std::fmt::Debug for TradingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TradingClient")
            .field("base_url", &self.public.base_url)
            .field("credentials", &self.credentials)
            .finish()
    }
}

/// Header values must be visible ASCII; a key with control characters is
/// refused here instead of failing inside the transport
fn header_value(name: &str, value: &str) -> RestResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| {
        RestError::InvalidParameter(format!("{} is not a valid header value", name))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new()
            .with_base_url("https://sandbox.example.com/")
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("test-agent")
            .with_proxy("http://127.0.0.1:3128");

        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, Some("test-agent".to_string()));
        assert_eq!(config.proxy.as_deref(), Some("http://127.0.0.1:3128"));
        assert_eq!(config.normalized_base_url().unwrap(), "https://sandbox.example.com");
    }

    #[test]
    fn test_default_config_points_at_production() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(config.proxy.is_none());
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = ClientConfig::new().with_base_url("not a url");
        let err = PublicClient::with_config(config).unwrap_err();
        assert!(matches!(err, RestError::InvalidConfig(_)));

        let config = ClientConfig::new().with_base_url("ftp://example.com");
        let err = PublicClient::with_config(config).unwrap_err();
        assert!(matches!(err, RestError::InvalidConfig(_)));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = ClientConfig::new().with_timeout(Duration::ZERO);
        let err = PublicClient::with_config(config).unwrap_err();
        assert!(matches!(err, RestError::InvalidConfig(_)));
    }

    #[test]
    fn test_proxy_applied() {
        let config = ClientConfig::new().with_proxy("http://127.0.0.1:3128");
        let client = PublicClient::with_config(config).unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_bad_proxy_rejected() {
        for proxy in ["not a proxy", "ftp://127.0.0.1:21", "http://"] {
            let config = ClientConfig::new().with_proxy(proxy);
            let err = PublicClient::with_config(config).unwrap_err();
            assert!(
                matches!(err, RestError::InvalidConfig(ref m) if m.contains("proxy")),
                "{:?} gave {:?}",
                proxy,
                err
            );
        }
    }

    #[test]
    fn test_config_from_lookup_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(config.proxy.is_none());
    }

    #[test]
    fn test_config_from_lookup_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "http://127.0.0.1:8080"),
            (ENV_TIMEOUT_SECS, " 7 "),
            (ENV_PROXY, "http://proxy.internal:3128"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.timeout, Duration::from_secs(7));
        assert_eq!(config.proxy.as_deref(), Some("http://proxy.internal:3128"));
    }

    #[test]
    fn test_config_from_lookup_ignores_blank_proxy() {
        let config = ClientConfig::from_lookup(lookup(&[(ENV_PROXY, "  ")])).unwrap();
        assert!(config.proxy.is_none());
    }

    #[test]
    fn test_config_from_lookup_rejects_bad_values() {
        let bad = [
            (ENV_TIMEOUT_SECS, "soon"),
            (ENV_TIMEOUT_SECS, "-1"),
            (ENV_TIMEOUT_SECS, "0"),
            (ENV_BASE_URL, "not a url"),
            (ENV_PROXY, "not a proxy"),
        ];
        for (name, value) in bad {
            let err = ClientConfig::from_lookup(lookup(&[(name, value)])).unwrap_err();
            assert!(
                matches!(err, RestError::InvalidConfig(_)),
                "{}={:?} gave {:?}",
                name,
                value,
                err
            );
        }
    }

    // The only test in this crate that touches the process environment.
    #[test]
    fn test_config_from_env() {
        std::env::set_var(ENV_BASE_URL, "http://127.0.0.1:18080");
        std::env::set_var(ENV_TIMEOUT_SECS, "12");
        let config = ClientConfig::from_env();

        std::env::set_var(ENV_TIMEOUT_SECS, "twelve");
        let bad_timeout = ClientConfig::from_env();

        std::env::remove_var(ENV_BASE_URL);
        std::env::remove_var(ENV_TIMEOUT_SECS);

        let config = config.unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:18080");
        assert_eq!(config.timeout, Duration::from_secs(12));
        assert!(matches!(bad_timeout, Err(RestError::InvalidConfig(_))));
    }

    #[test]
    fn test_url_construction() {
        let config = ClientConfig::new().with_base_url("https://sandbox.example.com/api/");
        let client = PublicClient::with_config(config).unwrap();
        assert_eq!(client.base_url(), "https://sandbox.example.com/api");
        assert_eq!(
            client.url("/v1/pubticker/btcusd").unwrap().as_str(),
            "https://sandbox.example.com/api/v1/pubticker/btcusd"
        );
    }

    #[test]
    fn test_clients_with_different_hosts_coexist() {
        let production = PublicClient::new().unwrap();
        let config = ClientConfig::new().with_base_url("http://127.0.0.1:9");
        let sandbox = PublicClient::with_config(config).unwrap();
        assert_eq!(production.base_url(), DEFAULT_BASE_URL);
        assert_eq!(sandbox.base_url(), "http://127.0.0.1:9");
    }

    #[test]
    fn test_trading_client_debug_redacts_secret() {
        let client = TradingClient::new(Credentials::new("acct", "key", "very-secret")).unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("very-secret"));
        assert!(debug.contains("TradingClient"));
    }

    #[test]
    fn test_clones_share_nonce_sequence() {
        let client = TradingClient::new(Credentials::new("acct", "key", "secret")).unwrap();
        let clone = client.clone();
        let first = client.nonces.next();
        let second = clone.nonces.next();
        assert!(second > first);
        assert_eq!(client.nonces.last(), second);
    }

    #[test]
    fn test_header_value_validation() {
        assert!(header_value("X-BFX-APIKEY", "abcDEF123").is_ok());

        let err = header_value("X-BFX-APIKEY", "abc\ndef").unwrap_err();
        assert!(matches!(err, RestError::InvalidParameter(ref m) if m.contains("X-BFX-APIKEY")));
    }

    #[tokio::test]
    async fn test_signed_post_rejects_foreign_paths() {
        let client = TradingClient::new(Credentials::new("acct", "key", "secret")).unwrap();
        let err = client.signed_post("account_infos", Map::new()).await.unwrap_err();
        assert!(matches!(err, RestError::InvalidParameter(_)));
    }

    #[tokio::test]
    async fn test_signed_post_rejects_unsendable_api_key() {
        // Port 9 is never contacted: the key fails before the request is built.
        let config = ClientConfig::new().with_base_url("http://127.0.0.1:9");
        let credentials = Credentials::new("acct", "key\r\nInjected: 1", "secret");
        let client = TradingClient::with_config(credentials, config).unwrap();

        let err = client.signed_post("/v1/account_infos", Map::new()).await.unwrap_err();
        assert!(matches!(err, RestError::InvalidParameter(ref m) if m.contains("X-BFX-APIKEY")));
    }
}
