//! Common test utilities and fixtures for integration tests
//!
//! Sample bodies follow the shapes returned by the live Bitfinex v1 API.

#![allow(dead_code)]

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use bitfinex_rest::{ClientConfig, Credentials, PublicClient, TradingClient};
use hmac::{Hmac, Mac};
use serde_json::{Map, Value};
use sha2::Sha384;
use std::time::Duration;
use wiremock::{MockServer, Request};

pub const API_KEY: &str = "test-api-key";
pub const API_SECRET: &str = "test-api-secret";

/// Sample ticker body
pub const TICKER_BODY: &str = r#"{
    "mid": "244.755",
    "bid": "244.75",
    "ask": "244.76",
    "last_price": "244.82",
    "low": "244.2",
    "high": "248.19",
    "volume": "8700.01208078",
    "timestamp": "1444253422.348340958"
}"#;

/// Sample order book body
pub const BOOK_BODY: &str = r#"{
    "bids": [{"price": "574.61", "amount": "0.1439327", "timestamp": "1472506127.0"}],
    "asks": [{"price": "574.62", "amount": "19.1334", "timestamp": "1472506126.0"}]
}"#;

/// Sample account_infos body
pub const ACCOUNT_INFOS_BODY: &str = r#"[{
    "maker_fees": "0.1",
    "taker_fees": "0.2",
    "fees": [{"pairs": "BTC", "maker_fees": "0.1", "taker_fees": "0.2"}]
}]"#;

/// Start a mock server
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::new()
        .with_base_url(server.uri())
        .with_timeout(Duration::from_secs(5))
}

pub fn public_client(server: &MockServer) -> PublicClient {
    PublicClient::with_config(config_for(server)).expect("client should build")
}

pub fn trading_client(server: &MockServer) -> TradingClient {
    let credentials = Credentials::new("test-account", API_KEY, API_SECRET);
    TradingClient::with_config(credentials, config_for(server)).expect("client should build")
}

pub fn header<'a>(request: &'a Request, name: &str) -> &'a str {
    request
        .headers
        .get(name)
        .unwrap_or_else(|| panic!("missing header {}", name))
        .to_str()
        .expect("header should be ASCII")
}

/// Decode the `X-BFX-PAYLOAD` header of a captured request
pub fn decoded_payload(request: &Request) -> Map<String, Value> {
    let bytes = BASE64
        .decode(header(request, "X-BFX-PAYLOAD"))
        .expect("payload should be base64");
    match serde_json::from_slice(&bytes).expect("payload should be JSON") {
        Value::Object(map) => map,
        other => panic!("payload should be an object, got {}", other),
    }
}

/// Nonce of a captured request as an integer
pub fn nonce_of(request: &Request) -> u64 {
    decoded_payload(request)["nonce"]
        .as_str()
        .expect("nonce should be a string")
        .parse()
        .expect("nonce should be numeric")
}

/// Independent HMAC-SHA384 hex digest
pub fn expected_signature(secret: &str, payload: &str) -> String {
    let mut mac = Hmac::<Sha384>::new_from_slice(secret.as_bytes()).expect("any key size");
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
