//! Payload encoding and request signing
//!
//! Bitfinex v1 signing:
//! 1. JSON-encode the parameter map (including `request` and `nonce`)
//! 2. Base64 encode the JSON bytes, this is the payload
//! 3. HMAC-SHA384(api_secret, payload), hex encoded

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde_json::{Map, Value};
use tracing::trace;

use crate::credentials::Credentials;
use crate::error::{AuthError, AuthResult};
use crate::nonce::NonceGenerator;

/// Header carrying the plaintext API key
pub const HEADER_API_KEY: &str = "X-BFX-APIKEY";
/// Header carrying the base64 JSON payload
pub const HEADER_PAYLOAD: &str = "X-BFX-PAYLOAD";
/// Header carrying the hex HMAC-SHA384 signature
pub const HEADER_SIGNATURE: &str = "X-BFX-SIGNATURE";

/// Build the parameter map for a signed request
///
/// `request` and `nonce` are inserted last so endpoint parameters can never
/// override them.
pub fn build_payload(path: &str, nonce: u64, mut params: Map<String, Value>) -> Map<String, Value> {
    params.insert("request".to_string(), Value::String(path.to_string()));
    params.insert("nonce".to_string(), Value::String(nonce.to_string()));
    params
}

/// JSON-encode then base64-encode a parameter map
pub fn encode_payload(params: &Map<String, Value>) -> AuthResult<String> {
    let json = serde_json::to_string(params)?;
    Ok(BASE64.encode(json.as_bytes()))
}

/// Reverse of [`encode_payload`]
pub fn decode_payload(payload: &str) -> AuthResult<Map<String, Value>> {
    let bytes = BASE64
        .decode(payload)
        .map_err(|e| AuthError::InvalidPayload(format!("invalid base64: {}", e)))?;

    match serde_json::from_slice(&bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(AuthError::InvalidPayload(format!(
            "expected JSON object, got {}",
            other
        ))),
        Err(e) => Err(AuthError::InvalidPayload(format!("invalid JSON: {}", e))),
    }
}

/// Everything needed to authenticate one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedPayload {
    /// API key, sent as-is
    pub api_key: String,
    /// Nonce embedded in the payload
    pub nonce: u64,
    /// Base64 JSON payload
    pub payload: String,
    /// Hex HMAC-SHA384 of `payload`
    pub signature: String,
}

impl SignedPayload {
    /// Header name/value pairs to attach to the request
    pub fn headers(&self) -> [(&'static str, &str); 3] {
        [
            (HEADER_API_KEY, self.api_key.as_str()),
            (HEADER_PAYLOAD, self.payload.as_str()),
            (HEADER_SIGNATURE, self.signature.as_str()),
        ]
    }
}

/// Request signer for building authenticated requests
#[derive(Debug)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
    nonces: &'a NonceGenerator,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer
    pub fn new(credentials: &'a Credentials, nonces: &'a NonceGenerator) -> Self {
        Self {
            credentials,
            nonces,
        }
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Sign a request to `path` with the given endpoint parameters
    ///
    /// Draws a fresh nonce on every call.
    pub fn sign(&self, path: &str, params: Map<String, Value>) -> AuthResult<SignedPayload> {
        let nonce = self.nonces.next();
        let payload = encode_payload(&build_payload(path, nonce, params))?;
        let signature = self.credentials.sign(&payload)?;

        trace!(path, nonce, "signed request payload");

        Ok(SignedPayload {
            api_key: self.credentials.api_key().to_string(),
            nonce,
            payload,
            signature,
        })
    }
}
