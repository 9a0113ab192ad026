//! Request authentication for the Bitfinex v1 REST API
//!
//! Private Bitfinex endpoints expect every request to carry three headers:
//!
//! - `X-BFX-APIKEY`: the API key in plain text
//! - `X-BFX-PAYLOAD`: the base64-encoded JSON parameter map
//! - `X-BFX-SIGNATURE`: hex-encoded HMAC-SHA384 of the payload, keyed by the API secret
//!
//! The parameter map always contains the endpoint path under `request` and a
//! strictly increasing `nonce`.
//!
//! # Example
//!
//! ```
//! use bitfinex_auth::{Credentials, NonceGenerator, RequestSigner};
//! use serde_json::Map;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let creds = Credentials::new("main", "my-api-key", "my-api-secret");
//! let nonces = NonceGenerator::new();
//!
//! let signed = RequestSigner::new(&creds, &nonces).sign("/v1/balances", Map::new())?;
//! assert_eq!(signed.signature.len(), 96);
//! # Ok(())
//! # }
//! ```

mod credentials;
mod error;
mod nonce;
mod payload;

pub use credentials::Credentials;
pub use error::{AuthError, AuthResult};
pub use nonce::NonceGenerator;
pub use payload::{
    build_payload, decode_payload, encode_payload, RequestSigner, SignedPayload, HEADER_API_KEY,
    HEADER_PAYLOAD, HEADER_SIGNATURE,
};
