//! API credentials for Bitfinex private endpoints
//!
//! # Security
//!
//! The API secret is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha384;

use crate::error::{AuthError, AuthResult};

type HmacSha384 = Hmac<Sha384>;

const ENV_ACCOUNT: &str = "BITFINEX_ACCOUNT";
const ENV_API_KEY: &str = "BITFINEX_API_KEY";
const ENV_API_SECRET: &str = "BITFINEX_API_SECRET";

/// Account identifier, API key and API secret
///
/// Immutable once built. The secret is zeroized when the credentials are dropped.
pub struct Credentials {
    /// Account identifier (label only, never sent to the exchange)
    account: String,
    /// API key (public)
    api_key: String,
    /// API secret (zeroized on drop)
    api_secret: SecretString,
}

impl Credentials {
    /// Create credentials from an account identifier, API key and API secret
    pub fn new(
        account: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            account: account.into(),
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
        }
    }

    /// Create credentials from environment variables
    ///
    /// Reads `BITFINEX_API_KEY` and `BITFINEX_API_SECRET`. `BITFINEX_ACCOUNT`
    /// is optional and defaults to an empty identifier.
    pub fn from_env() -> AuthResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> AuthResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let account = lookup(ENV_ACCOUNT).unwrap_or_default();
        let api_key =
            lookup(ENV_API_KEY).ok_or_else(|| AuthError::EnvVarNotSet(ENV_API_KEY.to_string()))?;
        let api_secret = lookup(ENV_API_SECRET)
            .ok_or_else(|| AuthError::EnvVarNotSet(ENV_API_SECRET.to_string()))?;

        if api_key.is_empty() {
            return Err(AuthError::InvalidCredentials("API key is empty".to_string()));
        }

        Ok(Self::new(account, api_key, api_secret))
    }

    /// Get the account identifier
    pub fn account(&self) -> &str {
        &self.account
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sign an encoded payload
    ///
    /// Returns `hex(HMAC-SHA384(api_secret, payload))` in lowercase.
    pub fn sign(&self, payload: &str) -> AuthResult<String> {
        let mut mac = HmacSha384::new_from_slice(self.api_secret.expose_secret().as_bytes())
            .map_err(|e| AuthError::InvalidCredentials(e.to_string()))?;
        mac.update(payload.as_bytes());

        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            account: self.account.clone(),
            api_key: self.api_key.clone(),
            api_secret: SecretString::from(self.api_secret.expose_secret().to_string()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shown = self
            .api_key
            .char_indices()
            .nth(8)
            .map_or(self.api_key.as_str(), |(idx, _)| &self.api_key[..idx]);

        f.debug_struct("Credentials")
            .field("account", &self.account)
            .field("api_key", &format!("{}...", shown))
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}
