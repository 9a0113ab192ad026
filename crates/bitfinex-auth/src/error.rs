//! Error types for authentication operations

/// Errors that can occur while preparing a signed request
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Invalid API credentials
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// Parameter map could not be serialized
    #[error("Failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),

    /// Payload header could not be decoded back into a parameter map
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AuthError::EnvVarNotSet("BITFINEX_API_KEY".to_string());
        assert!(err.to_string().contains("BITFINEX_API_KEY"));
    }

    #[test]
    fn test_encode_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: AuthError = serde_err.into();
        assert!(matches!(err, AuthError::Encode(_)));
    }
}
