//! Error types for REST API operations

use bitfinex_auth::AuthError;
use reqwest::StatusCode;

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Network-level failure (DNS, connect, TLS, timeout)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Exchange rejected the request
    #[error("Remote error ({status}): {message}")]
    Remote {
        /// HTTP status of the response
        status: StatusCode,
        /// Message extracted from the response body
        message: String,
        /// Raw response body
        body: String,
    },

    /// Exchange rejected the signature, nonce or API key
    #[error("Authentication rejected ({status}): {message}")]
    Auth {
        /// HTTP status of the response
        status: StatusCode,
        /// Message extracted from the response body
        message: String,
        /// Raw response body
        body: String,
    },

    /// Successful response whose body is not valid JSON
    #[error("Decode error: {message}")]
    Decode {
        /// Parser error
        message: String,
        /// Raw response body
        body: String,
    },

    /// Invalid request parameters, rejected before sending
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Credential or payload encoding failure
    #[error("Credentials error: {0}")]
    Credentials(#[from] AuthError),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl RestError {
    /// HTTP status, if the exchange answered
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Remote { status, .. } | Self::Auth { status, .. } => Some(*status),
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// True for every error reported by the exchange, including auth rejections
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. } | Self::Auth { .. })
    }

    /// True when the exchange rejected the signature, nonce or key
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    /// True when the request timed out
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// Message reported by the exchange, if any
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            Self::Remote { message, .. } | Self::Auth { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Raw response body, for errors that carry one
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Remote { body, .. } | Self::Auth { body, .. } | Self::Decode { body, .. } => {
                Some(body)
            }
            _ => None,
        }
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_is_remote() {
        let err = RestError::Auth {
            status: StatusCode::BAD_REQUEST,
            message: "Invalid nonce".to_string(),
            body: r#"{"message":"Invalid nonce"}"#.to_string(),
        };
        assert!(err.is_remote());
        assert!(err.is_auth());
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(err.remote_message(), Some("Invalid nonce"));
        assert!(err.to_string().contains("Invalid nonce"));
        assert_eq!(err.body(), Some(r#"{"message":"Invalid nonce"}"#));
    }

    #[test]
    fn test_local_errors_are_not_remote() {
        let err = RestError::InvalidParameter("symbol".to_string());
        assert!(!err.is_remote());
        assert!(!err.is_timeout());
        assert_eq!(err.status(), None);
        assert_eq!(err.body(), None);

        let err: RestError = AuthError::EnvVarNotSet("BITFINEX_API_KEY".to_string()).into();
        assert!(matches!(err, RestError::Credentials(_)));
        assert!(!err.is_auth());
    }
}
