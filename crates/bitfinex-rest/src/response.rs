//! Response interpretation shared by public and private endpoints

use crate::error::{RestError, RestResult};
use reqwest::{Response, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

/// Fragments of remote error messages that indicate a rejected signature,
/// nonce or API key. Matched case-insensitively.
const AUTH_MARKERS: &[&str] = &[
    "nonce",
    "signature",
    "apikey",
    "api key",
    "api_key",
    "invalid key",
    "permission",
];

/// Read the body of `response` and turn it into a JSON value or an error
pub(crate) async fn read_json(response: Response, signed: bool) -> RestResult<Value> {
    let status = response.status();
    let body = response.text().await?;
    debug!(%status, bytes = body.len(), "received response");

    interpret(status, &body, signed)
}

/// Classify a status/body pair
///
/// - non-2xx: `Remote`, or `Auth` for signed calls rejected on credentials
/// - 2xx with a non-empty `error` field: same as non-2xx
/// - 2xx with an unparseable body: `Decode`
pub(crate) fn interpret(status: StatusCode, body: &str, signed: bool) -> RestResult<Value> {
    let parsed = serde_json::from_str::<Value>(body);

    if !status.is_success() {
        let message = match &parsed {
            Ok(value) => error_message(value).unwrap_or_else(|| body.trim().to_string()),
            Err(_) => body.trim().to_string(),
        };
        return Err(remote_error(status, message, body, signed));
    }

    let value = parsed.map_err(|e| RestError::Decode {
        message: e.to_string(),
        body: body.to_string(),
    })?;

    if let Some(error) = value.get("error").and_then(non_empty_error) {
        return Err(remote_error(status, error, body, signed));
    }

    Ok(value)
}

fn remote_error(status: StatusCode, message: String, body: &str, signed: bool) -> RestError {
    if signed && is_auth_failure(status, &message) {
        warn!(%status, %message, "signed request rejected");
        RestError::Auth {
            status,
            message,
            body: body.to_string(),
        }
    } else {
        warn!(%status, %message, "request failed");
        RestError::Remote {
            status,
            message,
            body: body.to_string(),
        }
    }
}

fn is_auth_failure(status: StatusCode, message: &str) -> bool {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return true;
    }
    let lower = message.to_ascii_lowercase();
    AUTH_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Pull the human-readable message out of an error body
fn error_message(value: &Value) -> Option<String> {
    value
        .get("message")
        .and_then(non_empty_error)
        .or_else(|| value.get("error").and_then(non_empty_error))
}

fn non_empty_error(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_passes_json_through() {
        let value = interpret(StatusCode::OK, r#"{"volume": "8700.01208078"}"#, false).unwrap();
        assert_eq!(value["volume"], json!("8700.01208078"));

        let value = interpret(StatusCode::OK, r#"["btcusd","ltcusd"]"#, false).unwrap();
        assert_eq!(value, json!(["btcusd", "ltcusd"]));
    }

    #[test]
    fn test_invalid_nonce_on_signed_call_is_auth() {
        let err = interpret(StatusCode::BAD_REQUEST, r#"{"message": "Invalid nonce"}"#, true)
            .unwrap_err();
        match err {
            RestError::Auth {
                status,
                message,
                body,
            } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "Invalid nonce");
                assert_eq!(body, r#"{"message": "Invalid nonce"}"#);
            }
            other => panic!("expected auth error, got {:?}", other),
        }
    }

    #[test]
    fn test_auth_markers_ignored_for_public_calls() {
        let err = interpret(StatusCode::BAD_REQUEST, r#"{"message": "Invalid nonce"}"#, false)
            .unwrap_err();
        assert!(matches!(err, RestError::Remote { .. }));
    }

    #[test]
    fn test_unauthorized_status_is_auth() {
        let err = interpret(StatusCode::UNAUTHORIZED, "", true).unwrap_err();
        assert!(err.is_auth());
    }

    #[test]
    fn test_non_auth_failure_is_remote() {
        let err = interpret(StatusCode::BAD_REQUEST, r#"{"message": "Unknown symbol"}"#, true)
            .unwrap_err();
        match err {
            RestError::Remote { status, message, body } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "Unknown symbol");
                assert!(body.contains("Unknown symbol"));
            }
            other => panic!("expected remote error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_json_failure_uses_raw_body() {
        let err = interpret(StatusCode::BAD_GATEWAY, "  <html>bad gateway</html>\n", false)
            .unwrap_err();
        assert_eq!(err.remote_message(), Some("<html>bad gateway</html>"));
        assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
    }

    #[test]
    fn test_error_field_on_success_is_remote() {
        let err = interpret(StatusCode::OK, r#"{"error": "ERR_RATE_LIMIT"}"#, false).unwrap_err();
        assert_eq!(err.remote_message(), Some("ERR_RATE_LIMIT"));
    }

    #[test]
    fn test_empty_error_field_is_success() {
        let value = interpret(StatusCode::OK, r#"{"error": "", "id": 1}"#, false).unwrap();
        assert_eq!(value["id"], json!(1));
    }

    #[test]
    fn test_non_json_success_is_decode_error() {
        let err = interpret(StatusCode::OK, "not json", false).unwrap_err();
        match err {
            RestError::Decode { body, .. } => assert_eq!(body, "not json"),
            other => panic!("expected decode error, got {:?}", other),
        }
    }
}
