//! The raw response returned by the transport.
//!
//! [`RawResponse`] keeps the status, headers and body text of a response so
//! the resource layer can decide between decoding it and turning it into an
//! [`Error::Api`](crate::Error::Api).

use crate::{Error, Result};
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// A response as received from the server, before any interpretation.
///
/// # Examples
///
/// ```
/// use restapi::RawResponse;
/// use http::{HeaderMap, StatusCode};
/// use std::time::Duration;
///
/// let response = RawResponse::new(
///     StatusCode::BAD_REQUEST,
///     HeaderMap::new(),
///     r#"{"code":4001,"message":"nickname is required"}"#.to_string(),
///     Duration::from_millis(12),
/// );
///
/// assert_eq!(response.get("code").and_then(|v| v.as_i64()), Some(4001));
/// assert_eq!(response.text(), r#"{"code":4001,"message":"nickname is required"}"#);
/// ```
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// The HTTP status code of the response.
    pub status: StatusCode,

    /// The response headers.
    pub headers: HeaderMap,

    /// The raw response body as a string.
    pub raw_body: String,

    /// Time between sending the request and reading the full body.
    pub latency: Duration,
}

impl RawResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, raw_body: String, latency: Duration) -> Self {
        Self {
            status,
            headers,
            raw_body,
            latency,
        }
    }

    /// The raw body text.
    pub fn text(&self) -> &str {
        &self.raw_body
    }

    /// Extracts a top-level field from a JSON object body.
    ///
    /// Returns `None` when the body is not JSON, not an object, or has no
    /// such field.
    pub fn get(&self, field: &str) -> Option<Value> {
        match serde_json::from_str::<Value>(&self.raw_body) {
            Ok(Value::Object(mut object)) => object.remove(field),
            _ => None,
        }
    }

    /// Deserializes the body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeserializationFailed`] with the raw body attached when
    /// the body does not match `T`.
    pub fn json<T>(&self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str::<T>(&self.raw_body).map_err(|e| {
            tracing::error!(
                error = %e,
                raw_response = %self.raw_body,
                "Failed to deserialize response"
            );

            Error::DeserializationFailed {
                raw_response: self.raw_body.clone(),
                serde_error: e.to_string(),
                status: self.status,
            }
        })
    }

    /// Returns a reference to a header value by name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Builds the error for a response whose status the caller did not expect.
    ///
    /// The code is the body's `code` field when it is present and nonzero,
    /// otherwise the HTTP status. The message is the body's `message` field
    /// when non-empty, otherwise the raw body.
    pub fn into_error(self) -> Error {
        let code = self
            .get("code")
            .and_then(|v| json_int(&v))
            .filter(|code| *code != 0)
            .unwrap_or_else(|| i64::from(self.status.as_u16()));

        let message = self
            .get("message")
            .map(|v| json_text(&v))
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| self.raw_body.clone());

        Error::Api {
            code,
            message,
            status: self.status,
            raw_response: self.raw_body,
        }
    }
}

/// Reads an integer out of a JSON number or numeric string.
fn json_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Renders a JSON value as message text; `null` is empty.
fn json_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> RawResponse {
        RawResponse::new(
            StatusCode::from_u16(status).unwrap(),
            HeaderMap::new(),
            body.to_string(),
            Duration::from_millis(1),
        )
    }

    #[test]
    fn test_error_uses_body_code_and_message() {
        let err = response(400, r#"{"code":4001,"message":"nickname is required"}"#).into_error();

        assert_eq!(err.code(), Some(4001));
        assert_eq!(err.message(), Some("nickname is required"));
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(err.to_string(), "[4001] nickname is required");
    }

    #[test]
    fn test_error_falls_back_to_status_when_code_is_zero() {
        let err = response(409, r#"{"code":0,"message":"conflict"}"#).into_error();
        assert_eq!(err.to_string(), "[409] conflict");
    }

    #[test]
    fn test_error_falls_back_to_status_when_code_is_missing() {
        let err = response(200, r#"{"message":"not allowed"}"#).into_error();
        assert_eq!(err.code(), Some(200));
        assert_eq!(err.to_string(), "[200] not allowed");
    }

    #[test]
    fn test_error_falls_back_to_raw_body_when_message_is_empty() {
        let err = response(500, r#"{"code":5001,"message":""}"#).into_error();
        assert_eq!(
            err.to_string(),
            r#"[5001] {"code":5001,"message":""}"#
        );
    }

    #[test]
    fn test_error_from_plain_text_body() {
        let err = response(404, "not found").into_error();
        assert_eq!(err.to_string(), "[404] not found");
        assert_eq!(err.raw_response(), Some("not found"));
    }

    #[test]
    fn test_error_from_empty_body() {
        let err = response(502, "").into_error();
        assert_eq!(err.to_string(), "[502] ");
    }

    #[test]
    fn test_error_accepts_numeric_string_code() {
        let err = response(400, r#"{"code":"4220","message":"invalid"}"#).into_error();
        assert_eq!(err.code(), Some(4220));
    }

    #[test]
    fn test_get_on_non_object_body() {
        assert!(response(200, "[1,2,3]").get("code").is_none());
        assert!(response(200, "plain").get("code").is_none());
    }

    #[test]
    fn test_json_failure_keeps_raw_body() {
        let result = response(200, "invalid json").json::<Vec<u32>>();

        match result {
            Err(Error::DeserializationFailed {
                raw_response,
                status,
                ..
            }) => {
                assert_eq!(raw_response, "invalid json");
                assert_eq!(status, StatusCode::OK);
            }
            other => panic!("Expected DeserializationFailed, got {:?}", other),
        }
    }
}
