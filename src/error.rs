//! Error types for resource operations.
//!
//! Transport failures and decode failures are surfaced as they happened.
//! Responses with an unexpected status are folded into [`Error::Api`], which
//! carries the code and message the server reported (or the HTTP status and
//! raw body when it reported none).

use http::StatusCode;

/// The main error type for resource operations.
///
/// # Examples
///
/// ```no_run
/// use restapi::{Client, Error};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Default, Serialize, Deserialize)]
/// struct User {
///     nickname: String,
///     age: u32,
/// }
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::new("https://api.example.com");
/// let users = client.resource::<User>("users");
///
/// match users.retrieve("666").await {
///     Ok(user) => println!("Found {}", user.nickname),
///     Err(Error::Api { code, message, .. }) => {
///         eprintln!("server said [{}] {}", code, message);
///     }
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A network-level error occurred (connection failed, DNS lookup failed, etc.).
    ///
    /// This wraps the underlying `reqwest::Error` unchanged.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a status code the operation did not expect.
    ///
    /// `code` is the `code` field of the JSON body when present and nonzero,
    /// otherwise the HTTP status. `message` is the `message` field of the body
    /// when non-empty, otherwise the raw body text.
    #[error("[{code}] {message}")]
    Api {
        /// Application or HTTP status code
        code: i64,
        /// Human readable message
        message: String,
        /// The HTTP status code of the response
        status: StatusCode,
        /// The raw response body
        raw_response: String,
    },

    /// Failed to deserialize a successful response body into the expected type.
    #[error("Failed to deserialize response (status {status}): {serde_error}")]
    DeserializationFailed {
        /// The raw response body that failed to deserialize
        raw_response: String,
        /// The serde error message
        serde_error: String,
        /// The HTTP status code
        status: StatusCode,
    },

    /// Failed to serialize the request body.
    #[error("Failed to serialize request: {0}")]
    SerializationFailed(String),

    /// Invalid configuration was provided.
    ///
    /// Invalid header names or values, a path parameter the template asks for
    /// but the request does not supply, or a builder without an endpoint.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The endpoint combined with the resource path is not a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Returns the code carried by an [`Error::Api`].
    ///
    /// ```
    /// use restapi::Error;
    /// use http::StatusCode;
    ///
    /// let err = Error::Api {
    ///     code: 40401,
    ///     message: "user not found".to_string(),
    ///     status: StatusCode::NOT_FOUND,
    ///     raw_response: r#"{"code":40401,"message":"user not found"}"#.to_string(),
    /// };
    ///
    /// assert_eq!(err.code(), Some(40401));
    /// assert_eq!(err.to_string(), "[40401] user not found");
    /// ```
    pub fn code(&self) -> Option<i64> {
        match self {
            Error::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns the message carried by an [`Error::Api`].
    pub fn message(&self) -> Option<&str> {
        match self {
            Error::Api { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Returns the HTTP status code if this error has one.
    ///
    /// Returns `Some(status)` for `Api` and `DeserializationFailed` errors,
    /// `None` for other error types.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::DeserializationFailed { status, .. } => Some(*status),
            Error::Network(e) => e.status(),
            _ => None,
        }
    }

    /// Returns the raw response body if this error has one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::Api { raw_response, .. } => Some(raw_response),
            Error::DeserializationFailed { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }
}

/// A specialized `Result` type for resource operations.
pub type Result<T> = std::result::Result<T, Error>;
