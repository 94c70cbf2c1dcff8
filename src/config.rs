//! Client configuration: default headers and default query parameters.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Static configuration shared by every request a [`Client`](crate::Client) makes.
///
/// Both maps default to empty. The `content-type: application/json` header is
/// added at request time and does not need to be listed here; setting it here
/// overrides it.
///
/// `Config` deserializes from any serde format, with missing fields defaulted:
///
/// ```
/// use restapi::Config;
///
/// let config: Config = serde_json::from_str(r#"{"headers": {"x-api-key": "secret"}}"#).unwrap();
/// assert_eq!(config.headers["x-api-key"], "secret");
/// assert!(config.query.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default request headers.
    pub headers: HashMap<String, String>,

    /// Default query parameters.
    pub query: HashMap<String, String>,
}

impl Config {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a default header.
    ///
    /// ```
    /// use restapi::Config;
    ///
    /// let config = Config::new()
    ///     .with_header("authorization", "Bearer token")
    ///     .with_query("lang", "en");
    ///
    /// assert_eq!(config.headers["authorization"], "Bearer token");
    /// assert_eq!(config.query["lang"], "en");
    /// ```
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Adds a default query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }
}
