//! The REST client: an endpoint plus the defaults every request inherits.
//!
//! The [`Client`] type is the entry point; derive typed resources from it
//! with [`Client::resource`]. Use [`ClientBuilder`] when the defaults or the
//! underlying `reqwest::Client` need configuring.

use crate::{Config, Error, Resource, Result, Transport};
use std::sync::Arc;

/// A REST API client bound to one endpoint.
///
/// Cloning is cheap and clones share configuration. Nothing about a client
/// changes after construction, so it can be shared across tasks freely.
///
/// # Examples
///
/// ```no_run
/// use restapi::{Client, Config};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct User {
///     nickname: String,
///     age: u32,
/// }
///
/// # async fn example() -> Result<(), restapi::Error> {
/// let client = Client::with_config(
///     "https://api.example.com",
///     Config::new().with_header("authorization", "Bearer token"),
/// );
///
/// let users = client.resource::<User>("users");
/// for user in users.list(0, 20).await? {
///     println!("{} ({})", user.nickname, user.age);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    endpoint: String,
    config: Config,
    transport: Transport,
}

impl Client {
    /// Creates a client with an empty configuration.
    ///
    /// The endpoint is not validated here; a malformed endpoint is reported
    /// as [`Error::InvalidUrl`] by the first request.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_config(endpoint, Config::default())
    }

    /// Creates a client with default headers and query parameters.
    pub fn with_config(endpoint: impl Into<String>, config: Config) -> Self {
        Self::from_parts(endpoint.into(), config, Transport::default())
    }

    /// Creates a new `ClientBuilder` for configuring a client.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use restapi::Client;
    /// use std::time::Duration;
    ///
    /// # fn example() -> Result<(), restapi::Error> {
    /// let http_client = reqwest::Client::builder()
    ///     .timeout(Duration::from_secs(10))
    ///     .build()?;
    ///
    /// let client = Client::builder()
    ///     .endpoint("https://api.example.com")
    ///     .default_header("x-api-key", "secret")
    ///     .default_query("lang", "en")
    ///     .http_client(http_client)
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    fn from_parts(endpoint: String, config: Config, transport: Transport) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                endpoint,
                config,
                transport,
            }),
        }
    }

    /// The base URL all resource paths are built on.
    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    /// The default headers and query parameters.
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub(crate) fn transport(&self) -> &Transport {
        &self.inner.transport
    }

    /// Derives a typed resource for `namespace`, e.g. `users`.
    pub fn resource<T>(&self, namespace: impl Into<String>) -> Resource<T> {
        Resource::new(self.clone(), namespace)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.inner.endpoint)
            .field("config", &self.inner.config)
            .finish()
    }
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```
/// use restapi::ClientBuilder;
///
/// let client = ClientBuilder::new()
///     .endpoint("http://localhost:8080")
///     .default_header("User-Agent", "my-app/1.0")
///     .build()
///     .unwrap();
///
/// assert_eq!(client.config().headers["User-Agent"], "my-app/1.0");
/// ```
pub struct ClientBuilder {
    endpoint: Option<String>,
    config: Config,
    http_client: Option<reqwest::Client>,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            endpoint: None,
            config: Config::default(),
            http_client: None,
        }
    }

    /// Sets the base URL for all requests.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Adds a default header that will be included in all requests.
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config = self.config.with_header(name, value);
        self
    }

    /// Adds a default query parameter that will be included in all requests.
    pub fn default_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config = self.config.with_query(key, value);
        self
    }

    /// Sends requests through a preconfigured `reqwest::Client`.
    ///
    /// Timeouts, proxies and TLS options are configured there.
    pub fn http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if no endpoint was provided or if the HTTP client
    /// cannot be built.
    pub fn build(self) -> Result<Client> {
        let endpoint = self
            .endpoint
            .ok_or_else(|| Error::ConfigurationError("Endpoint is required".to_string()))?;

        let http_client = match self.http_client {
            Some(http_client) => http_client,
            None => reqwest::Client::builder().build().map_err(|e| {
                Error::ConfigurationError(format!("Failed to build HTTP client: {}", e))
            })?,
        };

        Ok(Client::from_parts(
            endpoint,
            self.config,
            Transport::new(http_client),
        ))
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_endpoint() {
        match Client::builder().build() {
            Err(Error::ConfigurationError(message)) => assert!(message.contains("Endpoint")),
            other => panic!("Expected ConfigurationError, got {:?}", other),
        }
    }

    #[test]
    fn test_builder_collects_defaults() {
        let client = Client::builder()
            .endpoint("http://localhost:8080")
            .config(Config::new().with_query("lang", "en"))
            .default_header("x-api-key", "secret")
            .default_query("region", "eu")
            .build()
            .unwrap();

        assert_eq!(client.endpoint(), "http://localhost:8080");
        assert_eq!(client.config().headers["x-api-key"], "secret");
        assert_eq!(client.config().query["lang"], "en");
        assert_eq!(client.config().query["region"], "eu");
    }

    #[test]
    fn test_new_does_not_validate_endpoint() {
        let client = Client::new("definitely not a url");
        assert_eq!(client.endpoint(), "definitely not a url");
        assert!(client.config().headers.is_empty());
    }

    #[test]
    fn test_clones_share_configuration() {
        let client = Client::with_config("http://localhost", Config::new().with_query("a", "1"));
        let clone = client.clone();
        assert!(Arc::ptr_eq(&client.inner, &clone.inner));
    }
}
