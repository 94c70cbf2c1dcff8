//! HTTP transport: the layer that turns a [`RequestMetadata`] into network I/O.
//!
//! The transport owns path-parameter substitution (`:name` segments in the URL
//! template), query encoding, header conversion and JSON body encoding. It
//! reports what the server answered without judging the status code; that is
//! the resource layer's job.

use crate::{metadata::RequestMetadata, Error, RawResponse, Result};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;
use std::time::Instant;
use url::Url;

/// Verb-specific request functions over a shared `reqwest::Client`.
///
/// # Examples
///
/// ```no_run
/// use restapi::{metadata::RequestMetadata, Transport};
///
/// # async fn example() -> Result<(), restapi::Error> {
/// let transport = Transport::default();
///
/// let request = RequestMetadata::new("https://api.example.com/users/:id")
///     .with_path_param("id", "666")
///     .with_header("accept", "application/json");
///
/// let response = transport.get(&request).await?;
/// println!("{} {}", response.status, response.text());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Transport {
    http_client: reqwest::Client,
}

impl Transport {
    /// Creates a transport over a preconfigured `reqwest::Client`.
    ///
    /// Timeouts, proxies and TLS settings belong on that client.
    pub fn new(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }

    /// Sends a GET request.
    pub async fn get(&self, request: &RequestMetadata) -> Result<RawResponse> {
        self.send::<()>(Method::GET, request, None).await
    }

    /// Sends a POST request with an optional JSON body.
    pub async fn post<B>(&self, request: &RequestMetadata, body: Option<&B>) -> Result<RawResponse>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, request, body).await
    }

    /// Sends a PUT request with an optional JSON body.
    pub async fn put<B>(&self, request: &RequestMetadata, body: Option<&B>) -> Result<RawResponse>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::PUT, request, body).await
    }

    /// Sends a DELETE request.
    pub async fn delete(&self, request: &RequestMetadata) -> Result<RawResponse> {
        self.send::<()>(Method::DELETE, request, None).await
    }

    async fn send<B>(
        &self,
        method: Method,
        request: &RequestMetadata,
        body: Option<&B>,
    ) -> Result<RawResponse>
    where
        B: Serialize + ?Sized,
    {
        let url = resolve_url(request)?;
        let headers = header_map(request)?;

        tracing::debug!(
            method = %method,
            url = %url,
            "Executing HTTP request"
        );

        let mut builder = self.http_client.request(method, url).headers(headers);

        if let Some(body) = body {
            let json =
                serde_json::to_vec(body).map_err(|e| Error::SerializationFailed(e.to_string()))?;
            builder = builder.body(json);
        }

        let start_time = Instant::now();
        let response = builder.send().await?;

        let status = response.status();
        let headers = response.headers().clone();
        let raw_body = response.text().await?;
        let latency = start_time.elapsed();

        tracing::info!(
            status = status.as_u16(),
            latency_ms = latency.as_millis(),
            "Received HTTP response"
        );

        Ok(RawResponse::new(status, headers, raw_body, latency))
    }
}

/// Resolves the URL template of `request` into a concrete URL.
///
/// Every path segment of the form `:name` is replaced by the percent-encoded
/// value of path parameter `name`, then the query parameters are appended in
/// key order.
///
/// # Errors
///
/// Returns [`Error::InvalidUrl`] when the template does not parse, and
/// [`Error::ConfigurationError`] when a placeholder has no parameter or the
/// URL cannot carry a path.
///
/// ```
/// use restapi::{metadata::RequestMetadata, transport::resolve_url};
///
/// let request = RequestMetadata::new("http://localhost:8080/users/:id")
///     .with_path_param("id", "a b")
///     .with_query_param("lang", "en");
///
/// let url = resolve_url(&request).unwrap();
/// assert_eq!(url.as_str(), "http://localhost:8080/users/a%20b?lang=en");
/// ```
pub fn resolve_url(request: &RequestMetadata) -> Result<Url> {
    let mut url = Url::parse(&request.url)?;
    if url.cannot_be_a_base() {
        return Err(Error::ConfigurationError(format!(
            "URL cannot carry a path: {}",
            request.url
        )));
    }

    let path = url
        .path()
        .split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) if !name.is_empty() => request
                .path_params
                .get(name)
                .map(|value| urlencoding::encode(value).into_owned())
                .ok_or_else(|| {
                    Error::ConfigurationError(format!("Missing path parameter: {}", name))
                }),
            _ => Ok(segment.to_string()),
        })
        .collect::<Result<Vec<_>>>()?
        .join("/");
    url.set_path(&path);

    if !request.query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in &request.query {
            pairs.append_pair(key, value);
        }
    }

    Ok(url)
}

fn header_map(request: &RequestMetadata) -> Result<HeaderMap> {
    let mut headers = HeaderMap::with_capacity(request.headers.len());
    for (name, value) in &request.headers {
        let name = HeaderName::try_from(name.as_str())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_str())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_without_placeholders() {
        let request = RequestMetadata::new("http://localhost:8080/users");
        let url = resolve_url(&request).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/users");
    }

    #[test]
    fn test_resolve_substitutes_placeholder() {
        let request =
            RequestMetadata::new("http://localhost:8080/users/:id").with_path_param("id", "666");
        let url = resolve_url(&request).unwrap();
        assert_eq!(url.path(), "/users/666");
    }

    #[test]
    fn test_resolve_encodes_reserved_characters() {
        let request = RequestMetadata::new("http://localhost:8080/files/:id")
            .with_path_param("id", "a/b?c");
        let url = resolve_url(&request).unwrap();
        assert_eq!(url.path(), "/files/a%2Fb%3Fc");
        assert!(url.query().is_none());
    }

    #[test]
    fn test_resolve_keeps_base_path() {
        let request = RequestMetadata::new("http://localhost:8080/api/v1/users/:id")
            .with_path_param("id", "7")
            .with_query_param("pageSize", "10")
            .with_query_param("page", "0");
        let url = resolve_url(&request).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/v1/users/7?page=0&pageSize=10"
        );
    }

    #[test]
    fn test_resolve_missing_parameter() {
        let request = RequestMetadata::new("http://localhost:8080/users/:id");
        match resolve_url(&request) {
            Err(Error::ConfigurationError(message)) => assert!(message.contains("id")),
            other => panic!("Expected ConfigurationError, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_invalid_url() {
        let request = RequestMetadata::new("not a url/users");
        assert!(matches!(resolve_url(&request), Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_header_map_rejects_invalid_name() {
        let request = RequestMetadata::new("http://localhost").with_header("bad header", "x");
        assert!(matches!(
            header_map(&request),
            Err(Error::ConfigurationError(_))
        ));
    }
}
