//! Request descriptions and the header/query merge rules.

use std::collections::BTreeMap;

/// Header every request starts from.
pub const DEFAULT_CONTENT_TYPE: (&str, &str) = ("content-type", "application/json");

/// Everything the transport needs to send one request, apart from the method
/// and the body.
///
/// `url` is a template: path segments of the form `:name` are filled from
/// `path_params` by the transport. Maps are ordered so the request a
/// resource builds is the same on every run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestMetadata {
    /// Absolute URL template, e.g. `http://localhost:8080/users/:id`.
    pub url: String,

    /// Values for the `:name` placeholders in `url`.
    pub path_params: BTreeMap<String, String>,

    /// Query parameters, already merged with the client defaults.
    pub query: BTreeMap<String, String>,

    /// Headers with lowercase names, already merged with the client defaults.
    pub headers: BTreeMap<String, String>,
}

impl RequestMetadata {
    /// Creates a request for `url` with no parameters or headers.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Sets a path parameter.
    pub fn with_path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.insert(name.into(), value.into());
        self
    }

    /// Sets a header, replacing any value already present under the same
    /// (case-insensitive) name.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    /// Sets a query parameter.
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Overlays multiple query parameters; later values win.
    pub fn with_query_params<'a>(
        mut self,
        params: impl IntoIterator<Item = (&'a String, &'a String)>,
    ) -> Self {
        self.query = merge(&self.query, params);
        self
    }

    /// Returns a header value by name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// Merges two string maps into a fresh one; `overrides` wins on conflict.
///
/// Neither input is modified. The result is ordered by key, so it does not
/// depend on the iteration order of the inputs.
///
/// ```
/// use restapi::metadata::merge;
/// use std::collections::HashMap;
///
/// let defaults: HashMap<String, String> =
///     [("a", "1"), ("b", "2")].map(|(k, v)| (k.to_string(), v.to_string())).into();
/// let overrides: HashMap<String, String> =
///     [("b", "3"), ("c", "4")].map(|(k, v)| (k.to_string(), v.to_string())).into();
///
/// let merged = merge(&defaults, &overrides);
/// assert_eq!(merged["a"], "1");
/// assert_eq!(merged["b"], "3");
/// assert_eq!(merged["c"], "4");
/// ```
pub fn merge<'a, 'b>(
    defaults: impl IntoIterator<Item = (&'a String, &'a String)>,
    overrides: impl IntoIterator<Item = (&'b String, &'b String)>,
) -> BTreeMap<String, String> {
    let mut merged: BTreeMap<String, String> = defaults
        .into_iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    merged.extend(overrides.into_iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

/// Builds the header set for a request: `content-type: application/json`
/// overlaid with the configured headers. Names are lowercased so a configured
/// `Content-Type` replaces the default.
pub fn merge_headers<'a>(
    configured: impl IntoIterator<Item = (&'a String, &'a String)>,
) -> BTreeMap<String, String> {
    let mut merged = BTreeMap::new();
    merged.insert(
        DEFAULT_CONTENT_TYPE.0.to_string(),
        DEFAULT_CONTENT_TYPE.1.to_string(),
    );
    for (name, value) in configured {
        merged.insert(name.to_ascii_lowercase(), value.clone());
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_merge_is_right_biased() {
        let merged = merge(&map(&[("a", "1"), ("b", "2")]), &map(&[("b", "3"), ("c", "4")]));

        let expected: BTreeMap<String, String> = map(&[("a", "1"), ("b", "3"), ("c", "4")])
            .into_iter()
            .collect();
        assert_eq!(merged, expected);
    }

    #[test]
    fn test_merge_leaves_inputs_untouched() {
        let defaults = map(&[("lang", "en")]);
        let overrides = map(&[("lang", "fr")]);

        let merged = merge(&defaults, &overrides);

        assert_eq!(merged["lang"], "fr");
        assert_eq!(defaults["lang"], "en");
    }

    #[test]
    fn test_merge_with_empty_sides() {
        let empty: HashMap<String, String> = HashMap::new();
        assert!(merge(&empty, &empty).is_empty());
        assert_eq!(merge(&map(&[("a", "1")]), &empty)["a"], "1");
        assert_eq!(merge(&empty, &map(&[("a", "1")]))["a"], "1");
    }

    #[test]
    fn test_headers_default_to_json() {
        let headers = merge_headers(&HashMap::<String, String>::new());
        assert_eq!(headers.len(), 1);
        assert_eq!(headers["content-type"], "application/json");
    }

    #[test]
    fn test_configured_content_type_overrides_default() {
        let headers = merge_headers(&map(&[("Content-Type", "text/plain"), ("X-Trace", "1")]));
        assert_eq!(headers["content-type"], "text/plain");
        assert_eq!(headers["x-trace"], "1");
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_call_header_overrides_merged_header() {
        let metadata = RequestMetadata {
            headers: merge_headers(&map(&[("content-type", "text/plain")])),
            ..RequestMetadata::new("http://localhost/users")
        }
        .with_header("Content-Type", "application/merge-patch+json");

        assert_eq!(
            metadata.header("content-type"),
            Some("application/merge-patch+json")
        );
    }

    #[test]
    fn test_with_query_params_overlays() {
        let metadata = RequestMetadata::new("http://localhost/users")
            .with_query_param("page", "0")
            .with_query_params(&map(&[("page", "2"), ("q", "zero")]));

        assert_eq!(metadata.query["page"], "2");
        assert_eq!(metadata.query["q"], "zero");
    }
}
