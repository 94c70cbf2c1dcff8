//! Typed CRUD access to one REST collection.
//!
//! A [`Resource`] binds a [`Client`] to a namespace such as `users` and maps
//! the five conventional operations onto HTTP:
//!
//! | Operation  | Method | Path                          | Success |
//! |------------|--------|-------------------------------|---------|
//! | `list`     | GET    | `{endpoint}/{namespace}`      | 200     |
//! | `create`   | POST   | `{endpoint}/{namespace}`      | 201     |
//! | `retrieve` | GET    | `{endpoint}/{namespace}/:id`  | 200     |
//! | `update`   | PUT    | `{endpoint}/{namespace}/:id`  | 200     |
//! | `delete`   | DELETE | `{endpoint}/{namespace}/:id`  | 204     |
//!
//! `:id` stays a placeholder in the request; the transport substitutes it.

use crate::{
    metadata::{merge, merge_headers, RequestMetadata},
    Client, Error, RawResponse, Result,
};
use http::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::marker::PhantomData;

/// The five operations a [`Resource`] supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Create,
    Retrieve,
    Update,
    Delete,
}

impl Operation {
    /// The HTTP method the operation is sent with.
    pub fn method(self) -> Method {
        match self {
            Operation::List | Operation::Retrieve => Method::GET,
            Operation::Create => Method::POST,
            Operation::Update => Method::PUT,
            Operation::Delete => Method::DELETE,
        }
    }

    /// The only status code the operation accepts as success.
    pub fn expected_status(self) -> StatusCode {
        match self {
            Operation::List | Operation::Retrieve | Operation::Update => StatusCode::OK,
            Operation::Create => StatusCode::CREATED,
            Operation::Delete => StatusCode::NO_CONTENT,
        }
    }

    /// Whether the path template ends in the `:id` placeholder.
    pub fn targets_item(self) -> bool {
        matches!(
            self,
            Operation::Retrieve | Operation::Update | Operation::Delete
        )
    }

    /// Builds the URL template for this operation.
    ///
    /// ```
    /// use restapi::Operation;
    ///
    /// assert_eq!(
    ///     Operation::List.path("http://localhost:8080", "users"),
    ///     "http://localhost:8080/users"
    /// );
    /// assert_eq!(
    ///     Operation::Delete.path("http://localhost:8080/", "users"),
    ///     "http://localhost:8080/users/:id"
    /// );
    /// ```
    pub fn path(self, endpoint: &str, namespace: &str) -> String {
        let endpoint = endpoint.trim_end_matches('/');
        if self.targets_item() {
            format!("{}/{}/:id", endpoint, namespace)
        } else {
            format!("{}/{}", endpoint, namespace)
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Retrieve => "retrieve",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Typed CRUD accessor for the items of one namespace.
///
/// Holds a handle to the client it was created from; the client's
/// configuration is only read, so resources can be used from many tasks at
/// once.
///
/// # Examples
///
/// ```no_run
/// use restapi::Client;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Default, Serialize, Deserialize)]
/// struct User {
///     nickname: String,
///     age: u32,
/// }
///
/// # async fn example() -> Result<(), restapi::Error> {
/// let client = Client::new("http://localhost:8080");
/// let users = client.resource::<User>("users");
///
/// users.create(&User { nickname: "Zero".to_string(), age: 18 }).await?;
///
/// let page = users.list(0, 10).await?;
/// println!("{} users on the first page", page.len());
///
/// let mut user = users.retrieve("666").await?;
/// user.age += 1;
/// users.update("666", &user).await?;
/// users.delete("666").await?;
/// # Ok(())
/// # }
/// ```
pub struct Resource<T> {
    client: Client,
    namespace: String,
    _item: PhantomData<fn() -> T>,
}

impl<T> Clone for Resource<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            namespace: self.namespace.clone(),
            _item: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Resource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("endpoint", &self.client.endpoint())
            .field("namespace", &self.namespace)
            .finish()
    }
}

impl<T> Resource<T> {
    pub(crate) fn new(client: Client, namespace: impl Into<String>) -> Self {
        Self {
            client,
            namespace: namespace.into(),
            _item: PhantomData,
        }
    }

    /// The namespace this resource addresses.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The client this resource sends through.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Builds the request an operation sends, without sending it.
    ///
    /// `id` fills the `:id` path parameter of item operations (and the `id`
    /// query parameter of `Delete`); `query` is overlaid on the client's
    /// default query parameters.
    ///
    /// ```
    /// use restapi::{Client, Operation};
    ///
    /// let client = Client::new("http://localhost:8080");
    /// let users = client.resource::<serde_json::Value>("users");
    ///
    /// let request = users.request_for(Operation::Delete, Some("666"), &Default::default());
    /// assert_eq!(request.url, "http://localhost:8080/users/:id");
    /// assert_eq!(request.path_params["id"], "666");
    /// assert_eq!(request.query["id"], "666");
    /// assert_eq!(request.header("content-type"), Some("application/json"));
    /// ```
    pub fn request_for(
        &self,
        operation: Operation,
        id: Option<&str>,
        query: &BTreeMap<String, String>,
    ) -> RequestMetadata {
        let config = self.client.config();

        let mut request = RequestMetadata {
            url: operation.path(self.client.endpoint(), &self.namespace),
            path_params: BTreeMap::new(),
            query: merge(&config.query, query),
            headers: merge_headers(&config.headers),
        };

        if let Some(id) = id {
            if operation.targets_item() {
                request = request.with_path_param("id", id);
            }
            if operation == Operation::Delete {
                request = request.with_query_param("id", id);
            }
        }

        request
    }

    /// Fails with the server's code and message unless `response` carries the
    /// status `operation` expects.
    fn check_status(&self, operation: Operation, response: RawResponse) -> Result<RawResponse> {
        let expected = operation.expected_status();
        if response.status == expected {
            return Ok(response);
        }

        let error = response.into_error();
        tracing::warn!(
            operation = %operation,
            method = %operation.method(),
            namespace = %self.namespace,
            expected = expected.as_u16(),
            status = ?error.status().map(|s| s.as_u16()),
            error = %error,
            "Unexpected response status"
        );
        Err(error)
    }
}

impl<T> Resource<T>
where
    T: DeserializeOwned,
{
    /// Lists one page of items.
    ///
    /// Sends `GET {endpoint}/{namespace}?page={page}&pageSize={page_size}`
    /// merged with the client's default query, and expects `200` with a JSON
    /// array body.
    pub async fn list(&self, page: u32, page_size: u32) -> Result<Vec<T>> {
        self.list_with_query(page, page_size, &HashMap::new()).await
    }

    /// Lists one page of items with extra query parameters.
    ///
    /// Later layers win on key conflicts: client defaults, then
    /// `page`/`pageSize`, then `extra`.
    pub async fn list_with_query(
        &self,
        page: u32,
        page_size: u32,
        extra: &HashMap<String, String>,
    ) -> Result<Vec<T>> {
        let paging: BTreeMap<String, String> = [
            ("page".to_string(), page.to_string()),
            ("pageSize".to_string(), page_size.to_string()),
        ]
        .into();
        let query = merge(&paging, extra);

        let request = self.request_for(Operation::List, None, &query);
        let response = self.client.transport().get(&request).await?;
        self.check_status(Operation::List, response)?.json()
    }

    /// Fetches one item by id.
    ///
    /// Sends `GET {endpoint}/{namespace}/:id` and expects `200`.
    pub async fn retrieve(&self, id: &str) -> Result<T> {
        let request = self.request_for(Operation::Retrieve, Some(id), &BTreeMap::new());
        let response = self.client.transport().get(&request).await?;
        self.check_status(Operation::Retrieve, response)?.json()
    }

    /// Fetches one item by id, falling back to `T::default()` on failure.
    ///
    /// The error, if any, is returned next to the fallback value.
    pub async fn retrieve_or_default(&self, id: &str) -> (T, Option<Error>)
    where
        T: Default,
    {
        match self.retrieve(id).await {
            Ok(item) => (item, None),
            Err(e) => (T::default(), Some(e)),
        }
    }
}

impl<T> Resource<T>
where
    T: Serialize,
{
    /// Creates an item.
    ///
    /// Sends `POST {endpoint}/{namespace}` with `item` as the JSON body and
    /// expects `201`. The response body is not read into a value.
    pub async fn create(&self, item: &T) -> Result<()> {
        let request = self.request_for(Operation::Create, None, &BTreeMap::new());
        let response = self.client.transport().post(&request, Some(item)).await?;
        self.check_status(Operation::Create, response)?;
        Ok(())
    }

    /// Replaces an item by id.
    ///
    /// Sends `PUT {endpoint}/{namespace}/:id` with `item` as the JSON body and
    /// expects `200`.
    pub async fn update(&self, id: &str, item: &T) -> Result<()> {
        let request = self.request_for(Operation::Update, Some(id), &BTreeMap::new());
        let response = self.client.transport().put(&request, Some(item)).await?;
        self.check_status(Operation::Update, response)?;
        Ok(())
    }
}

impl<T> Resource<T> {
    /// Deletes an item by id.
    ///
    /// Sends `DELETE {endpoint}/{namespace}/:id?id={id}` and expects `204`.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let request = self.request_for(Operation::Delete, Some(id), &BTreeMap::new());
        let response = self.client.transport().delete(&request).await?;
        self.check_status(Operation::Delete, response)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;

    fn users() -> Resource<serde_json::Value> {
        let config = Config::new()
            .with_header("X-Api-Key", "secret")
            .with_query("lang", "en");
        Client::with_config("http://localhost:8080/", config).resource("users")
    }

    #[test]
    fn test_operation_contract() {
        let cases = [
            (Operation::List, Method::GET, 200, "http://h/users"),
            (Operation::Create, Method::POST, 201, "http://h/users"),
            (Operation::Retrieve, Method::GET, 200, "http://h/users/:id"),
            (Operation::Update, Method::PUT, 200, "http://h/users/:id"),
            (Operation::Delete, Method::DELETE, 204, "http://h/users/:id"),
        ];

        for (operation, method, status, path) in cases {
            assert_eq!(operation.method(), method, "{}", operation);
            assert_eq!(operation.expected_status().as_u16(), status, "{}", operation);
            assert_eq!(operation.path("http://h", "users"), path, "{}", operation);
        }
    }

    #[test]
    fn test_list_request_carries_defaults() {
        let query: BTreeMap<String, String> =
            [("page".to_string(), "0".to_string())].into();
        let request = users().request_for(Operation::List, None, &query);

        assert_eq!(request.url, "http://localhost:8080/users");
        assert!(request.path_params.is_empty());
        assert_eq!(request.query["page"], "0");
        assert_eq!(request.query["lang"], "en");
        assert_eq!(request.header("x-api-key"), Some("secret"));
        assert_eq!(request.header("content-type"), Some("application/json"));
    }

    #[test]
    fn test_item_requests_keep_placeholder() {
        let resource = users();
        for operation in [Operation::Retrieve, Operation::Update] {
            let request = resource.request_for(operation, Some("666"), &BTreeMap::new());
            assert_eq!(request.url, "http://localhost:8080/users/:id");
            assert_eq!(request.path_params["id"], "666");
            assert!(!request.query.contains_key("id"));
        }
    }

    #[test]
    fn test_delete_request_sends_id_in_query() {
        let request = users().request_for(Operation::Delete, Some("666"), &BTreeMap::new());

        assert_eq!(request.query["id"], "666");
        assert_eq!(request.query["lang"], "en");
        assert_eq!(request.path_params["id"], "666");
    }

    #[test]
    fn test_call_query_overrides_client_default() {
        let query: BTreeMap<String, String> =
            [("lang".to_string(), "fr".to_string())].into();
        let resource = users();
        let request = resource.request_for(Operation::List, None, &query);

        assert_eq!(request.query["lang"], "fr");
        assert_eq!(resource.client().config().query["lang"], "en");
    }
}
