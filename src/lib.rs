//! # restapi - typed CRUD over REST endpoints
//!
//! Point a [`Client`] at an endpoint, derive a [`Resource`] for a namespace and
//! item type, and the five conventional operations become HTTP calls with JSON
//! bodies:
//!
//! ```no_run
//! use restapi::{Client, Config};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! struct User {
//!     nickname: String,
//!     age: u32,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), restapi::Error> {
//!     let client = restapi::new_client(
//!         "http://localhost:8080",
//!         Some(Config::new().with_header("authorization", "Bearer token")),
//!     );
//!     let users = restapi::create_resource::<User>(&client, "users");
//!
//!     users.create(&User { nickname: "Zero".to_string(), age: 18 }).await?;   // POST   /users          -> 201
//!     let page = users.list(0, 10).await?;                                    // GET    /users?page=0&pageSize=10 -> 200
//!     let user = users.retrieve("666").await?;                                // GET    /users/666      -> 200
//!     users.update("666", &User { age: 19, ..user }).await?;                  // PUT    /users/666      -> 200
//!     users.delete("666").await?;                                             // DELETE /users/666?id=666 -> 204
//!
//!     println!("{} users on the first page", page.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Headers and query parameters
//!
//! Every request starts from `content-type: application/json`, overlaid with
//! the headers in [`Config`]. Query parameters start from the configured
//! defaults, overlaid with what the operation adds. Later layers win and the
//! client's own maps are never modified.
//!
//! ## Errors
//!
//! A status other than the one an operation expects becomes
//! [`Error::Api`], built from the `code` and `message` fields of the response
//! body and falling back to the HTTP status and raw body:
//!
//! ```no_run
//! # use restapi::{Client, Error};
//! # async fn example() -> Result<(), Error> {
//! # let users = Client::new("http://localhost:8080").resource::<serde_json::Value>("users");
//! match users.delete("666").await {
//!     Ok(()) => {}
//!     Err(Error::Api { code, message, .. }) => eprintln!("[{}] {}", code, message),
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Network failures ([`Error::Network`]) and undecodable bodies
//! ([`Error::DeserializationFailed`]) are reported as they happened. Nothing
//! is retried.

mod client;
mod config;
mod error;
pub mod metadata;
mod resource;
mod response;
pub mod transport;

pub use client::{Client, ClientBuilder};
pub use config::Config;
pub use error::{Error, Result};
pub use resource::{Operation, Resource};
pub use response::RawResponse;
pub use transport::Transport;

/// Creates a client for `endpoint`, with `config` or an empty configuration.
pub fn new_client(endpoint: impl Into<String>, config: Option<Config>) -> Client {
    Client::with_config(endpoint, config.unwrap_or_default())
}

/// Derives a typed resource for `namespace` from `client`.
pub fn create_resource<T>(client: &Client, namespace: impl Into<String>) -> Resource<T> {
    client.resource(namespace)
}
