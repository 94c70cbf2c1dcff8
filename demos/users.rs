//! Walks a `users` collection through list, create, retrieve, update and delete.
//!
//! Expects a REST server at `RESTAPI_ENDPOINT` (default `http://localhost:8080`).
//!
//! Run with: `cargo run --example users`

use restapi::{Config, Error};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
struct User {
    nickname: String,
    age: u32,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("restapi=debug,users=info")
        .init();

    let endpoint =
        std::env::var("RESTAPI_ENDPOINT").unwrap_or_else(|_| "http://localhost:8080".to_string());

    let client = restapi::new_client(
        endpoint,
        Some(Config::new().with_header("user-agent", "restapi-demo/0.1")),
    );
    let users = restapi::create_resource::<User>(&client, "users");

    println!("=== List ===");
    for user in users.list(0, 10).await? {
        println!("{} ({})", user.nickname, user.age);
    }

    println!("=== Create ===");
    users
        .create(&User {
            nickname: "Zero".to_string(),
            age: 18,
        })
        .await?;

    println!("=== Retrieve ===");
    let (user, err) = users.retrieve_or_default("666").await;
    if let Some(err) = err {
        println!("retrieve failed: {}", err);
    }
    println!("{:?}", user);

    println!("=== Update ===");
    users
        .update(
            "666",
            &User {
                nickname: "Zero2".to_string(),
                age: 16,
            },
        )
        .await?;

    println!("=== Delete ===");
    match users.delete("666").await {
        Ok(()) => println!("deleted"),
        Err(Error::Api { code, message, .. }) => println!("server refused: [{}] {}", code, message),
        Err(e) => return Err(e),
    }

    Ok(())
}
