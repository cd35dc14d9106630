//! Integration tests for the online shop API.
//!
//! The tests talk HTTP to a running server and are `#[ignore]`d by default.
//!
//! # Running Tests
//!
//! ```bash
//! cargo run -p online-shop-cli -- migrate
//! cargo run -p online-shop-api &
//! SHOP_BASE_URL=http://127.0.0.1:8080 cargo test -p online-shop-integration-tests -- --ignored
//! ```

use reqwest::{Client, Response};
use serde::Serialize;

/// Server used when `SHOP_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Alert header prefix of the default application name.
pub const APP: &str = "onlineshopapp";

/// HTTP client bound to one running server.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Context for the server at `SHOP_BASE_URL`.
    #[must_use]
    pub fn new() -> Self {
        let base_url = std::env::var("SHOP_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned())
            .trim_end_matches('/')
            .to_owned();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `GET path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be reached.
    pub async fn get(&self, path: &str) -> reqwest::Result<Response> {
        self.client.get(self.url(path)).send().await
    }

    /// `POST path` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be reached.
    pub async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> reqwest::Result<Response> {
        self.client.post(self.url(path)).json(body).send().await
    }

    /// `PUT path` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be reached.
    pub async fn put<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> reqwest::Result<Response> {
        self.client.put(self.url(path)).json(body).send().await
    }

    /// `DELETE path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be reached.
    pub async fn delete(&self, path: &str) -> reqwest::Result<Response> {
        self.client.delete(self.url(path)).send().await
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Header value as a string, if present.
#[must_use]
pub fn header(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}
