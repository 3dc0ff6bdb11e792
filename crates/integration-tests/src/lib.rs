//! Integration tests for Threadline.
//!
//! The tests drive a running storefront over HTTP. Each test builds its own
//! cookie-holding client, so every test is a fresh visitor with an empty
//! cart, favorites list, and compare list.
//!
//! # Running Tests
//!
//! ```bash
//! # Create the session table and start the storefront
//! cargo run -p threadline-cli -- migrate sessions
//! cargo run -p threadline-storefront
//!
//! # Run the ignored integration tests
//! cargo test -p threadline-integration-tests -- --ignored
//! ```
//!
//! `STOREFRONT_BASE_URL` selects the server (default `http://localhost:3000`).
//! The hosted catalog must hold at least five active products.

#![cfg_attr(not(test), forbid(unsafe_code))]

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use threadline_core::ProductId;

/// Base URL for the storefront API.
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A storefront visitor with its own session cookie.
pub struct Visitor {
    client: Client,
    base_url: String,
}

impl Visitor {
    /// Start a fresh visitor session.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().cookie_store(true).build()?,
            base_url: storefront_base_url(),
        })
    }

    /// GET a JSON endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<(StatusCode, T), reqwest::Error> {
        let resp = self
            .client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await?;
        let status = resp.status();
        Ok((status, resp.json().await?))
    }

    /// POST a JSON body to an endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON.
    pub async fn post(&self, path: &str, body: &Value) -> Result<(StatusCode, Value), reqwest::Error> {
        let resp = self
            .client
            .post(format!("{}{path}", self.base_url))
            .json(body)
            .send()
            .await?;
        let status = resp.status();
        Ok((status, resp.json().await?))
    }

    /// Ids of the first `n` active products, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing request fails.
    pub async fn product_ids(&self, n: usize) -> Result<Vec<ProductId>, reqwest::Error> {
        let (_, body): (_, Value) = self.get(&format!("/products?limit={n}")).await?;
        Ok(body["products"]
            .as_array()
            .map(|products| {
                products
                    .iter()
                    .filter_map(|p| p["id"].as_i64())
                    .map(ProductId::new)
                    .collect()
            })
            .unwrap_or_default())
    }
}
