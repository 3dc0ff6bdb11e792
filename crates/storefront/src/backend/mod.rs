//! Hosted backend (Supabase) client.
//!
//! # Architecture
//!
//! - Talks to the project's PostgREST surface (`/rest/v1/{table}`) with `reqwest`
//! - The hosted backend is source of truth - NO local sync, direct API calls
//! - In-memory caching via `moka` for catalog reads (5 minute TTL by default)
//!
//! # Tables
//!
//! - `products`, `categories`, `banner_messages`, `product_reviews` - read
//! - `orders` - created on checkout
//!
//! # Example
//!
//! ```rust,ignore
//! use threadline_storefront::backend::BackendClient;
//!
//! let client = BackendClient::new(&config.backend);
//!
//! let catalog = client.list_active_products().await?;
//! let product = client.get_product(ProductId::new(12)).await?;
//! ```

mod cache;
mod client;

pub use client::BackendClient;

use thiserror::Error;

/// Errors that can occur when calling the hosted backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Request URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the backend.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Backend returned an error status.
    #[error("Backend returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the response body.
        message: String,
    },
}

/// PostgREST error body.
#[derive(Debug, serde::Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    hint: Option<String>,
}

/// Extract a readable message from an error response body.
///
/// Falls back to a truncated copy of the raw body when it is not a
/// PostgREST error object.
fn api_error_message(body: &str) -> String {
    let parsed = serde_json::from_str::<ApiErrorBody>(body).ok();
    let Some(ApiErrorBody {
        code,
        message: Some(message),
        hint,
    }) = parsed
    else {
        let raw: String = body.chars().take(200).collect();
        return if raw.is_empty() {
            "(empty response body)".to_string()
        } else {
            raw
        };
    };

    let mut parts = vec![message];
    if let Some(code) = code {
        parts.push(format!("code {code}"));
    }
    if let Some(hint) = hint {
        parts.push(format!("hint: {hint}"));
    }
    parts.join("; ")
}
