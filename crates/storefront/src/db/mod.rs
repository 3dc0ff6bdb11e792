//! `PostgreSQL` connection for the session store.
//!
//! Catalog and order data live in the hosted backend and are reached over
//! its REST API (see [`crate::backend`]). The local database only holds
//! `tower_sessions.session`, which keeps each visitor's cart, favorites, and
//! compare list.
//!
//! # Migrations
//!
//! The session table is created by:
//! ```bash
//! cargo run -p threadline-cli -- migrate sessions
//! ```

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
