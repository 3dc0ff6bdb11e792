//! PostgREST client for the hosted backend.
//!
//! Catalog reads are cached using `moka`; order inserts always go to the
//! backend.

use std::future::Future;
use std::sync::Arc;

use moka::future::Cache;
use reqwest::{RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use threadline_core::{BannerMessage, Category, NewOrder, Order, Product, ProductId, Review};

use super::cache::{CacheKey, CacheValue};
use super::{BackendError, api_error_message};
use crate::config::BackendConfig;

const CACHE_CAPACITY: u64 = 1000;

/// Client for the hosted backend's REST surface.
///
/// Cheap to clone; clones share the HTTP connection pool and the cache.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    rest_url: Url,
    api_key: SecretString,
    cache: Cache<CacheKey, CacheValue>,
}

impl BackendClient {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Url` if the REST endpoint cannot be derived
    /// from the configured project URL.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(BackendClientInner {
                client: reqwest::Client::new(),
                rest_url: config.url.join("rest/v1/")?,
                api_key: config.anon_key.clone(),
                cache,
            }),
        })
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// All active products, newest first.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request fails or the rows cannot be parsed.
    #[instrument(skip(self))]
    pub async fn list_active_products(&self) -> Result<Arc<Vec<Product>>, BackendError> {
        self.cached(
            CacheKey::ActiveProducts,
            |value| match value {
                CacheValue::Products(products) => Some(products),
                _ => None,
            },
            |products| CacheValue::Products(Arc::clone(products)),
            || self.load_active_products(),
        )
        .await
    }

    /// All active products, read straight from the backend.
    ///
    /// Used where prices must be current (checkout). The result replaces
    /// the cached catalog.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request fails or the rows cannot be parsed.
    #[instrument(skip(self))]
    pub async fn fetch_active_products(&self) -> Result<Arc<Vec<Product>>, BackendError> {
        let products = self.load_active_products().await?;
        self.inner
            .cache
            .insert(CacheKey::ActiveProducts, CacheValue::Products(Arc::clone(&products)))
            .await;
        Ok(products)
    }

    async fn load_active_products(&self) -> Result<Arc<Vec<Product>>, BackendError> {
        let url = self.table_url(
            "products",
            &[
                ("select", "*"),
                ("is_active", "eq.true"),
                ("order", "created_at.desc"),
            ],
        )?;
        Ok(Arc::new(self.get_json::<Vec<Product>>(url).await?))
    }

    /// A single active product.
    ///
    /// Served from the cached catalog when it is warm.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::NotFound` if no active product has this id.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, BackendError> {
        if let Some(CacheValue::Products(catalog)) =
            self.inner.cache.get(&CacheKey::ActiveProducts).await
            && let Some(product) = catalog.iter().find(|p| p.id == id)
        {
            debug!(%id, "product served from cached catalog");
            return Ok(product.clone());
        }

        let product = self
            .cached(
                CacheKey::Product(id),
                |value| match value {
                    CacheValue::Product(product) => Some(*product),
                    _ => None,
                },
                |product| CacheValue::Product(Box::new(product.clone())),
                || async move {
                    let id_filter = format!("eq.{id}");
                    let url = self.table_url(
                        "products",
                        &[
                            ("select", "*"),
                            ("id", id_filter.as_str()),
                            ("is_active", "eq.true"),
                            ("limit", "1"),
                        ],
                    )?;
                    self.get_json::<Vec<Product>>(url)
                        .await?
                        .into_iter()
                        .next()
                        .ok_or_else(|| BackendError::NotFound(format!("product {id}")))
                },
            )
            .await?;
        Ok(product)
    }

    /// All categories, alphabetically.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request fails or the rows cannot be parsed.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Arc<Vec<Category>>, BackendError> {
        self.cached(
            CacheKey::Categories,
            |value| match value {
                CacheValue::Categories(categories) => Some(categories),
                _ => None,
            },
            |categories| CacheValue::Categories(Arc::clone(categories)),
            || async move {
                let url = self.table_url("categories", &[("select", "*"), ("order", "name.asc")])?;
                Ok(Arc::new(self.get_json::<Vec<Category>>(url).await?))
            },
        )
        .await
    }

    /// Active announcement banners in display order.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request fails or the rows cannot be parsed.
    #[instrument(skip(self))]
    pub async fn list_active_banners(&self) -> Result<Arc<Vec<BannerMessage>>, BackendError> {
        self.cached(
            CacheKey::Banners,
            |value| match value {
                CacheValue::Banners(banners) => Some(banners),
                _ => None,
            },
            |banners| CacheValue::Banners(Arc::clone(banners)),
            || async move {
                let url = self.table_url(
                    "banner_messages",
                    &[
                        ("select", "*"),
                        ("is_active", "eq.true"),
                        ("order", "display_order.asc"),
                    ],
                )?;
                let banners = self.get_json::<Vec<BannerMessage>>(url).await?;
                Ok(Arc::new(BannerMessage::active_in_order(banners)))
            },
        )
        .await
    }

    /// Reviews for a product, newest first.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request fails or the rows cannot be parsed.
    #[instrument(skip(self))]
    pub async fn list_reviews(&self, product_id: ProductId) -> Result<Arc<Vec<Review>>, BackendError> {
        self.cached(
            CacheKey::Reviews(product_id),
            |value| match value {
                CacheValue::Reviews(reviews) => Some(reviews),
                _ => None,
            },
            |reviews| CacheValue::Reviews(Arc::clone(reviews)),
            || async move {
                let product_filter = format!("eq.{product_id}");
                let url = self.table_url(
                    "product_reviews",
                    &[
                        ("select", "*"),
                        ("product_id", product_filter.as_str()),
                        ("order", "created_at.desc"),
                    ],
                )?;
                Ok(Arc::new(self.get_json::<Vec<Review>>(url).await?))
            },
        )
        .await
    }

    /// Drop every cached catalog read.
    pub fn invalidate_catalog(&self) {
        self.inner.cache.invalidate_all();
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Insert an order and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the insert is rejected or the response
    /// cannot be parsed.
    #[instrument(skip(self, order), fields(lines = order.items.len(), total = %order.total))]
    pub async fn create_order(&self, order: &NewOrder) -> Result<Order, BackendError> {
        let url = self.table_url("orders", &[("select", "*")])?;
        let request = self
            .inner
            .client
            .post(url)
            .header("Prefer", "return=representation")
            .json(order);

        let response = self.authorized(request).send().await?;
        let rows: Vec<Order> = read_json(response).await?;

        let order = rows.into_iter().next().ok_or_else(|| BackendError::Api {
            status: StatusCode::CREATED.as_u16(),
            message: "insert returned no rows".to_string(),
        })?;
        tracing::info!(order_id = %order.id, "order created");
        Ok(order)
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    /// Build `{rest_url}/{table}?{params}`.
    fn table_url(&self, table: &str, params: &[(&str, &str)]) -> Result<Url, BackendError> {
        Ok(build_table_url(&self.inner.rest_url, table, params)?)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let key = self.inner.api_key.expose_secret();
        request.header("apikey", key).bearer_auth(key)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, BackendError> {
        let response = self.authorized(self.inner.client.get(url)).send().await?;
        read_json(response).await
    }

    /// Return the cached value for `key`, or load, cache, and return it.
    async fn cached<T, L, Fut>(
        &self,
        key: CacheKey,
        from_cache: fn(CacheValue) -> Option<T>,
        to_cache: fn(&T) -> CacheValue,
        load: L,
    ) -> Result<T, BackendError>
    where
        L: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, BackendError>>,
    {
        if let Some(value) = self.inner.cache.get(&key).await.and_then(from_cache) {
            debug!(?key, "cache hit");
            return Ok(value);
        }

        let value = load().await?;
        self.inner.cache.insert(key, to_cache(&value)).await;
        Ok(value)
    }

    #[cfg(test)]
    pub(crate) async fn seed_products(&self, products: Vec<Product>) {
        self.inner
            .cache
            .insert(CacheKey::ActiveProducts, CacheValue::Products(Arc::new(products)))
            .await;
    }
}

fn build_table_url(rest_url: &Url, table: &str, params: &[(&str, &str)]) -> Result<Url, url::ParseError> {
    let mut url = rest_url.join(table)?;
    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params);
    }
    Ok(url)
}

/// Check the status and parse a JSON response body.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(1);
        return Err(BackendError::RateLimited(retry_after));
    }

    // Read as text first for better error diagnostics
    let body = response.text().await?;

    if !status.is_success() {
        tracing::error!(
            status = %status,
            body = %body.chars().take(500).collect::<String>(),
            "Backend returned non-success status"
        );
        return Err(BackendError::Api {
            status: status.as_u16(),
            message: api_error_message(&body),
        });
    }

    serde_json::from_str(&body).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %body.chars().take(500).collect::<String>(),
            "Failed to parse backend response"
        );
        BackendError::Parse(e)
    })
}
