//! HTTP route handlers for the storefront API.
//!
//! Every handler answers with JSON. List mutations return the updated list
//! together with a `notice` the client shows as a toast.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Liveness check
//! GET  /health/ready                    - Readiness check (session database)
//!
//! # Catalog
//! GET  /products                        - Product listing (ProductQuery filters)
//! GET  /products/{id}                   - Product detail with recommendations
//! GET  /products/{id}/recommendations   - "You may also like"
//! GET  /products/{id}/reviews           - Reviews with rating summary
//! GET  /categories                      - Category listing
//! GET  /banners                         - Active announcement banners
//!
//! # Cart
//! GET  /cart                            - Cart with totals
//! POST /cart/add                        - Add product (quantity defaults to MOQ)
//! POST /cart/update                     - Set quantity (0 removes)
//! POST /cart/remove                     - Remove line
//! POST /cart/clear                      - Empty cart
//! GET  /cart/count                      - Cart badge count
//! POST /cart/checkout                   - Place order
//!
//! # Favorites
//! GET  /favorites                       - Saved products
//! POST /favorites/add                   - Save product
//! POST /favorites/remove                - Unsave product
//! POST /favorites/toggle                - Heart button
//! POST /favorites/clear                 - Remove all
//!
//! # Compare
//! GET  /compare                         - Compare list
//! POST /compare/add                     - Add product (bounded)
//! POST /compare/remove                  - Remove product
//! POST /compare/clear                   - Remove all
//! ```

pub mod cart;
pub mod catalog;
pub mod compare;
pub mod favorites;
pub mod health;
pub mod products;
pub mod views;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Deserialize;

use threadline_core::ProductId;

use crate::state::AppState;

/// Request body naming a single product.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ProductForm {
    pub product_id: ProductId,
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
        .route("/{id}/recommendations", get(products::recommendations))
        .route("/{id}/reviews", get(products::reviews))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
        .route("/checkout", post(cart::checkout))
}

/// Create the favorites routes router.
pub fn favorites_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(favorites::show))
        .route("/add", post(favorites::add))
        .route("/remove", post(favorites::remove))
        .route("/toggle", post(favorites::toggle))
        .route("/clear", post(favorites::clear))
}

/// Create the compare routes router.
pub fn compare_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(compare::show))
        .route("/add", post(compare::add))
        .route("/remove", post(compare::remove))
        .route("/clear", post(compare::clear))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Probes
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        // Catalog
        .nest("/products", product_routes())
        .route("/categories", get(catalog::categories))
        .route("/banners", get(catalog::banners))
        // Visitor lists
        .nest("/cart", cart_routes())
        .nest("/favorites", favorites_routes())
        .nest("/compare", compare_routes())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use axum::Json;
    use axum::body::Body;
    use axum::extract::{Query, State};
    use axum::http::{Request, StatusCode, header};
    use rust_decimal::Decimal;
    use secrecy::SecretString;
    use serde_json::{Value, json};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;
    use tower_sessions::{MemoryStore, SessionManagerLayer};
    use url::Url;

    use threadline_core::{CategoryId, CurrencyCode, Product};

    use super::*;
    use crate::config::{BackendConfig, StorefrontConfig};
    use crate::middleware::session::configure;

    fn test_config(backend_url: Url) -> StorefrontConfig {
        StorefrontConfig {
            database_url: SecretString::from("postgres://localhost/threadline_test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            currency: CurrencyCode::USD,
            backend: BackendConfig {
                url: backend_url,
                anon_key: SecretString::from("anon"),
                cache_ttl: Duration::from_secs(300),
            },
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    fn product(id: i64, name: &str, price: i64, category: i64, tag: &str) -> Product {
        Product::new(ProductId::new(id), name, Decimal::from(price))
            .with_category(CategoryId::new(category))
            .with_tag(tag)
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Linen Shirt", 100, 1, "linen").with_moq(6),
            product(2, "Linen Trousers", 110, 1, "linen"),
            product(3, "Cotton Shirt", 90, 1, "cotton"),
            product(4, "Wool Coat", 400, 2, "wool"),
            product(5, "Silk Scarf", 95, 3, "silk"),
            product(6, "Denim Jacket", 150, 2, "denim"),
        ]
    }

    /// In-process stand-in for the hosted PostgREST surface.
    #[derive(Clone)]
    struct FakeBackend {
        products: Arc<Mutex<Vec<Product>>>,
    }

    impl FakeBackend {
        fn set_products(&self, products: Vec<Product>) {
            *self.products.lock().unwrap() = products;
        }
    }

    async fn fake_products(
        State(fake): State<FakeBackend>,
        Query(params): Query<HashMap<String, String>>,
    ) -> Json<Vec<Product>> {
        let id = params
            .get("id")
            .and_then(|filter| filter.strip_prefix("eq."))
            .and_then(|id| id.parse::<ProductId>().ok());
        let products = fake.products.lock().unwrap();
        Json(
            products
                .iter()
                .filter(|p| p.is_active && id.is_none_or(|id| p.id == id))
                .cloned()
                .collect(),
        )
    }

    async fn fake_reviews() -> Json<Vec<Value>> {
        Json(Vec::new())
    }

    async fn fake_create_order(Json(mut order): Json<Value>) -> (StatusCode, Json<Vec<Value>>) {
        order["id"] = json!(1001);
        order["created_at"] = json!("2026-10-19T12:00:00Z");
        (StatusCode::CREATED, Json(vec![order]))
    }

    async fn spawn_backend(products: Vec<Product>) -> (Url, FakeBackend) {
        let fake = FakeBackend {
            products: Arc::new(Mutex::new(products)),
        };
        let router = Router::new()
            .route("/rest/v1/products", get(fake_products))
            .route("/rest/v1/product_reviews", get(fake_reviews))
            .route("/rest/v1/orders", post(fake_create_order))
            .with_state(fake.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

        (Url::parse(&format!("http://{addr}/")).unwrap(), fake)
    }

    async fn app(products: Vec<Product>) -> (Router, FakeBackend) {
        let (backend_url, fake) = spawn_backend(products).await;
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/threadline_test")
            .unwrap();
        let state = AppState::new(test_config(backend_url), pool).unwrap();

        let router = routes()
            .layer(configure(
                SessionManagerLayer::new(MemoryStore::default()),
                false,
            ))
            .with_state(state);
        (router, fake)
    }

    /// Minimal cookie jar: one session cookie carried between requests.
    struct Client {
        app: Router,
        backend: FakeBackend,
        cookie: Option<String>,
    }

    impl Client {
        async fn new() -> Self {
            let (app, backend) = app(catalog()).await;
            Self {
                app,
                backend,
                cookie: None,
            }
        }

        async fn get(&mut self, uri: &str) -> (StatusCode, Value) {
            self.send(Request::get(uri), Body::empty()).await
        }

        async fn post(&mut self, uri: &str, body: Value) -> (StatusCode, Value) {
            let request = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
            self.send(request, Body::from(body.to_string())).await
        }

        async fn send(&mut self, mut request: axum::http::request::Builder, body: Body) -> (StatusCode, Value) {
            if let Some(cookie) = &self.cookie {
                request = request.header(header::COOKIE, cookie);
            }
            let response = self
                .app
                .clone()
                .oneshot(request.body(body).unwrap())
                .await
                .unwrap();

            if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
                let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
                self.cookie = Some(pair.to_string());
            }

            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                    Value::String(String::from_utf8_lossy(&bytes).into_owned())
                })
            };
            (status, body)
        }
    }

    #[tokio::test]
    async fn test_health() {
        let mut client = Client::new().await;
        let (status, body) = client.get("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_product_listing_filters_by_category() {
        let mut client = Client::new().await;
        let (status, body) = client.get("/products?category=2&sort=price_asc").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
        assert_eq!(body["products"][0]["name"], "Denim Jacket");
        assert_eq!(body["products"][1]["name"], "Wool Coat");
    }

    #[tokio::test]
    async fn test_recommendations_follow_priority() {
        let mut client = Client::new().await;
        let (status, body) = client.get("/products/1/recommendations").await;

        assert_eq!(status, StatusCode::OK);
        let ids: Vec<i64> = body["products"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_i64().unwrap())
            .collect();
        // Category 1 first (2, 3), then nothing new by tag, then the price band (5).
        assert_eq!(ids, vec![2, 3, 5]);
    }

    #[tokio::test]
    async fn test_product_detail_includes_pack_price() {
        let mut client = Client::new().await;
        let (status, body) = client.get("/products/1").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["product"]["min_order_quantity"], 6);
        assert_eq!(body["product"]["pack_price"], "$600.00");
        assert!(body["recommendations"].as_array().unwrap().len() <= 10);
    }

    #[tokio::test]
    async fn test_cart_add_defaults_to_moq_and_totals() {
        let mut client = Client::new().await;

        let (status, body) = client.post("/cart/add", json!({ "product_id": 1 })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["items"][0]["quantity"], 6);
        assert_eq!(body["notice"]["level"], "success");

        let (_, body) = client
            .post("/cart/add", json!({ "product_id": 2, "quantity": 2 }))
            .await;
        assert_eq!(body["line_count"], 2);
        assert_eq!(body["item_count"], 8);
        assert_eq!(body["subtotal"], "$820.00");

        let (_, body) = client.get("/cart/count").await;
        assert_eq!(body["count"], 8);
    }

    #[tokio::test]
    async fn test_cart_update_raises_to_moq_and_zero_removes() {
        let mut client = Client::new().await;
        client.post("/cart/add", json!({ "product_id": 1 })).await;

        let (_, body) = client
            .post("/cart/update", json!({ "product_id": 1, "quantity": 2 }))
            .await;
        assert_eq!(body["items"][0]["quantity"], 6);
        assert_eq!(body["notice"]["level"], "info");

        let (_, body) = client
            .post("/cart/update", json!({ "product_id": 1, "quantity": 0 }))
            .await;
        assert_eq!(body["line_count"], 0);
    }

    #[tokio::test]
    async fn test_cart_remove_missing_line_warns() {
        let mut client = Client::new().await;
        let (status, body) = client.post("/cart/remove", json!({ "product_id": 3 })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["notice"]["level"], "warning");
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_is_rejected() {
        let mut client = Client::new().await;
        let (status, body) = client
            .post(
                "/cart/checkout",
                json!({
                    "contact_name": "Ece",
                    "email": "ece@boutique.com",
                    "shipping_address": "4 Harbour Rd",
                }),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["notice"]["message"], "Your cart is empty");
    }

    #[tokio::test]
    async fn test_favorites_duplicate_and_toggle() {
        let mut client = Client::new().await;

        let (_, body) = client.post("/favorites/add", json!({ "product_id": 4 })).await;
        assert_eq!(body["count"], 1);

        let (status, body) = client.post("/favorites/add", json!({ "product_id": 4 })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 1);
        assert_eq!(body["notice"]["level"], "warning");

        let (_, body) = client.post("/favorites/toggle", json!({ "product_id": 4 })).await;
        assert_eq!(body["is_favorite"], false);
        assert_eq!(body["count"], 0);

        let (_, body) = client.post("/favorites/toggle", json!({ "product_id": 5 })).await;
        assert_eq!(body["is_favorite"], true);
        assert_eq!(body["count"], 1);
    }

    #[tokio::test]
    async fn test_compare_capacity_is_enforced() {
        let mut client = Client::new().await;

        for id in 1..=4 {
            let (status, _) = client.post("/compare/add", json!({ "product_id": id })).await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, body) = client.post("/compare/add", json!({ "product_id": 5 })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 4);
        assert_eq!(body["is_full"], true);
        assert_eq!(body["notice"]["level"], "warning");

        let (_, body) = client.post("/compare/remove", json!({ "product_id": 1 })).await;
        assert_eq!(body["count"], 3);

        let (_, body) = client.post("/compare/clear", json!({})).await;
        assert_eq!(body["count"], 0);
    }

    #[tokio::test]
    async fn test_lists_are_isolated_per_session() {
        let mut first = Client::new().await;
        first.post("/cart/add", json!({ "product_id": 2 })).await;

        let mut second = Client {
            app: first.app.clone(),
            backend: first.backend.clone(),
            cookie: None,
        };
        let (_, body) = second.get("/cart").await;
        assert_eq!(body["line_count"], 0);
    }

    fn contact() -> Value {
        json!({
            "contact_name": "Ece Demir",
            "email": "ece@boutique.com",
            "shipping_address": "4 Harbour Rd",
        })
    }

    #[tokio::test]
    async fn test_unknown_product_is_not_found() {
        let mut client = Client::new().await;

        let (status, body) = client.get("/products/999999/reviews").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["notice"]["level"], "error");

        let (status, _) = client.get("/products/999999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_reviews_for_known_product() {
        let mut client = Client::new().await;
        let (status, body) = client.get("/products/4/reviews").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"]["count"], 0);
        assert_eq!(body["summary"]["average"], Value::Null);
    }

    #[tokio::test]
    async fn test_checkout_drops_delisted_lines_and_blocks() {
        let mut client = Client::new().await;
        client.post("/cart/add", json!({ "product_id": 2 })).await;
        client.post("/cart/add", json!({ "product_id": 3 })).await;
        client.get("/products").await;

        // Product 2 is delisted while the old catalog is still cached.
        client
            .backend
            .set_products(catalog().into_iter().filter(|p| p.id != ProductId::new(2)).collect());

        let (status, body) = client.post("/cart/checkout", contact()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["notice"]["level"], "error");

        let (_, cart) = client.get("/cart").await;
        assert_eq!(cart["line_count"], 1);
        assert_eq!(cart["items"][0]["product_id"], 3);
    }

    #[tokio::test]
    async fn test_checkout_uses_current_prices_and_clears_cart() {
        let mut client = Client::new().await;
        client
            .post("/cart/add", json!({ "product_id": 3, "quantity": 2 }))
            .await;
        client.get("/products").await;

        // Repriced while the old catalog is still cached.
        client.backend.set_products(
            catalog()
                .into_iter()
                .map(|mut p| {
                    if p.id == ProductId::new(3) {
                        p.price = Decimal::from(120);
                    }
                    p
                })
                .collect(),
        );

        let (status, body) = client.post("/cart/checkout", contact()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["order_id"], 1001);
        assert_eq!(body["status"], "pending");
        assert_eq!(body["total"], "$240.00");

        let (_, cart) = client.get("/cart").await;
        assert_eq!(cart["line_count"], 0);
    }
}
