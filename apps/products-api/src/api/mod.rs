//! API routes module

pub mod health;
pub mod products;

use axum::Router;
use axum_helpers::server::{create_router, health_router};
use domain_products::ProductRepository;

use crate::openapi::ApiDoc;
use crate::state::AppState;

const HEALTH_MESSAGE: &str = "Product Management API is running";

/// Create all API routes (nested under `/api` by the shared router)
pub fn routes<R: ProductRepository + 'static>(state: &AppState<R>) -> Router {
    Router::new().nest("/products", products::router(state))
}

/// Assemble the full application: API, docs, middleware, health and readiness
pub fn app<R: ProductRepository + 'static>(state: AppState<R>) -> std::io::Result<Router> {
    let router = create_router::<ApiDoc>(routes(&state), &state.config.server)?;

    Ok(router
        .merge(health_router(state.config.app, HEALTH_MESSAGE))
        .merge(health::router(state)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use core_config::{app_info, database::DatabaseConfig, server::ServerConfig};
    use database::sqlite::SqliteConfig;
    use domain_products::{InMemoryProductRepository, ProductService};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use std::time::Duration;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let config = Config {
            app: app_info!(),
            database: DatabaseConfig::new(":memory:"),
            sqlite: SqliteConfig::new("sqlite::memory:"),
            server: ServerConfig::default(),
            environment: core_config::Environment::Development,
            shutdown_timeout: Duration::from_secs(1),
        };
        let state = AppState {
            config,
            products: ProductService::new(InMemoryProductRepository::new()),
        };
        app(state).unwrap()
    }

    async fn body_json(body: Body) -> Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_identity() {
        let response = test_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response.into_body()).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["name"], "products_api");
        assert_eq!(body["message"], HEALTH_MESSAGE);
    }

    #[tokio::test]
    async fn test_ready_with_memory_store() {
        let response = test_app()
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response.into_body()).await;
        assert_eq!(body["status"], "ready");
        assert_eq!(body["store"], "connected");
    }

    #[tokio::test]
    async fn test_products_mounted_under_api() {
        let app = test_app();

        let create = Request::post("/api/products")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({"name": "Widget", "category": "Tools", "quantity": 3, "price": 9.99})
                    .to_string(),
            ))
            .unwrap();
        let response = app.clone().oneshot(create).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(
                Request::get("/api/products/categories")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response.into_body()).await, json!(["Tools"]));
    }

    #[tokio::test]
    async fn test_unknown_route_uses_json_fallback() {
        let response = test_app()
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response.into_body()).await;
        assert_eq!(body["error"], "NOT_FOUND");
    }
}
