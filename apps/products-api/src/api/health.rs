//! Readiness check backed by the configured product store

use axum::{Json, Router, extract::State, routing::get};
use axum_helpers::AppError;
use axum_helpers::server::{HealthCheckFuture, run_health_checks};
use domain_products::ProductRepository;
use serde_json::Value;

use crate::state::AppState;

/// Readiness check: 200 when the product store answers, 503 otherwise
pub async fn ready_handler<R: ProductRepository + 'static>(
    State(state): State<AppState<R>>,
) -> Result<Json<Value>, AppError> {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "store",
        Box::pin(async {
            state
                .products
                .health_check()
                .await
                .map_err(|e| format!("Product store check failed: {}", e))
        }),
    )];

    run_health_checks(checks).await
}

pub fn router<R: ProductRepository + 'static>(state: AppState<R>) -> Router {
    Router::new()
        .route("/ready", get(ready_handler::<R>))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use core_config::{app_info, database::DatabaseConfig, server::ServerConfig};
    use database::sqlite::{SqliteConfig, connect};
    use domain_products::{ProductService, SqliteProductRepository};
    use http_body_util::BodyExt;
    use std::time::Duration;
    use tower::ServiceExt;

    fn state<R: ProductRepository>(repository: R) -> AppState<R> {
        AppState {
            config: Config {
                app: app_info!(),
                database: DatabaseConfig::new("sqlite::memory:"),
                sqlite: SqliteConfig::new("sqlite::memory:"),
                server: ServerConfig::default(),
                environment: core_config::Environment::Development,
                shutdown_timeout: Duration::from_secs(1),
            },
            products: ProductService::new(repository),
        }
    }

    async fn get_ready(router: Router) -> (StatusCode, Value) {
        let response = router
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_ready_with_sqlite_store() {
        let db = connect(&SqliteConfig::new("sqlite::memory:")).await.unwrap();
        let (status, body) = get_ready(router(state(SqliteProductRepository::new(db)))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
        assert_eq!(body["store"], "connected");
    }

    #[tokio::test]
    async fn test_closed_store_is_service_unavailable() {
        let db = connect(&SqliteConfig::new("sqlite::memory:")).await.unwrap();
        let repository = SqliteProductRepository::new(db.clone());
        db.close().await.unwrap();

        let (status, body) = get_ready(router(state(repository))).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["code"], 1011);
        assert_eq!(body["error"], "SERVICE_UNAVAILABLE");
        assert_eq!(body["message"], "Not ready: store disconnected");
    }
}
