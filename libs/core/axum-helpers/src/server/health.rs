use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use core_config::AppInfo;
use futures::future::join_all;
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use utoipa::ToSchema;

use crate::errors::AppError;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
    pub message: &'static str,
}

#[derive(Clone, Copy)]
struct HealthState {
    app: AppInfo,
    message: &'static str,
}

/// A boxed future for health checks with a string error
pub type HealthCheckFuture<'a> = Pin<Box<dyn Future<Output = Result<(), String>> + Send + 'a>>;

/// Runs multiple health checks concurrently and returns aggregated results.
///
/// When every check passes the body is
/// `{"status": "ready", "<name>": "connected", ...}`. Otherwise the error is
/// [`AppError::ServiceUnavailable`] naming the failed checks, rendered as a 503.
///
/// # Example
/// ```ignore
/// let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![
///     ("database", Box::pin(async {
///         check_health(&db).await.map_err(|e| e.to_string())
///     })),
/// ];
/// run_health_checks(checks).await
/// ```
pub async fn run_health_checks(
    checks: Vec<(&str, HealthCheckFuture<'_>)>,
) -> Result<Json<Value>, AppError> {
    let names: Vec<_> = checks.iter().map(|(name, _)| *name).collect();
    let futures: Vec<_> = checks.into_iter().map(|(_, check)| check).collect();
    let results = join_all(futures).await;

    let mut status_map = BTreeMap::new();
    let mut failed = Vec::new();

    for (name, result) in names.into_iter().zip(results) {
        match result {
            Ok(_) => {
                status_map.insert(name, "connected");
            }
            Err(e) => {
                tracing::error!("Readiness check failed: {} error: {:?}", name, e);
                failed.push(name);
            }
        }
    }

    if !failed.is_empty() {
        return Err(AppError::ServiceUnavailable(format!(
            "Not ready: {} disconnected",
            failed.join(", ")
        )));
    }

    let mut response = json!({ "status": "ready" });
    if let Value::Object(ref mut map) = response {
        for (name, status) in status_map {
            map.insert(name.to_string(), json!(status));
        }
    }

    Ok(Json(response))
}

/// Liveness handler. Always 200 while the process is serving.
async fn health_handler(State(state): State<HealthState>) -> Response {
    let response = HealthResponse {
        status: "ok",
        name: state.app.name,
        version: state.app.version,
        message: state.message,
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Creates a router with the `/health` endpoint.
///
/// # Example
/// ```ignore
/// use axum_helpers::server::health_router;
/// use core_config::app_info;
///
/// let app = router.merge(health_router(app_info!(), "Inventory API is running"));
/// ```
pub fn health_router(app_info: AppInfo, message: &'static str) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(HealthState {
            app: app_info,
            message,
        })
}
