//! Query string extractor that reports failures as [`AppError`].

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// Like [`axum::extract::Query`], but a malformed query string yields the
/// standard JSON error body (`INVALID_QUERY`, 400) instead of plain text.
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(QueryParams(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Flags {
        in_stock: Option<bool>,
    }

    fn app() -> Router {
        Router::new().route(
            "/",
            get(|QueryParams(f): QueryParams<Flags>| async move {
                format!("{:?}", f.in_stock)
            }),
        )
    }

    #[tokio::test]
    async fn test_query_parsed() {
        let response = app()
            .oneshot(Request::builder().uri("/?in_stock=true").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_bad_query_is_rejected() {
        let response = app()
            .oneshot(Request::builder().uri("/?in_stock=maybe").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
