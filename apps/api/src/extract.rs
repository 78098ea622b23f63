//! # Request Extractors
//!
//! Drop-in replacements for axum's `Query` and `Path` whose rejections are
//! [`ApiError`]s, so a malformed query string or path segment gets the same
//! `{"code","message"}` body as every other failure.
//!
//! ```text
//! ?price_cents=abc ──► axum QueryRejection (400, text/plain)
//!                  ──► ApiError::validation (422, JSON)
//! ```

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;

/// Deserialized query string.
#[derive(Debug, Clone, Copy, Default)]
pub struct Query<T>(pub T);

/// Deserialized path parameters.
#[derive(Debug, Clone, Copy)]
pub struct Path<T>(pub T);

impl<T, S> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let axum::extract::Query(value) =
            axum::extract::Query::<T>::from_request_parts(parts, state).await?;
        Ok(Query(value))
    }
}

impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let axum::extract::Path(value) =
            axum::extract::Path::<T>::from_request_parts(parts, state).await?;
        Ok(Path(value))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        debug!(error = %rejection, "Rejected query string");
        ApiError::validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        debug!(error = %rejection, "Rejected path parameters");
        // Missing params means the route and handler disagree.
        if rejection.status().is_server_error() {
            ApiError::internal(rejection.body_text())
        } else {
            ApiError::validation(rejection.body_text())
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::handlers::products::{ListQuery, PriceQuery};
    use axum::http::{Request, StatusCode};

    fn request_parts(uri: &str) -> Parts {
        let (parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        parts
    }

    #[tokio::test]
    async fn test_query_extracts() {
        let mut parts = request_parts("/products/search/price?price_cents=300");
        let Query(query) = Query::<PriceQuery>::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(query.price_cents, 300);

        let mut parts = request_parts("/products?order_by_price=true&limit=5");
        let Query(query) = Query::<ListQuery>::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(query.order_by_price);
        assert_eq!(query.limit, Some(5));
    }

    #[tokio::test]
    async fn test_bad_query_is_json_validation_error() {
        for uri in [
            "/products/search/price",
            "/products/search/price?price_cents=abc",
            "/products?order_by_price=maybe",
        ] {
            let mut parts = request_parts(uri);
            let err = if uri.starts_with("/products/search") {
                Query::<PriceQuery>::from_request_parts(&mut parts, &())
                    .await
                    .map(|_| ())
                    .unwrap_err()
            } else {
                Query::<ListQuery>::from_request_parts(&mut parts, &())
                    .await
                    .map(|_| ())
                    .unwrap_err()
            };
            assert_eq!(err.code, ErrorCode::ValidationError, "{uri}");
            assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        }
    }

    #[tokio::test]
    async fn test_path_outside_router_is_internal() {
        let mut parts = request_parts("/products/42");
        let err = Path::<i64>::from_request_parts(&mut parts, &())
            .await
            .map(|_| ())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Internal);
    }
}
