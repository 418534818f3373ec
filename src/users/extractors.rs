use anyhow::anyhow;
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON request body. Unlike `axum::Json` it does not insist on a
/// `Content-Type` header, and every failure becomes a 400 `{"error": ...}`.
/// A bare `null` body reads as `T::default()`.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        serde_json::from_slice::<Option<T>>(&body)
            .map(|v| JsonBody(v.unwrap_or_default()))
            .map_err(|e| ApiError::BadRequest(e.to_string()))
    }
}

/// The `{id}` path segment, parsed as a user id. A segment that is not an
/// integer is rejected the way the store rejects it: as a server error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::Store(anyhow!(e.body_text())))?;
        raw.trim().parse::<i64>().map(UserId).map_err(|_| {
            ApiError::Store(anyhow!("invalid input syntax for type bigint: \"{raw}\""))
        })
    }
}
