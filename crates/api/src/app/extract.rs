//! Typed request extractors shared by every cat route.
//!
//! All path-id and body decoding goes through here so a malformed id or body
//! always becomes a 400 `ApiError`, never a handler panic or a framework
//! default status.

use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use cattery_core::CatId;

use crate::app::errors::ApiError;

/// The `{id}` path segment, parsed as a `CatId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatIdPath(pub CatId);

#[async_trait]
impl<S> FromRequestParts<S> for CatIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::InvalidId(e.body_text()))?;

        parse_cat_id(&raw).map(Self)
    }
}

pub fn parse_cat_id(raw: &str) -> Result<CatId, ApiError> {
    raw.parse::<CatId>()
        .map_err(|e| ApiError::InvalidId(e.to_string()))
}

/// JSON body whose rejections (bad syntax, missing fields, wrong content
/// type) all map to 400.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| ApiError::InvalidBody(rejection.body_text()))?;

        Ok(Self(value))
    }
}
