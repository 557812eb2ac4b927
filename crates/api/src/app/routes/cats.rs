use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use cattery_core::CatDto;

use crate::app::errors::ApiError;
use crate::app::extract::{CatIdPath, JsonBody};
use crate::app::services::CatService;

pub fn router() -> Router {
    Router::new()
        .route("/v1/cats", get(list_cats).post(create_cat))
        .route("/v1/cats/:id", get(get_cat).delete(delete_cat))
        // Older lookup paths; same extraction and responses as `/v1/cats/:id`.
        .route("/v1/cats-with-lens/:id", get(get_cat))
        .route("/v1/cats-with-body-lens/:id", get(get_cat))
}

pub async fn list_cats(
    Extension(service): Extension<Arc<CatService>>,
) -> Result<Response, ApiError> {
    let cats = service.list_cats().await?;
    Ok((StatusCode::OK, Json(cats)).into_response())
}

pub async fn get_cat(
    Extension(service): Extension<Arc<CatService>>,
    CatIdPath(id): CatIdPath,
) -> Result<Response, ApiError> {
    match service.get_cat(id).await? {
        Some(cat) => Ok((StatusCode::OK, Json(cat)).into_response()),
        None => Ok(StatusCode::NOT_FOUND.into_response()),
    }
}

pub async fn create_cat(
    Extension(service): Extension<Arc<CatService>>,
    JsonBody(input): JsonBody<CatDto>,
) -> Result<Response, ApiError> {
    let cat = service.add_cat(input).await?;
    Ok((StatusCode::CREATED, Json(cat)).into_response())
}

pub async fn delete_cat(
    Extension(service): Extension<Arc<CatService>>,
    CatIdPath(id): CatIdPath,
) -> Result<Response, ApiError> {
    match service.delete_cat(id).await? {
        Some(_) => Ok(StatusCode::NO_CONTENT.into_response()),
        None => Ok(StatusCode::NOT_FOUND.into_response()),
    }
}
