use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::dtos::{CreatePhotoRequest, UpdatePhotoRequest};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> Response {
    state.photos.get_all().await.into_response()
}

pub async fn get(State(state): State<AppState>, Path(photo_id): Path<i32>) -> Response {
    state.photos.get_by_id(photo_id).await.into_response()
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreatePhotoRequest>,
) -> Response {
    state.photos.create(request).await.into_response()
}

pub async fn update(
    State(state): State<AppState>,
    Json(request): Json<UpdatePhotoRequest>,
) -> Response {
    state.photos.update(request).await.into_response()
}

pub async fn delete(State(state): State<AppState>, Path(photo_id): Path<i32>) -> Response {
    state.photos.delete(photo_id).await.into_response()
}
