use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::dtos::{CreateEventRequest, UpdateEventRequest, UpdateEventStatusRequest};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> Response {
    state.events.get_all().await.into_response()
}

pub async fn get(State(state): State<AppState>, Path(event_id): Path<i32>) -> Response {
    state.events.get_by_id(event_id).await.into_response()
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> Response {
    state.events.create(request).await.into_response()
}

pub async fn update(
    State(state): State<AppState>,
    Json(request): Json<UpdateEventRequest>,
) -> Response {
    state.events.update(request).await.into_response()
}

pub async fn update_status(
    State(state): State<AppState>,
    Path(event_id): Path<i32>,
    Json(request): Json<UpdateEventStatusRequest>,
) -> Response {
    state
        .events
        .update_status(event_id, request.status_id)
        .await
        .into_response()
}

pub async fn delete(State(state): State<AppState>, Path(event_id): Path<i32>) -> Response {
    state.events.delete(event_id).await.into_response()
}

pub async fn photos(State(state): State<AppState>, Path(event_id): Path<i32>) -> Response {
    state.photos.get_by_event_id(event_id).await.into_response()
}

pub async fn users(State(state): State<AppState>, Path(event_id): Path<i32>) -> Response {
    state
        .attendances
        .get_users_by_event_id(event_id)
        .await
        .into_response()
}
