use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::dtos::{CreateEventAttendanceRequest, UpdateEventAttendanceRequest};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> Response {
    state.attendances.get_all().await.into_response()
}

pub async fn get(
    State(state): State<AppState>,
    Path((event_id, user_id)): Path<(i32, i32)>,
) -> Response {
    state
        .attendances
        .get_by_id(event_id, user_id)
        .await
        .into_response()
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateEventAttendanceRequest>,
) -> Response {
    state.attendances.create(request).await.into_response()
}

pub async fn update(
    State(state): State<AppState>,
    Json(request): Json<UpdateEventAttendanceRequest>,
) -> Response {
    state.attendances.update(request).await.into_response()
}

pub async fn delete(
    State(state): State<AppState>,
    Path((event_id, user_id)): Path<(i32, i32)>,
) -> Response {
    state
        .attendances
        .delete(event_id, user_id)
        .await
        .into_response()
}
