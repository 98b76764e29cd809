use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::dtos::{ChangePasswordRequest, CreateUserRequest, UpdateUserRequest};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> Response {
    state.users.get_all().await.into_response()
}

pub async fn get(State(state): State<AppState>, Path(user_id): Path<i32>) -> Response {
    state.users.get_by_id(user_id).await.into_response()
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Response {
    state.users.create(request).await.into_response()
}

pub async fn update(
    State(state): State<AppState>,
    Json(request): Json<UpdateUserRequest>,
) -> Response {
    state.users.update(request).await.into_response()
}

pub async fn change_password(
    State(state): State<AppState>,
    Json(request): Json<ChangePasswordRequest>,
) -> Response {
    state.users.change_password(request).await.into_response()
}

pub async fn delete(State(state): State<AppState>, Path(user_id): Path<i32>) -> Response {
    state.users.delete(user_id).await.into_response()
}

pub async fn events(State(state): State<AppState>, Path(user_id): Path<i32>) -> Response {
    state
        .attendances
        .get_events_by_user_id(user_id)
        .await
        .into_response()
}
