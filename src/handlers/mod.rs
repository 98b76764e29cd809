use axum::http::StatusCode;
use axum::response::Response;
use serde::Serialize;

use crate::utils::response::success;

pub mod attendances;
pub mod events;
pub mod maintenance;
pub mod photos;
pub mod users;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "cleanup-api",
    };

    success(payload, StatusCode::OK)
}
