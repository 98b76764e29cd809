use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::utils::outcome::{Outcome, Status};

#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
    pub details: Option<Value>,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub error: ApiErrorBody,
}

pub fn success<T>(data: T, status: StatusCode) -> Response
where
    T: Serialize,
{
    let body = ApiResponse {
        success: true,
        data: Some(data),
        message: None,
    };
    (status, Json(body)).into_response()
}

pub fn empty_success(status: StatusCode) -> Response {
    if status == StatusCode::NO_CONTENT || status == StatusCode::NOT_MODIFIED {
        return status.into_response();
    }
    let body: ApiResponse<()> = ApiResponse {
        success: true,
        data: None,
        message: None,
    };
    (status, Json(body)).into_response()
}

pub fn error(
    code: &str,
    message: impl Into<String>,
    details: Option<Value>,
    status: StatusCode,
) -> Response {
    let body = ApiErrorResponse {
        success: false,
        error: ApiErrorBody {
            code: code.to_string(),
            message: message.into(),
            details,
        },
    };

    (status, Json(body)).into_response()
}

impl<T> IntoResponse for Outcome<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        let status = self.status();
        let http_status = status.status_code();

        if status.is_success() || status == Status::NotModified {
            return match self.into_value() {
                Some(value) => success(value, http_status),
                None => empty_success(http_status),
            };
        }

        let message = self
            .error()
            .map(str::to_owned)
            .unwrap_or_else(|| "Request failed".to_string());
        if status == Status::InternalServerError {
            warn!(status = status.code(), message = %message, "Request failed");
        }
        error(status.error_code(), message, None, http_status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_status_reaches_response() {
        assert_eq!(
            Outcome::created(1).into_response().status(),
            StatusCode::CREATED
        );
        assert_eq!(
            Outcome::<i32>::conflict("taken").into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            Outcome::<i32>::no_content().into_response().status(),
            StatusCode::NO_CONTENT
        );
    }
}
