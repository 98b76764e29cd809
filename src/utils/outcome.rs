use axum::http::StatusCode;

/// Status class carried by every [`Outcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Ok,
    Created,
    NoContent,
    NotModified,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    InternalServerError,
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::Created => 201,
            Status::NoContent => 204,
            Status::NotModified => 304,
            Status::BadRequest => 400,
            Status::Unauthorized => 401,
            Status::Forbidden => 403,
            Status::NotFound => 404,
            Status::Conflict => 409,
            Status::InternalServerError => 500,
        }
    }

    pub fn is_success(self) -> bool {
        (200..300).contains(&self.code())
    }

    pub fn status_code(self) -> StatusCode {
        match self {
            Status::Ok => StatusCode::OK,
            Status::Created => StatusCode::CREATED,
            Status::NoContent => StatusCode::NO_CONTENT,
            Status::NotModified => StatusCode::NOT_MODIFIED,
            Status::BadRequest => StatusCode::BAD_REQUEST,
            Status::Unauthorized => StatusCode::UNAUTHORIZED,
            Status::Forbidden => StatusCode::FORBIDDEN,
            Status::NotFound => StatusCode::NOT_FOUND,
            Status::Conflict => StatusCode::CONFLICT,
            Status::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable code used in error envelopes.
    pub fn error_code(self) -> &'static str {
        match self {
            Status::BadRequest => "BAD_REQUEST",
            Status::Unauthorized => "UNAUTHORIZED",
            Status::Forbidden => "FORBIDDEN",
            Status::NotFound => "NOT_FOUND",
            Status::Conflict => "CONFLICT",
            Status::InternalServerError => "INTERNAL_SERVER_ERROR",
            Status::Ok | Status::Created | Status::NoContent | Status::NotModified => "OK",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Payload<T> {
    Value(T),
    Empty,
    Error(String),
}

/// Result of a validation, repository or service call.
///
/// An outcome is either a success (with or without a value) or a failure
/// carrying a human-readable message. It is only built through the named
/// constructors so every call site states which status it means.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Outcome<T> {
    status: Status,
    payload: Payload<T>,
}

impl<T> Outcome<T> {
    pub fn ok(value: T) -> Self {
        Self::with_value(Status::Ok, value)
    }

    pub fn created(value: T) -> Self {
        Self::with_value(Status::Created, value)
    }

    pub fn no_content() -> Self {
        Self {
            status: Status::NoContent,
            payload: Payload::Empty,
        }
    }

    pub fn not_modified() -> Self {
        Self {
            status: Status::NotModified,
            payload: Payload::Empty,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_error(Status::BadRequest, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::with_error(Status::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::with_error(Status::Forbidden, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_error(Status::NotFound, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::with_error(Status::Conflict, message)
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::with_error(Status::InternalServerError, message)
    }

    fn with_value(status: Status, value: T) -> Self {
        Self {
            status,
            payload: Payload::Value(value),
        }
    }

    fn with_error(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            payload: Payload::Error(message.into()),
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn value(&self) -> Option<&T> {
        match &self.payload {
            Payload::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self.payload {
            Payload::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.payload {
            Payload::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Converts the value of a successful outcome, keeping its status.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            status: self.status,
            payload: match self.payload {
                Payload::Value(value) => Payload::Value(f(value)),
                Payload::Empty => Payload::Empty,
                Payload::Error(message) => Payload::Error(message),
            },
        }
    }

    /// Returns the failure re-typed for another pipeline stage, or `None`
    /// when the outcome succeeded. Status and message are kept verbatim.
    pub fn rejection<U>(self) -> Option<Outcome<U>> {
        match self.payload {
            Payload::Error(message) => Some(Outcome {
                status: self.status,
                payload: Payload::Error(message),
            }),
            _ if !self.status.is_success() => Some(Outcome {
                status: self.status,
                payload: Payload::Empty,
            }),
            _ => None,
        }
    }

    /// Splits the outcome into its success value or its failure.
    ///
    /// Successes without a value (`NoContent`, `NotModified`) are returned
    /// as `Err` too, since there is nothing to continue with.
    pub fn into_result(self) -> Result<T, Outcome<T>> {
        match self.payload {
            Payload::Value(value) => Ok(value),
            payload => Err(Outcome {
                status: self.status,
                payload,
            }),
        }
    }
}

/// A failed outcome not yet tied to a value type.
///
/// Lets multi-step operations use `?` and become an [`Outcome`] of any
/// type at the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    status: Status,
    message: String,
}

impl Failure {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(Status::BadRequest, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(Status::NotFound, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(Status::Conflict, message)
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(Status::InternalServerError, message)
    }

    fn new(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl<T> From<Failure> for Outcome<T> {
    fn from(failure: Failure) -> Self {
        Outcome::with_error(failure.status, failure.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        assert!(Outcome::ok(1).is_success());
        assert!(Outcome::created(1).is_success());
        assert!(Outcome::<i32>::no_content().is_success());
        assert!(!Outcome::<i32>::not_modified().is_success());
        assert!(!Outcome::<i32>::conflict("taken").is_success());
        assert!(!Outcome::<i32>::internal_server_error("boom").is_success());
    }

    #[test]
    fn test_equality_compares_status_and_payload() {
        assert_eq!(Outcome::ok(5), Outcome::ok(5));
        assert_ne!(Outcome::ok(5), Outcome::created(5));
        assert_ne!(Outcome::ok(5), Outcome::ok(6));
        assert_eq!(
            Outcome::<i32>::not_found("missing"),
            Outcome::<i32>::not_found("missing")
        );
        assert_ne!(
            Outcome::<i32>::not_found("missing"),
            Outcome::<i32>::bad_request("missing")
        );
    }

    #[test]
    fn test_rejection_keeps_status_and_message() {
        let rejected: Outcome<String> = Outcome::<bool>::bad_request("Title is required.")
            .rejection()
            .expect("failure should be forwarded");
        assert_eq!(rejected.status(), Status::BadRequest);
        assert_eq!(rejected.error(), Some("Title is required."));

        assert!(Outcome::ok(true).rejection::<String>().is_none());
    }

    #[test]
    fn test_map_only_touches_values() {
        assert_eq!(Outcome::created(2).map(|v| v * 10), Outcome::created(20));
        assert_eq!(
            Outcome::<i32>::conflict("stale").map(|v| v * 10),
            Outcome::<i32>::conflict("stale")
        );
    }

    #[test]
    fn test_failure_converts_to_any_outcome() {
        let outcome: Outcome<Vec<i32>> = Failure::conflict("stale").into();
        assert_eq!(outcome, Outcome::conflict("stale"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(Status::Created.code(), 201);
        assert_eq!(Status::Conflict.status_code(), StatusCode::CONFLICT);
        assert_eq!(Status::NotFound.error_code(), "NOT_FOUND");
    }
}
