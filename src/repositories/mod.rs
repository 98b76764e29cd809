//! Entity lifecycle against the [`Store`](crate::store::Store).
//!
//! Repositories are the only place a [`StoreError`] is inspected. Every
//! error is reclassified into an [`Outcome`] before it leaves this module.

pub mod event;
pub mod event_attendance;
pub mod maintenance;
pub mod photo;
pub mod user;

pub use event::EventRepository;
pub use event_attendance::EventAttendanceRepository;
pub use maintenance::MaintenanceRepository;
pub use photo::PhotoRepository;
pub use user::UserRepository;

use tracing::warn;

use crate::store::constraints;
use crate::store::StoreResult;
use crate::utils::error::StoreError;
use crate::utils::outcome::{Failure, Outcome};

pub const GENERIC_FAILURE: &str = "Something went wrong. Try again later.";
pub const RETRY_FAILURE: &str = "The operation was cancelled. Please retry.";

/// Turns a store failure into the failure callers see.
///
/// Known constraints produce their hint; anything unclassified becomes a
/// generic internal error and the raw cause only goes to the log.
pub(crate) fn classify(operation: &'static str, err: StoreError) -> Failure {
    let hint = err.constraint().and_then(constraints::hint);
    match &err {
        StoreError::Cancelled => {
            warn!(operation, "Store operation cancelled");
            Failure::internal_server_error(RETRY_FAILURE)
        }
        StoreError::UniqueViolation { constraint } => {
            warn!(operation, ?constraint, "Unique constraint rejected write");
            Failure::conflict(hint.unwrap_or("The record conflicts with an existing one."))
        }
        StoreError::ForeignKeyViolation { constraint } => {
            warn!(operation, ?constraint, "Foreign key rejected write");
            Failure::conflict(hint.unwrap_or("A referenced record does not exist."))
        }
        StoreError::CheckViolation { constraint } => {
            warn!(operation, ?constraint, "Check constraint rejected write");
            Failure::bad_request(hint.unwrap_or("The request violates a data rule."))
        }
        StoreError::Unavailable(_) | StoreError::Database(_) => {
            err.log(operation);
            Failure::internal_server_error(GENERIC_FAILURE)
        }
    }
}

/// `?`-friendly conversion of store results inside repository methods.
pub(crate) trait Classify<T> {
    fn classify(self, operation: &'static str) -> Result<T, Failure>;
}

impl<T> Classify<T> for StoreResult<T> {
    fn classify(self, operation: &'static str) -> Result<T, Failure> {
        self.map_err(|err| classify(operation, err))
    }
}

/// Collapses an internal step result into the outcome returned to callers.
pub(crate) fn settle<T>(result: Result<T, Failure>, success: fn(T) -> Outcome<T>) -> Outcome<T> {
    match result {
        Ok(value) => success(value),
        Err(failure) => failure.into(),
    }
}

pub(crate) fn stale(entity: &str) -> Failure {
    Failure::conflict(format!(
        "The {entity} was modified by another request. Reload it and try again."
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::constraints::{CK_EVENTS_END_AFTER_START, FK_EVENTS_LOCATIONS};
    use crate::utils::outcome::Status;

    #[test]
    fn test_cancellation_asks_for_retry() {
        assert_eq!(
            classify("test", StoreError::Cancelled),
            Failure::internal_server_error(RETRY_FAILURE)
        );
    }

    #[test]
    fn test_constraint_kinds() {
        assert_eq!(
            classify("test", StoreError::foreign_key(FK_EVENTS_LOCATIONS)),
            Failure::conflict("The specified location does not exist.")
        );
        assert_eq!(
            classify("test", StoreError::check(CK_EVENTS_END_AFTER_START)),
            Failure::bad_request("End time must be after start time.")
        );
        assert_eq!(
            classify("test", StoreError::unique("ux_something_else")).status(),
            Status::Conflict
        );
    }

    #[test]
    fn test_raw_errors_are_not_leaked() {
        let failure = classify(
            "test",
            StoreError::Database("relation \"events\" does not exist".to_string()),
        );
        assert_eq!(failure, Failure::internal_server_error(GENERIC_FAILURE));
        assert_eq!(
            Outcome::<()>::from(failure),
            Outcome::internal_server_error(GENERIC_FAILURE)
        );
    }
}
