use super::{positive_id, run, Validator};
use crate::dtos::{CreateEventAttendanceRequest, UpdateEventAttendanceRequest};
use crate::utils::outcome::Outcome;

pub struct EventAttendanceValidator;

impl EventAttendanceValidator {
    /// Checks both halves of the composite key.
    pub fn validate_key(event_id: i32, user_id: i32) -> Outcome<bool> {
        run(|| {
            positive_id("Event id", event_id)?;
            positive_id("User id", user_id)
        })
    }
}

impl Validator for EventAttendanceValidator {
    type Create = CreateEventAttendanceRequest;
    type Update = UpdateEventAttendanceRequest;

    fn validate_for_create(request: &CreateEventAttendanceRequest) -> Outcome<bool> {
        Self::validate_key(request.event_id, request.user_id)
    }

    fn validate_for_update(request: &UpdateEventAttendanceRequest) -> Outcome<bool> {
        Self::validate_key(request.event_id, request.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_order() {
        assert_eq!(
            EventAttendanceValidator::validate_key(0, 0),
            Outcome::bad_request("Event id must be a positive number.")
        );
        assert_eq!(
            EventAttendanceValidator::validate_key(5, -9),
            Outcome::bad_request("User id must be a positive number.")
        );
        assert!(EventAttendanceValidator::validate_key(5, 9).is_success());
    }
}
