//! Input rules for each entity family.
//!
//! Validators are pure: they never touch the store and report only the
//! first rule a request breaks, in field declaration order.

pub mod event;
pub mod event_attendance;
pub mod photo;
pub mod user;

pub use event::EventValidator;
pub use event_attendance::EventAttendanceValidator;
pub use photo::PhotoValidator;
pub use user::UserValidator;

use crate::dtos::Dto;
use crate::utils::outcome::Outcome;

/// Result of a single rule; the message is the reason it failed.
pub(crate) type Rule = Result<(), String>;

pub trait Validator {
    type Create: Dto;
    type Update: Dto;

    fn validate_for_create(request: &Self::Create) -> Outcome<bool>;

    fn validate_for_update(request: &Self::Update) -> Outcome<bool>;

    fn validate_id(id: i32) -> Outcome<bool> {
        run(|| positive_id("Id", id))
    }
}

/// Runs a chain of rules, stopping at the first failure.
pub(crate) fn run(rules: impl FnOnce() -> Rule) -> Outcome<bool> {
    match rules() {
        Ok(()) => Outcome::ok(true),
        Err(message) => Outcome::bad_request(message),
    }
}

pub(crate) fn positive_id(field: &str, id: i32) -> Rule {
    if id <= 0 {
        return Err(format!("{field} must be a positive number."));
    }
    Ok(())
}

pub(crate) fn required(field: &str, value: &str, max_chars: usize) -> Rule {
    if value.trim().is_empty() {
        return Err(format!("{field} is required."));
    }
    max_length(field, value, max_chars)
}

pub(crate) fn max_length(field: &str, value: &str, max_chars: usize) -> Rule {
    if value.chars().count() > max_chars {
        return Err(format!("{field} cannot exceed {max_chars} characters."));
    }
    Ok(())
}

pub(crate) fn version(value: i32) -> Rule {
    positive_id("Version", value)
}
