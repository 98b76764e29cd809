//! Names of the relational constraints both stores enforce.
//!
//! Repositories use these to turn a constraint failure into an actionable
//! message without echoing store internals.

pub const PK_EVENT_ATTENDANCES: &str = "pk_event_attendances";
pub const UX_USERS_EMAIL: &str = "ux_users_email";

pub const FK_EVENTS_LOCATIONS: &str = "fk_events_locations";
pub const FK_EVENTS_STATUSES: &str = "fk_events_statuses";
pub const FK_EVENT_ATTENDANCES_EVENTS: &str = "fk_event_attendances_events";
pub const FK_EVENT_ATTENDANCES_USERS: &str = "fk_event_attendances_users";
pub const FK_PHOTOS_EVENTS: &str = "fk_photos_events";
pub const FK_USERS_ROLES: &str = "fk_users_roles";

pub const CK_EVENTS_END_AFTER_START: &str = "ck_events_end_after_start";
pub const CK_EVENTS_TRASH_COLLECTED: &str = "ck_events_trash_collected";
pub const CK_EVENTS_NUMBER_OF_ATTENDEES: &str = "ck_events_number_of_attendees";

/// Message shown to callers for a known constraint.
pub fn hint(constraint: &str) -> Option<&'static str> {
    let hint = match constraint {
        PK_EVENT_ATTENDANCES => "The user is already attending this event.",
        UX_USERS_EMAIL => "A user with this email already exists.",
        FK_EVENTS_LOCATIONS => "The specified location does not exist.",
        FK_EVENTS_STATUSES => "The specified status does not exist.",
        FK_EVENT_ATTENDANCES_EVENTS | FK_PHOTOS_EVENTS => "The specified event does not exist.",
        FK_EVENT_ATTENDANCES_USERS => "The specified user does not exist.",
        FK_USERS_ROLES => "The specified role does not exist.",
        CK_EVENTS_END_AFTER_START => "End time must be after start time.",
        CK_EVENTS_TRASH_COLLECTED => "Trash collected cannot be negative.",
        CK_EVENTS_NUMBER_OF_ATTENDEES => "Number of attendees cannot be negative.",
        _ => return None,
    };
    Some(hint)
}
