use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::{Event, User};

/// A user's attendance at an event, identified by `(event_id, user_id)`.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct EventAttendance {
    pub event_id: i32,
    pub user_id: i32,
    pub check_in: Option<DateTime<Utc>>,
    #[sqlx(skip)]
    pub event: Option<Box<Event>>,
    #[sqlx(skip)]
    pub user: Option<User>,
}

impl EventAttendance {
    pub fn key(&self) -> (i32, i32) {
        (self.event_id, self.user_id)
    }

    /// True when the attending user has been soft-deleted.
    ///
    /// Attendances loaded without their user are kept.
    pub fn has_deleted_user(&self) -> bool {
        self.user.as_ref().is_some_and(|user| user.is_deleted)
    }
}
