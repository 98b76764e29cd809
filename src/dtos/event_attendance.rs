use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEventAttendanceRequest {
    pub event_id: i32,
    pub user_id: i32,
    #[serde(default)]
    pub check_in: Option<DateTime<Utc>>,
}

/// Only `check_in` is mutable; the pair of ids identifies the row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEventAttendanceRequest {
    pub event_id: i32,
    pub user_id: i32,
    pub check_in: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAttendanceResponse {
    pub event_id: i32,
    pub user_id: i32,
    pub check_in: Option<DateTime<Utc>>,
}
