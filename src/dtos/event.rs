use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EventAttendanceResponse, EventStatusResponse, LocationResponse, PhotoResponse};

/// Creates an event together with the location it takes place at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub family_friendly: bool,
    #[serde(default)]
    pub trash_collected: Decimal,
    #[serde(default)]
    pub number_of_attendees: i32,
    pub status_id: i32,
    pub latitude: f64,
    pub longitude: f64,
}

/// Replaces the mutable fields of an event.
///
/// `version` is the row version the caller last read; a stale version is
/// rejected with Conflict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    pub event_id: i32,
    pub title: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub family_friendly: bool,
    pub trash_collected: Decimal,
    pub status_id: i32,
    pub location_id: i32,
    pub version: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEventStatusRequest {
    pub status_id: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventResponse {
    pub event_id: i32,
    pub title: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub family_friendly: bool,
    pub trash_collected: Decimal,
    pub number_of_attendees: i32,
    pub status_id: i32,
    pub location_id: i32,
    pub is_deleted: bool,
    pub version: i32,
    pub status: Option<EventStatusResponse>,
    pub location: Option<LocationResponse>,
    pub attendances: Vec<EventAttendanceResponse>,
    pub photos: Vec<PhotoResponse>,
}
