use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use super::{EventAttendance, EventStatus, Location, Photo};

/// A community cleanup event.
///
/// `attendances` and `photos` reference the event by id; they are loaded
/// alongside it but not owned by it.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Event {
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
    #[sqlx(skip)]
    pub status: Option<EventStatus>,
    #[sqlx(skip)]
    pub location: Option<Location>,
    #[sqlx(skip)]
    pub attendances: Vec<EventAttendance>,
    #[sqlx(skip)]
    pub photos: Vec<Photo>,
}

/// Mutable columns of an event that differ between two versions of it.
///
/// Only the fields set here are written; `event_id`, `is_deleted` and
/// `number_of_attendees` can never be patched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub family_friendly: Option<bool>,
    pub trash_collected: Option<Decimal>,
    pub status_id: Option<i32>,
    pub location_id: Option<i32>,
}

fn changed<T: PartialEq + Clone>(current: &T, requested: &T) -> Option<T> {
    (current != requested).then(|| requested.clone())
}

impl EventPatch {
    pub fn between(current: &Event, requested: &Event) -> Self {
        Self {
            title: changed(&current.title, &requested.title),
            description: changed(&current.description, &requested.description),
            start_time: changed(&current.start_time, &requested.start_time),
            end_time: changed(&current.end_time, &requested.end_time),
            family_friendly: changed(&current.family_friendly, &requested.family_friendly),
            trash_collected: changed(&current.trash_collected, &requested.trash_collected),
            status_id: changed(&current.status_id, &requested.status_id),
            location_id: changed(&current.location_id, &requested.location_id),
        }
    }

    pub fn status(status_id: i32) -> Self {
        Self {
            status_id: Some(status_id),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.columns().is_empty()
    }

    /// Column names touched by this patch, in table order.
    pub fn columns(&self) -> Vec<&'static str> {
        let mut columns = Vec::new();
        if self.title.is_some() {
            columns.push("title");
        }
        if self.description.is_some() {
            columns.push("description");
        }
        if self.start_time.is_some() {
            columns.push("start_time");
        }
        if self.end_time.is_some() {
            columns.push("end_time");
        }
        if self.family_friendly.is_some() {
            columns.push("family_friendly");
        }
        if self.trash_collected.is_some() {
            columns.push("trash_collected");
        }
        if self.status_id.is_some() {
            columns.push("status_id");
        }
        if self.location_id.is_some() {
            columns.push("location_id");
        }
        columns
    }

    pub fn apply(&self, event: &mut Event) {
        if let Some(title) = &self.title {
            event.title = title.clone();
        }
        if let Some(description) = &self.description {
            event.description = description.clone();
        }
        if let Some(start_time) = self.start_time {
            event.start_time = start_time;
        }
        if let Some(end_time) = self.end_time {
            event.end_time = end_time;
        }
        if let Some(family_friendly) = self.family_friendly {
            event.family_friendly = family_friendly;
        }
        if let Some(trash_collected) = self.trash_collected {
            event.trash_collected = trash_collected;
        }
        if let Some(status_id) = self.status_id {
            event.status_id = status_id;
        }
        if let Some(location_id) = self.location_id {
            event.location_id = location_id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event() -> Event {
        Event {
            event_id: 1,
            title: "Beach Cleanup".to_string(),
            description: "Bring gloves".to_string(),
            start_time: Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
            family_friendly: true,
            trash_collected: Decimal::ZERO,
            number_of_attendees: 10,
            status_id: 1,
            location_id: 3,
            is_deleted: false,
            version: 1,
            status: None,
            location: None,
            attendances: Vec::new(),
            photos: Vec::new(),
        }
    }

    #[test]
    fn test_patch_lists_only_changed_columns() {
        let current = event();
        let mut requested = current.clone();
        requested.trash_collected = Decimal::new(125, 1);
        requested.title = "River Cleanup".to_string();

        let patch = EventPatch::between(&current, &requested);
        assert_eq!(patch.columns(), vec!["title", "trash_collected"]);

        let mut patched = current.clone();
        patch.apply(&mut patched);
        assert_eq!(patched, requested);
    }

    #[test]
    fn test_identical_events_produce_empty_patch() {
        let current = event();
        assert!(EventPatch::between(&current, &current.clone()).is_empty());
        assert_eq!(EventPatch::status(4).columns(), vec!["status_id"]);
    }
}
