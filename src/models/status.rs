use sqlx::FromRow;

pub const UPCOMING: i32 = 1;
pub const ONGOING: i32 = 2;
pub const COMPLETED: i32 = 3;
pub const CANCELED: i32 = 4;

/// Lifecycle state of an event (row of the `statuses` lookup table).
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct EventStatus {
    pub status_id: i32,
    pub name: String,
}

impl EventStatus {
    /// Rows the `statuses` table is seeded with.
    pub fn seed() -> Vec<EventStatus> {
        [
            (UPCOMING, "Upcoming"),
            (ONGOING, "Ongoing"),
            (COMPLETED, "Completed"),
            (CANCELED, "Canceled"),
        ]
        .into_iter()
        .map(|(status_id, name)| EventStatus {
            status_id,
            name: name.to_string(),
        })
        .collect()
    }
}
