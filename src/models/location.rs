use sqlx::FromRow;

/// Geographic point an event takes place at. Created together with the event.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Location {
    pub location_id: i32,
    pub latitude: f64,
    pub longitude: f64,
}
