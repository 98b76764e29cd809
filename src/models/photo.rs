use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Photo {
    pub photo_id: i32,
    pub event_id: i32,
    pub photo_data: Vec<u8>,
    pub caption: Option<String>,
    pub version: i32,
}
