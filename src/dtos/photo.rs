use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePhotoRequest {
    pub event_id: i32,
    pub photo_data: Vec<u8>,
    #[serde(default)]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePhotoRequest {
    pub photo_id: i32,
    pub caption: Option<String>,
    pub version: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoResponse {
    pub photo_id: i32,
    pub event_id: i32,
    pub photo_data: Vec<u8>,
    pub caption: Option<String>,
    pub version: i32,
}
