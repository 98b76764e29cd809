use super::Mapper;
use crate::dtos::{CreatePhotoRequest, PhotoResponse, UpdatePhotoRequest};
use crate::models::Photo;

pub struct PhotoMapper;

impl PhotoMapper {
    /// New photo row; `photo_id` and `version` are assigned by the store.
    pub fn from_create(request: &CreatePhotoRequest) -> Photo {
        Photo {
            photo_id: 0,
            event_id: request.event_id,
            photo_data: request.photo_data.clone(),
            caption: request.caption.clone(),
            version: 0,
        }
    }

    /// Only `caption` is updatable, so `event_id` and `photo_data` are left
    /// empty and ignored by the repository.
    pub fn from_update(request: &UpdatePhotoRequest) -> Photo {
        Photo {
            photo_id: request.photo_id,
            event_id: 0,
            photo_data: Vec::new(),
            caption: request.caption.clone(),
            version: request.version,
        }
    }
}

impl Mapper for PhotoMapper {
    type Entity = Photo;
    type Response = PhotoResponse;

    fn to_response(entity: &Photo) -> PhotoResponse {
        PhotoResponse {
            photo_id: entity.photo_id,
            event_id: entity.event_id,
            photo_data: entity.photo_data.clone(),
            caption: entity.caption.clone(),
            version: entity.version,
        }
    }

    fn to_entity(response: &PhotoResponse) -> Photo {
        Photo {
            photo_id: response.photo_id,
            event_id: response.event_id,
            photo_data: response.photo_data.clone(),
            caption: response.caption.clone(),
            version: response.version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let photo = Photo {
            photo_id: 42,
            event_id: 7,
            photo_data: vec![1, 2, 3],
            caption: Some("Before".to_string()),
            version: 2,
        };
        assert_eq!(PhotoMapper::to_entity(&PhotoMapper::to_response(&photo)), photo);
    }
}
