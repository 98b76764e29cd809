use crate::dtos::{CreatePhotoRequest, PhotoResponse, UpdatePhotoRequest};
use crate::mappers::{Mapper, PhotoMapper};
use crate::repositories::PhotoRepository;
use crate::utils::outcome::Outcome;
use crate::validators::{EventValidator, PhotoValidator, Validator};

#[derive(Clone)]
pub struct PhotoService {
    repository: PhotoRepository,
}

impl PhotoService {
    pub fn new(repository: PhotoRepository) -> Self {
        Self { repository }
    }

    pub async fn create(&self, request: CreatePhotoRequest) -> Outcome<PhotoResponse> {
        if let Some(rejected) = PhotoValidator::validate_for_create(&request).rejection() {
            return rejected;
        }
        let photo = PhotoMapper::from_create(&request);
        self.repository
            .create(photo)
            .await
            .map(|photo| PhotoMapper::to_response(&photo))
    }

    pub async fn get_all(&self) -> Outcome<Vec<PhotoResponse>> {
        self.repository
            .get_all()
            .await
            .map(|photos| PhotoMapper::to_responses(&photos))
    }

    pub async fn get_by_id(&self, photo_id: i32) -> Outcome<PhotoResponse> {
        if let Some(rejected) = PhotoValidator::validate_id(photo_id).rejection() {
            return rejected;
        }
        self.repository
            .get_by_id(photo_id)
            .await
            .map(|photo| PhotoMapper::to_response(&photo))
    }

    pub async fn get_by_event_id(&self, event_id: i32) -> Outcome<Vec<PhotoResponse>> {
        if let Some(rejected) = EventValidator::validate_id(event_id).rejection() {
            return rejected;
        }
        self.repository
            .get_by_event_id(event_id)
            .await
            .map(|photos| PhotoMapper::to_responses(&photos))
    }

    pub async fn update(&self, request: UpdatePhotoRequest) -> Outcome<PhotoResponse> {
        if let Some(rejected) = PhotoValidator::validate_for_update(&request).rejection() {
            return rejected;
        }
        let photo = PhotoMapper::from_update(&request);
        self.repository
            .update(photo)
            .await
            .map(|photo| PhotoMapper::to_response(&photo))
    }

    pub async fn delete(&self, photo_id: i32) -> Outcome<PhotoResponse> {
        if let Some(rejected) = PhotoValidator::validate_id(photo_id).rejection() {
            return rejected;
        }
        self.repository
            .delete(photo_id)
            .await
            .map(|photo| PhotoMapper::to_response(&photo))
    }
}
