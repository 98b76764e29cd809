use crate::dtos::{CreateEventRequest, EventResponse, UpdateEventRequest};
use crate::mappers::{EventMapper, Mapper};
use crate::repositories::EventRepository;
use crate::utils::outcome::Outcome;
use crate::validators::{EventValidator, Validator};

#[derive(Clone)]
pub struct EventService {
    repository: EventRepository,
}

impl EventService {
    pub fn new(repository: EventRepository) -> Self {
        Self { repository }
    }

    pub async fn create(&self, request: CreateEventRequest) -> Outcome<EventResponse> {
        if let Some(rejected) = EventValidator::validate_for_create(&request).rejection() {
            return rejected;
        }
        let (event, location) = EventMapper::from_create(&request);
        self.repository
            .create(event, location)
            .await
            .map(|event| EventMapper::to_response(&event))
    }

    pub async fn get_all(&self) -> Outcome<Vec<EventResponse>> {
        self.repository
            .get_all()
            .await
            .map(|events| EventMapper::to_responses(&events))
    }

    pub async fn get_by_id(&self, event_id: i32) -> Outcome<EventResponse> {
        if let Some(rejected) = EventValidator::validate_id(event_id).rejection() {
            return rejected;
        }
        self.repository
            .get_by_id(event_id)
            .await
            .map(|event| EventMapper::to_response(&event))
    }

    pub async fn update(&self, request: UpdateEventRequest) -> Outcome<EventResponse> {
        if let Some(rejected) = EventValidator::validate_for_update(&request).rejection() {
            return rejected;
        }
        let event = EventMapper::from_update(&request);
        self.repository
            .update(event)
            .await
            .map(|event| EventMapper::to_response(&event))
    }

    pub async fn update_status(&self, event_id: i32, status_id: i32) -> Outcome<EventResponse> {
        if let Some(rejected) = EventValidator::validate_id(event_id).rejection() {
            return rejected;
        }
        if let Some(rejected) = EventValidator::validate_status(status_id).rejection() {
            return rejected;
        }
        self.repository
            .update_status(event_id, status_id)
            .await
            .map(|event| EventMapper::to_response(&event))
    }

    pub async fn delete(&self, event_id: i32) -> Outcome<EventResponse> {
        if let Some(rejected) = EventValidator::validate_id(event_id).rejection() {
            return rejected;
        }
        self.repository
            .delete(event_id)
            .await
            .map(|event| EventMapper::to_response(&event))
    }
}
