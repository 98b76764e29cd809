use crate::dtos::{
    CreateEventAttendanceRequest, EventAttendanceResponse, EventResponse,
    UpdateEventAttendanceRequest, UserResponse,
};
use crate::mappers::{EventAttendanceMapper, EventMapper, Mapper, UserMapper};
use crate::repositories::EventAttendanceRepository;
use crate::utils::outcome::Outcome;
use crate::validators::{EventAttendanceValidator, EventValidator, UserValidator, Validator};

#[derive(Clone)]
pub struct EventAttendanceService {
    repository: EventAttendanceRepository,
}

impl EventAttendanceService {
    pub fn new(repository: EventAttendanceRepository) -> Self {
        Self { repository }
    }

    pub async fn create(
        &self,
        request: CreateEventAttendanceRequest,
    ) -> Outcome<EventAttendanceResponse> {
        if let Some(rejected) = EventAttendanceValidator::validate_for_create(&request).rejection()
        {
            return rejected;
        }
        let attendance = EventAttendanceMapper::from_create(&request);
        self.repository
            .create(attendance)
            .await
            .map(|attendance| EventAttendanceMapper::to_response(&attendance))
    }

    pub async fn get_all(&self) -> Outcome<Vec<EventAttendanceResponse>> {
        self.repository
            .get_all()
            .await
            .map(|attendances| EventAttendanceMapper::to_responses(&attendances))
    }

    pub async fn get_by_id(&self, event_id: i32, user_id: i32) -> Outcome<EventAttendanceResponse> {
        if let Some(rejected) = EventAttendanceValidator::validate_key(event_id, user_id).rejection()
        {
            return rejected;
        }
        self.repository
            .get_by_id(event_id, user_id)
            .await
            .map(|attendance| EventAttendanceMapper::to_response(&attendance))
    }

    pub async fn update(
        &self,
        request: UpdateEventAttendanceRequest,
    ) -> Outcome<EventAttendanceResponse> {
        if let Some(rejected) = EventAttendanceValidator::validate_for_update(&request).rejection()
        {
            return rejected;
        }
        let attendance = EventAttendanceMapper::from_update(&request);
        self.repository
            .update(attendance)
            .await
            .map(|attendance| EventAttendanceMapper::to_response(&attendance))
    }

    pub async fn delete(&self, event_id: i32, user_id: i32) -> Outcome<EventAttendanceResponse> {
        if let Some(rejected) = EventAttendanceValidator::validate_key(event_id, user_id).rejection()
        {
            return rejected;
        }
        self.repository
            .delete(event_id, user_id)
            .await
            .map(|attendance| EventAttendanceMapper::to_response(&attendance))
    }

    pub async fn get_events_by_user_id(&self, user_id: i32) -> Outcome<Vec<EventResponse>> {
        if let Some(rejected) = UserValidator::validate_id(user_id).rejection() {
            return rejected;
        }
        self.repository
            .get_events_by_user_id(user_id)
            .await
            .map(|events| EventMapper::to_responses(&events))
    }

    pub async fn get_users_by_event_id(&self, event_id: i32) -> Outcome<Vec<UserResponse>> {
        if let Some(rejected) = EventValidator::validate_id(event_id).rejection() {
            return rejected;
        }
        self.repository
            .get_users_by_event_id(event_id)
            .await
            .map(|users| UserMapper::to_responses(&users))
    }
}
