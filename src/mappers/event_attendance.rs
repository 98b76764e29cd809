use super::Mapper;
use crate::dtos::{
    CreateEventAttendanceRequest, EventAttendanceResponse, UpdateEventAttendanceRequest,
};
use crate::models::EventAttendance;

pub struct EventAttendanceMapper;

impl EventAttendanceMapper {
    pub fn from_create(request: &CreateEventAttendanceRequest) -> EventAttendance {
        EventAttendance {
            event_id: request.event_id,
            user_id: request.user_id,
            check_in: request.check_in,
            event: None,
            user: None,
        }
    }

    pub fn from_update(request: &UpdateEventAttendanceRequest) -> EventAttendance {
        EventAttendance {
            event_id: request.event_id,
            user_id: request.user_id,
            check_in: request.check_in,
            event: None,
            user: None,
        }
    }
}

impl Mapper for EventAttendanceMapper {
    type Entity = EventAttendance;
    type Response = EventAttendanceResponse;

    fn to_response(entity: &EventAttendance) -> EventAttendanceResponse {
        EventAttendanceResponse {
            event_id: entity.event_id,
            user_id: entity.user_id,
            check_in: entity.check_in,
        }
    }

    /// The `event` and `user` navigations are not part of the response and
    /// come back empty.
    fn to_entity(response: &EventAttendanceResponse) -> EventAttendance {
        EventAttendance {
            event_id: response.event_id,
            user_id: response.user_id,
            check_in: response.check_in,
            event: None,
            user: None,
        }
    }
}
