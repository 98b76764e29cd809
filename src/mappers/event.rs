use super::{EventAttendanceMapper, EventStatusMapper, LocationMapper, Mapper, PhotoMapper};
use crate::dtos::{CreateEventRequest, EventResponse, UpdateEventRequest};
use crate::models::{Event, Location};

pub struct EventMapper;

impl EventMapper {
    /// Splits a create request into the event row and the location row it
    /// is stored with. Ids and `version` are assigned by the store.
    pub fn from_create(request: &CreateEventRequest) -> (Event, Location) {
        let event = Event {
            event_id: 0,
            title: request.title.clone(),
            description: request.description.clone(),
            start_time: request.start_time,
            end_time: request.end_time,
            family_friendly: request.family_friendly,
            trash_collected: request.trash_collected,
            number_of_attendees: request.number_of_attendees,
            status_id: request.status_id,
            location_id: 0,
            is_deleted: false,
            version: 0,
            status: None,
            location: None,
            attendances: Vec::new(),
            photos: Vec::new(),
        };
        let location = Location {
            location_id: 0,
            latitude: request.latitude,
            longitude: request.longitude,
        };
        (event, location)
    }

    /// `number_of_attendees` and `is_deleted` are not updatable and are
    /// left at their defaults; the repository keeps the stored values.
    pub fn from_update(request: &UpdateEventRequest) -> Event {
        Event {
            event_id: request.event_id,
            title: request.title.clone(),
            description: request.description.clone(),
            start_time: request.start_time,
            end_time: request.end_time,
            family_friendly: request.family_friendly,
            trash_collected: request.trash_collected,
            number_of_attendees: 0,
            status_id: request.status_id,
            location_id: request.location_id,
            is_deleted: false,
            version: request.version,
            status: None,
            location: None,
            attendances: Vec::new(),
            photos: Vec::new(),
        }
    }
}

impl Mapper for EventMapper {
    type Entity = Event;
    type Response = EventResponse;

    fn to_response(entity: &Event) -> EventResponse {
        EventResponse {
            event_id: entity.event_id,
            title: entity.title.clone(),
            description: entity.description.clone(),
            start_time: entity.start_time,
            end_time: entity.end_time,
            family_friendly: entity.family_friendly,
            trash_collected: entity.trash_collected,
            number_of_attendees: entity.number_of_attendees,
            status_id: entity.status_id,
            location_id: entity.location_id,
            is_deleted: entity.is_deleted,
            version: entity.version,
            status: entity.status.as_ref().map(EventStatusMapper::to_response),
            location: entity.location.as_ref().map(LocationMapper::to_response),
            attendances: EventAttendanceMapper::to_responses(&entity.attendances),
            photos: PhotoMapper::to_responses(&entity.photos),
        }
    }

    fn to_entity(response: &EventResponse) -> Event {
        Event {
            event_id: response.event_id,
            title: response.title.clone(),
            description: response.description.clone(),
            start_time: response.start_time,
            end_time: response.end_time,
            family_friendly: response.family_friendly,
            trash_collected: response.trash_collected,
            number_of_attendees: response.number_of_attendees,
            status_id: response.status_id,
            location_id: response.location_id,
            is_deleted: response.is_deleted,
            version: response.version,
            status: response.status.as_ref().map(EventStatusMapper::to_entity),
            location: response.location.as_ref().map(LocationMapper::to_entity),
            attendances: EventAttendanceMapper::to_entities(&response.attendances),
            photos: PhotoMapper::to_entities(&response.photos),
        }
    }
}
