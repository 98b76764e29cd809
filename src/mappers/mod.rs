//! Field-for-field conversion between entities and wire shapes.
//!
//! Mappers are total and never touch the store. Navigations that were not
//! loaded map to `None` or an empty list; nothing is fetched lazily.

pub mod event;
pub mod event_attendance;
pub mod lookup;
pub mod photo;
pub mod user;

pub use event::EventMapper;
pub use event_attendance::EventAttendanceMapper;
pub use lookup::{EventStatusMapper, LocationMapper, RoleMapper};
pub use photo::PhotoMapper;
pub use user::UserMapper;

use crate::dtos::Dto;
use crate::models::Entity;

pub trait Mapper {
    type Entity: Entity;
    type Response: Dto;

    fn to_response(entity: &Self::Entity) -> Self::Response;

    fn to_entity(response: &Self::Response) -> Self::Entity;

    fn to_responses(entities: &[Self::Entity]) -> Vec<Self::Response> {
        entities.iter().map(Self::to_response).collect()
    }

    fn to_entities(responses: &[Self::Response]) -> Vec<Self::Entity> {
        responses.iter().map(Self::to_entity).collect()
    }
}
