use super::Mapper;
use crate::dtos::{EventStatusResponse, LocationResponse, RoleResponse};
use crate::models::{EventStatus, Location, Role};

pub struct EventStatusMapper;

impl Mapper for EventStatusMapper {
    type Entity = EventStatus;
    type Response = EventStatusResponse;

    fn to_response(entity: &EventStatus) -> EventStatusResponse {
        EventStatusResponse {
            status_id: entity.status_id,
            name: entity.name.clone(),
        }
    }

    fn to_entity(response: &EventStatusResponse) -> EventStatus {
        EventStatus {
            status_id: response.status_id,
            name: response.name.clone(),
        }
    }
}

pub struct LocationMapper;

impl Mapper for LocationMapper {
    type Entity = Location;
    type Response = LocationResponse;

    fn to_response(entity: &Location) -> LocationResponse {
        LocationResponse {
            location_id: entity.location_id,
            latitude: entity.latitude,
            longitude: entity.longitude,
        }
    }

    fn to_entity(response: &LocationResponse) -> Location {
        Location {
            location_id: response.location_id,
            latitude: response.latitude,
            longitude: response.longitude,
        }
    }
}

pub struct RoleMapper;

impl Mapper for RoleMapper {
    type Entity = Role;
    type Response = RoleResponse;

    fn to_response(entity: &Role) -> RoleResponse {
        RoleResponse {
            role_id: entity.role_id,
            name: entity.name.clone(),
        }
    }

    fn to_entity(response: &RoleResponse) -> Role {
        Role {
            role_id: response.role_id,
            name: response.name.clone(),
        }
    }
}
