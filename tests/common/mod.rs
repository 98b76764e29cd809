#![allow(dead_code)]

pub mod scripted;

use std::sync::Arc;

use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use cleanup_server::dtos::{
    CreateEventRequest, CreatePhotoRequest, CreateUserRequest, EventResponse, UpdateEventRequest,
    UserResponse,
};
use cleanup_server::models::role::VOLUNTEER;
use cleanup_server::models::status::UPCOMING;
use cleanup_server::state::AppState;
use cleanup_server::store::MemoryStore;

use scripted::ScriptedStore;

pub const PASSWORD: &str = "password123";

pub fn setup() -> (Arc<MemoryStore>, AppState) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone());
    (store, state)
}

pub fn scripted(store: ScriptedStore) -> AppState {
    AppState::new(Arc::new(store))
}

pub fn event_request(title: &str) -> CreateEventRequest {
    let start_time = Utc::now() + Duration::days(7);
    CreateEventRequest {
        title: title.to_string(),
        description: "Bring gloves and a water bottle.".to_string(),
        start_time,
        end_time: start_time + Duration::hours(3),
        family_friendly: true,
        trash_collected: Decimal::ZERO,
        number_of_attendees: 0,
        status_id: UPCOMING,
        latitude: 40.7128,
        longitude: -74.006,
    }
}

pub fn user_request(name: &str) -> CreateUserRequest {
    CreateUserRequest {
        name: name.to_string(),
        email: format!("{}@cleanup.example", name.to_lowercase()),
        password: PASSWORD.to_string(),
        role_id: VOLUNTEER,
    }
}

pub fn photo_request(event_id: i32) -> CreatePhotoRequest {
    CreatePhotoRequest {
        event_id,
        photo_data: vec![0xFF, 0xD8, 0xFF, 0xE0],
        caption: Some("Before".to_string()),
    }
}

pub fn update_request(event: &EventResponse) -> UpdateEventRequest {
    UpdateEventRequest {
        event_id: event.event_id,
        title: event.title.clone(),
        description: event.description.clone(),
        start_time: event.start_time,
        end_time: event.end_time,
        family_friendly: event.family_friendly,
        trash_collected: event.trash_collected,
        status_id: event.status_id,
        location_id: event.location_id,
        version: event.version,
    }
}

pub async fn create_event(state: &AppState, title: &str) -> EventResponse {
    state
        .events
        .create(event_request(title))
        .await
        .into_value()
        .expect("event should be created")
}

pub async fn create_user(state: &AppState, name: &str) -> UserResponse {
    state
        .users
        .create(user_request(name))
        .await
        .into_value()
        .expect("user should be created")
}
