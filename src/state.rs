use std::sync::Arc;

use crate::repositories::{
    EventAttendanceRepository, EventRepository, MaintenanceRepository, PhotoRepository,
    UserRepository,
};
use crate::services::{
    EventAttendanceService, EventService, MaintenanceService, PhotoService, UserService,
};
use crate::store::Store;

/// Services shared by every handler, all built over one store.
#[derive(Clone)]
pub struct AppState {
    pub events: EventService,
    pub attendances: EventAttendanceService,
    pub photos: PhotoService,
    pub users: UserService,
    pub maintenance: MaintenanceService,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            events: EventService::new(EventRepository::new(store.clone())),
            attendances: EventAttendanceService::new(EventAttendanceRepository::new(
                store.clone(),
            )),
            photos: PhotoService::new(PhotoRepository::new(store.clone())),
            users: UserService::new(UserRepository::new(store.clone())),
            maintenance: MaintenanceService::new(MaintenanceRepository::new(store)),
        }
    }
}
