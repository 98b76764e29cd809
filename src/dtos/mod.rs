//! Wire-facing request and response shapes.

pub mod event;
pub mod event_attendance;
pub mod lookup;
pub mod photo;
pub mod user;

pub use event::{CreateEventRequest, EventResponse, UpdateEventRequest, UpdateEventStatusRequest};
pub use event_attendance::{
    CreateEventAttendanceRequest, EventAttendanceResponse, UpdateEventAttendanceRequest,
};
pub use lookup::{EventStatusResponse, LocationResponse, RoleResponse};
pub use photo::{CreatePhotoRequest, PhotoResponse, UpdatePhotoRequest};
pub use user::{ChangePasswordRequest, CreateUserRequest, UpdateUserRequest, UserResponse};

/// Marker for request/response shapes.
pub trait Dto {}

impl Dto for CreateEventRequest {}
impl Dto for UpdateEventRequest {}
impl Dto for UpdateEventStatusRequest {}
impl Dto for EventResponse {}
impl Dto for CreateEventAttendanceRequest {}
impl Dto for UpdateEventAttendanceRequest {}
impl Dto for EventAttendanceResponse {}
impl Dto for CreatePhotoRequest {}
impl Dto for UpdatePhotoRequest {}
impl Dto for PhotoResponse {}
impl Dto for CreateUserRequest {}
impl Dto for UpdateUserRequest {}
impl Dto for ChangePasswordRequest {}
impl Dto for UserResponse {}
impl Dto for EventStatusResponse {}
impl Dto for LocationResponse {}
impl Dto for RoleResponse {}
