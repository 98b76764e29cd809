//! The relational store every repository talks to.
//!
//! Fetches return rows as stored, soft-deleted ones included; filtering is
//! the caller's job. Writes against existing rows take the version the
//! caller read and report how many rows they touched, so `0` means the row
//! changed or disappeared in between.

pub mod constraints;
pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{
    Event, EventAttendance, EventPatch, EventStatus, Location, Photo, Role, User, UserPatch,
};
use crate::utils::error::StoreError;

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait Store: Send + Sync {
    async fn fetch_status(&self, status_id: i32) -> StoreResult<Option<EventStatus>>;

    async fn fetch_location(&self, location_id: i32) -> StoreResult<Option<Location>>;

    async fn fetch_role(&self, role_id: i32) -> StoreResult<Option<Role>>;

    /// Inserts the location and the event referencing it in one statement.
    async fn insert_event(&self, event: &Event, location: &Location) -> StoreResult<Event>;

    /// Loads the event with its status, location, photos and attendances
    /// (each attendance with its user).
    async fn fetch_event(&self, event_id: i32) -> StoreResult<Option<Event>>;

    async fn fetch_events(&self) -> StoreResult<Vec<Event>>;

    async fn update_event(
        &self,
        event_id: i32,
        expected_version: i32,
        patch: &EventPatch,
    ) -> StoreResult<u64>;

    async fn soft_delete_event(&self, event_id: i32, expected_version: i32) -> StoreResult<u64>;

    async fn insert_user(&self, user: &User) -> StoreResult<User>;

    /// Loads the user with its role.
    async fn fetch_user(&self, user_id: i32) -> StoreResult<Option<User>>;

    async fn fetch_users(&self) -> StoreResult<Vec<User>>;

    async fn fetch_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    async fn update_user(
        &self,
        user_id: i32,
        expected_version: i32,
        patch: &UserPatch,
    ) -> StoreResult<u64>;

    async fn soft_delete_user(&self, user_id: i32, expected_version: i32) -> StoreResult<u64>;

    async fn insert_photo(&self, photo: &Photo) -> StoreResult<Photo>;

    async fn fetch_photo(&self, photo_id: i32) -> StoreResult<Option<Photo>>;

    async fn fetch_photos(&self) -> StoreResult<Vec<Photo>>;

    async fn fetch_photos_by_event(&self, event_id: i32) -> StoreResult<Vec<Photo>>;

    async fn update_photo_caption(
        &self,
        photo_id: i32,
        expected_version: i32,
        caption: Option<&str>,
    ) -> StoreResult<u64>;

    async fn delete_photo(&self, photo_id: i32, expected_version: i32) -> StoreResult<u64>;

    async fn insert_attendance(&self, attendance: &EventAttendance)
        -> StoreResult<EventAttendance>;

    /// Loads the attendance with its event and user.
    async fn fetch_attendance(
        &self,
        event_id: i32,
        user_id: i32,
    ) -> StoreResult<Option<EventAttendance>>;

    async fn fetch_attendances(&self) -> StoreResult<Vec<EventAttendance>>;

    async fn fetch_attendances_by_event(&self, event_id: i32) -> StoreResult<Vec<EventAttendance>>;

    async fn fetch_attendances_by_user(&self, user_id: i32) -> StoreResult<Vec<EventAttendance>>;

    /// `expected` is the check-in value the caller read.
    async fn update_attendance_check_in(
        &self,
        event_id: i32,
        user_id: i32,
        expected: Option<DateTime<Utc>>,
        check_in: Option<DateTime<Utc>>,
    ) -> StoreResult<u64>;

    async fn delete_attendance(&self, event_id: i32, user_id: i32) -> StoreResult<u64>;

    /// Purges old soft-deleted rows.
    async fn run_nightly_cleanup(&self) -> StoreResult<()>;

    /// Recomputes event statuses from the clock.
    async fn run_status_update(&self) -> StoreResult<()>;
}
