use async_trait::async_trait;
use chrono::{DateTime, Utc};

use cleanup_server::models::{
    Event, EventAttendance, EventPatch, EventStatus, Location, Photo, Role, User, UserPatch,
};
use cleanup_server::store::{MemoryStore, Store, StoreResult};
use cleanup_server::utils::StoreError;

/// A [`MemoryStore`] with scripted misbehavior, for exercising the paths
/// only a concurrent writer would otherwise reach.
#[derive(Default)]
pub struct ScriptedStore {
    inner: MemoryStore,
    misses_duplicates: bool,
    loses_writes: bool,
    write_error: Option<StoreError>,
}

impl ScriptedStore {
    /// Duplicate probes (email owner, existing attendance) find nothing, so
    /// only the store constraints stand in the way of a duplicate.
    pub fn missing_duplicates() -> Self {
        Self {
            misses_duplicates: true,
            ..Self::default()
        }
    }

    /// Versioned updates touch no rows, as if another writer got there first.
    pub fn losing_writes() -> Self {
        Self {
            loses_writes: true,
            ..Self::default()
        }
    }

    /// Versioned updates fail with `error`.
    pub fn rejecting_writes(error: StoreError) -> Self {
        Self {
            write_error: Some(error),
            ..Self::default()
        }
    }

    fn scripted_write(&self) -> Option<StoreResult<u64>> {
        if let Some(error) = &self.write_error {
            return Some(Err(error.clone()));
        }
        self.loses_writes.then_some(Ok(0))
    }
}

#[async_trait]
impl Store for ScriptedStore {
    async fn fetch_status(&self, status_id: i32) -> StoreResult<Option<EventStatus>> {
        self.inner.fetch_status(status_id).await
    }

    async fn fetch_location(&self, location_id: i32) -> StoreResult<Option<Location>> {
        self.inner.fetch_location(location_id).await
    }

    async fn fetch_role(&self, role_id: i32) -> StoreResult<Option<Role>> {
        self.inner.fetch_role(role_id).await
    }

    async fn insert_event(&self, event: &Event, location: &Location) -> StoreResult<Event> {
        self.inner.insert_event(event, location).await
    }

    async fn fetch_event(&self, event_id: i32) -> StoreResult<Option<Event>> {
        self.inner.fetch_event(event_id).await
    }

    async fn fetch_events(&self) -> StoreResult<Vec<Event>> {
        self.inner.fetch_events().await
    }

    async fn update_event(
        &self,
        event_id: i32,
        expected_version: i32,
        patch: &EventPatch,
    ) -> StoreResult<u64> {
        match self.scripted_write() {
            Some(result) => result,
            None => self.inner.update_event(event_id, expected_version, patch).await,
        }
    }

    async fn soft_delete_event(&self, event_id: i32, expected_version: i32) -> StoreResult<u64> {
        self.inner.soft_delete_event(event_id, expected_version).await
    }

    async fn insert_user(&self, user: &User) -> StoreResult<User> {
        self.inner.insert_user(user).await
    }

    async fn fetch_user(&self, user_id: i32) -> StoreResult<Option<User>> {
        self.inner.fetch_user(user_id).await
    }

    async fn fetch_users(&self) -> StoreResult<Vec<User>> {
        self.inner.fetch_users().await
    }

    async fn fetch_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        if self.misses_duplicates {
            return Ok(None);
        }
        self.inner.fetch_user_by_email(email).await
    }

    async fn update_user(
        &self,
        user_id: i32,
        expected_version: i32,
        patch: &UserPatch,
    ) -> StoreResult<u64> {
        match self.scripted_write() {
            Some(result) => result,
            None => self.inner.update_user(user_id, expected_version, patch).await,
        }
    }

    async fn soft_delete_user(&self, user_id: i32, expected_version: i32) -> StoreResult<u64> {
        self.inner.soft_delete_user(user_id, expected_version).await
    }

    async fn insert_photo(&self, photo: &Photo) -> StoreResult<Photo> {
        self.inner.insert_photo(photo).await
    }

    async fn fetch_photo(&self, photo_id: i32) -> StoreResult<Option<Photo>> {
        self.inner.fetch_photo(photo_id).await
    }

    async fn fetch_photos(&self) -> StoreResult<Vec<Photo>> {
        self.inner.fetch_photos().await
    }

    async fn fetch_photos_by_event(&self, event_id: i32) -> StoreResult<Vec<Photo>> {
        self.inner.fetch_photos_by_event(event_id).await
    }

    async fn update_photo_caption(
        &self,
        photo_id: i32,
        expected_version: i32,
        caption: Option<&str>,
    ) -> StoreResult<u64> {
        match self.scripted_write() {
            Some(result) => result,
            None => {
                self.inner
                    .update_photo_caption(photo_id, expected_version, caption)
                    .await
            }
        }
    }

    async fn delete_photo(&self, photo_id: i32, expected_version: i32) -> StoreResult<u64> {
        self.inner.delete_photo(photo_id, expected_version).await
    }

    async fn insert_attendance(
        &self,
        attendance: &EventAttendance,
    ) -> StoreResult<EventAttendance> {
        self.inner.insert_attendance(attendance).await
    }

    async fn fetch_attendance(
        &self,
        event_id: i32,
        user_id: i32,
    ) -> StoreResult<Option<EventAttendance>> {
        if self.misses_duplicates {
            return Ok(None);
        }
        self.inner.fetch_attendance(event_id, user_id).await
    }

    async fn fetch_attendances(&self) -> StoreResult<Vec<EventAttendance>> {
        self.inner.fetch_attendances().await
    }

    async fn fetch_attendances_by_event(&self, event_id: i32) -> StoreResult<Vec<EventAttendance>> {
        self.inner.fetch_attendances_by_event(event_id).await
    }

    async fn fetch_attendances_by_user(&self, user_id: i32) -> StoreResult<Vec<EventAttendance>> {
        self.inner.fetch_attendances_by_user(user_id).await
    }

    async fn update_attendance_check_in(
        &self,
        event_id: i32,
        user_id: i32,
        expected: Option<DateTime<Utc>>,
        check_in: Option<DateTime<Utc>>,
    ) -> StoreResult<u64> {
        self.inner
            .update_attendance_check_in(event_id, user_id, expected, check_in)
            .await
    }

    async fn delete_attendance(&self, event_id: i32, user_id: i32) -> StoreResult<u64> {
        self.inner.delete_attendance(event_id, user_id).await
    }

    async fn run_nightly_cleanup(&self) -> StoreResult<()> {
        self.inner.run_nightly_cleanup().await
    }

    async fn run_status_update(&self) -> StoreResult<()> {
        self.inner.run_status_update().await
    }
}
