use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::constraints::*;
use super::{Store, StoreResult};
use crate::models::status::{CANCELED, COMPLETED, ONGOING, UPCOMING};
use crate::models::{
    Event, EventAttendance, EventPatch, EventStatus, Location, Photo, Role, User, UserPatch,
};
use crate::utils::error::StoreError;

#[derive(Default)]
struct Tables {
    statuses: BTreeMap<i32, EventStatus>,
    roles: BTreeMap<i32, Role>,
    locations: BTreeMap<i32, Location>,
    events: BTreeMap<i32, Event>,
    users: BTreeMap<i32, User>,
    photos: BTreeMap<i32, Photo>,
    attendances: BTreeMap<(i32, i32), EventAttendance>,
    next_location_id: i32,
    next_event_id: i32,
    next_user_id: i32,
    next_photo_id: i32,
}

impl Tables {
    fn seeded() -> Self {
        Self {
            statuses: EventStatus::seed()
                .into_iter()
                .map(|s| (s.status_id, s))
                .collect(),
            roles: Role::seed().into_iter().map(|r| (r.role_id, r)).collect(),
            next_location_id: 1,
            next_event_id: 1,
            next_user_id: 1,
            next_photo_id: 1,
            ..Self::default()
        }
    }

    fn check_event(&self, event: &Event) -> StoreResult<()> {
        if !self.statuses.contains_key(&event.status_id) {
            return Err(StoreError::foreign_key(FK_EVENTS_STATUSES));
        }
        if !self.locations.contains_key(&event.location_id) {
            return Err(StoreError::foreign_key(FK_EVENTS_LOCATIONS));
        }
        if event.end_time <= event.start_time {
            return Err(StoreError::check(CK_EVENTS_END_AFTER_START));
        }
        if event.trash_collected < Decimal::ZERO {
            return Err(StoreError::check(CK_EVENTS_TRASH_COLLECTED));
        }
        if event.number_of_attendees < 0 {
            return Err(StoreError::check(CK_EVENTS_NUMBER_OF_ATTENDEES));
        }
        Ok(())
    }

    fn check_user(&self, user: &User) -> StoreResult<()> {
        if !self.roles.contains_key(&user.role_id) {
            return Err(StoreError::foreign_key(FK_USERS_ROLES));
        }
        let duplicate = self
            .users
            .values()
            .any(|other| other.user_id != user.user_id && other.email == user.email);
        if duplicate {
            return Err(StoreError::unique(UX_USERS_EMAIL));
        }
        Ok(())
    }

    fn user_with_role(&self, user: &User) -> User {
        let mut user = user.clone();
        user.role = self.roles.get(&user.role_id).cloned();
        user
    }

    fn event_with_navigations(&self, event: &Event) -> Event {
        let mut event = event.clone();
        event.status = self.statuses.get(&event.status_id).cloned();
        event.location = self.locations.get(&event.location_id).cloned();
        event.photos = self
            .photos
            .values()
            .filter(|p| p.event_id == event.event_id)
            .cloned()
            .collect();
        event.attendances = self
            .attendances
            .values()
            .filter(|a| a.event_id == event.event_id)
            .map(|a| {
                let mut attendance = a.clone();
                attendance.user = self.users.get(&a.user_id).cloned();
                attendance
            })
            .collect();
        event
    }

    fn attendance_with_navigations(&self, attendance: &EventAttendance) -> EventAttendance {
        let mut attendance = attendance.clone();
        attendance.event = self
            .events
            .get(&attendance.event_id)
            .cloned()
            .map(Box::new);
        attendance.user = self.users.get(&attendance.user_id).cloned();
        attendance
    }

    fn attendances_matching(
        &self,
        keep: impl Fn(&EventAttendance) -> bool,
    ) -> Vec<EventAttendance> {
        self.attendances
            .values()
            .filter(|a| keep(a))
            .map(|a| self.attendance_with_navigations(a))
            .collect()
    }
}

/// Version a row takes after a write; overflow is reported, never wrapped.
fn next_version(version: i32) -> StoreResult<i32> {
    version
        .checked_add(1)
        .ok_or_else(|| StoreError::Database("row version overflow".to_string()))
}

/// In-process [`Store`] enforcing the same keys and constraints as the
/// relational schema.
///
/// Every call counts as one statement; [`MemoryStore::statements`] exposes
/// the total. [`MemoryStore::fail_next`] makes the next statement return a
/// given error instead of running.
pub struct MemoryStore {
    tables: Mutex<Tables>,
    statements: AtomicU64,
    injected: Mutex<Option<StoreError>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(Tables::seeded()),
            statements: AtomicU64::new(0),
            injected: Mutex::new(None),
        }
    }

    pub fn statements(&self) -> u64 {
        self.statements.load(Ordering::SeqCst)
    }

    pub fn fail_next(&self, error: StoreError) {
        if let Ok(mut injected) = self.injected.lock() {
            *injected = Some(error);
        }
    }

    /// Starts a statement: counts it, then yields the tables unless a
    /// failure was injected.
    fn begin(&self) -> StoreResult<MutexGuard<'_, Tables>> {
        self.statements.fetch_add(1, Ordering::SeqCst);
        let injected = self
            .injected
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store poisoned".to_string()))?
            .take();
        if let Some(error) = injected {
            return Err(error);
        }
        self.tables
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store poisoned".to_string()))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn fetch_status(&self, status_id: i32) -> StoreResult<Option<EventStatus>> {
        let tables = self.begin()?;
        Ok(tables.statuses.get(&status_id).cloned())
    }

    async fn fetch_location(&self, location_id: i32) -> StoreResult<Option<Location>> {
        let tables = self.begin()?;
        Ok(tables.locations.get(&location_id).cloned())
    }

    async fn fetch_role(&self, role_id: i32) -> StoreResult<Option<Role>> {
        let tables = self.begin()?;
        Ok(tables.roles.get(&role_id).cloned())
    }

    async fn insert_event(&self, event: &Event, location: &Location) -> StoreResult<Event> {
        let mut tables = self.begin()?;
        let location_id = tables.next_location_id;
        let row = Event {
            event_id: tables.next_event_id,
            location_id,
            is_deleted: false,
            version: 1,
            status: None,
            location: None,
            attendances: Vec::new(),
            photos: Vec::new(),
            ..event.clone()
        };

        // The location insert and the event insert succeed or fail together.
        tables.locations.insert(
            location_id,
            Location {
                location_id,
                ..location.clone()
            },
        );
        if let Err(error) = tables.check_event(&row) {
            tables.locations.remove(&location_id);
            return Err(error);
        }
        tables.next_location_id += 1;
        tables.next_event_id += 1;
        tables.events.insert(row.event_id, row.clone());
        Ok(row)
    }

    async fn fetch_event(&self, event_id: i32) -> StoreResult<Option<Event>> {
        let tables = self.begin()?;
        Ok(tables
            .events
            .get(&event_id)
            .map(|event| tables.event_with_navigations(event)))
    }

    async fn fetch_events(&self) -> StoreResult<Vec<Event>> {
        let tables = self.begin()?;
        Ok(tables
            .events
            .values()
            .map(|event| tables.event_with_navigations(event))
            .collect())
    }

    async fn update_event(
        &self,
        event_id: i32,
        expected_version: i32,
        patch: &EventPatch,
    ) -> StoreResult<u64> {
        let mut tables = self.begin()?;
        let Some(current) = tables
            .events
            .get(&event_id)
            .filter(|e| e.version == expected_version && !e.is_deleted)
        else {
            return Ok(0);
        };
        let mut updated = current.clone();
        patch.apply(&mut updated);
        tables.check_event(&updated)?;
        updated.version = next_version(updated.version)?;
        tables.events.insert(event_id, updated);
        Ok(1)
    }

    async fn soft_delete_event(&self, event_id: i32, expected_version: i32) -> StoreResult<u64> {
        let mut tables = self.begin()?;
        match tables
            .events
            .get_mut(&event_id)
            .filter(|e| e.version == expected_version && !e.is_deleted)
        {
            Some(event) => {
                event.version = next_version(event.version)?;
                event.is_deleted = true;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn insert_user(&self, user: &User) -> StoreResult<User> {
        let mut tables = self.begin()?;
        let row = User {
            user_id: tables.next_user_id,
            is_deleted: false,
            version: 1,
            role: None,
            ..user.clone()
        };
        tables.check_user(&row)?;
        tables.next_user_id += 1;
        tables.users.insert(row.user_id, row.clone());
        Ok(row)
    }

    async fn fetch_user(&self, user_id: i32) -> StoreResult<Option<User>> {
        let tables = self.begin()?;
        Ok(tables
            .users
            .get(&user_id)
            .map(|user| tables.user_with_role(user)))
    }

    async fn fetch_users(&self) -> StoreResult<Vec<User>> {
        let tables = self.begin()?;
        Ok(tables
            .users
            .values()
            .map(|user| tables.user_with_role(user))
            .collect())
    }

    async fn fetch_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.begin()?;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn update_user(
        &self,
        user_id: i32,
        expected_version: i32,
        patch: &UserPatch,
    ) -> StoreResult<u64> {
        let mut tables = self.begin()?;
        let Some(current) = tables
            .users
            .get(&user_id)
            .filter(|u| u.version == expected_version && !u.is_deleted)
        else {
            return Ok(0);
        };
        let mut updated = current.clone();
        patch.apply(&mut updated);
        tables.check_user(&updated)?;
        updated.version = next_version(updated.version)?;
        tables.users.insert(user_id, updated);
        Ok(1)
    }

    async fn soft_delete_user(&self, user_id: i32, expected_version: i32) -> StoreResult<u64> {
        let mut tables = self.begin()?;
        match tables
            .users
            .get_mut(&user_id)
            .filter(|u| u.version == expected_version && !u.is_deleted)
        {
            Some(user) => {
                user.version = next_version(user.version)?;
                user.is_deleted = true;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn insert_photo(&self, photo: &Photo) -> StoreResult<Photo> {
        let mut tables = self.begin()?;
        if !tables.events.contains_key(&photo.event_id) {
            return Err(StoreError::foreign_key(FK_PHOTOS_EVENTS));
        }
        let row = Photo {
            photo_id: tables.next_photo_id,
            version: 1,
            ..photo.clone()
        };
        tables.next_photo_id += 1;
        tables.photos.insert(row.photo_id, row.clone());
        Ok(row)
    }

    async fn fetch_photo(&self, photo_id: i32) -> StoreResult<Option<Photo>> {
        let tables = self.begin()?;
        Ok(tables.photos.get(&photo_id).cloned())
    }

    async fn fetch_photos(&self) -> StoreResult<Vec<Photo>> {
        let tables = self.begin()?;
        Ok(tables.photos.values().cloned().collect())
    }

    async fn fetch_photos_by_event(&self, event_id: i32) -> StoreResult<Vec<Photo>> {
        let tables = self.begin()?;
        Ok(tables
            .photos
            .values()
            .filter(|p| p.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn update_photo_caption(
        &self,
        photo_id: i32,
        expected_version: i32,
        caption: Option<&str>,
    ) -> StoreResult<u64> {
        let mut tables = self.begin()?;
        match tables
            .photos
            .get_mut(&photo_id)
            .filter(|p| p.version == expected_version)
        {
            Some(photo) => {
                photo.version = next_version(photo.version)?;
                photo.caption = caption.map(str::to_owned);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_photo(&self, photo_id: i32, expected_version: i32) -> StoreResult<u64> {
        let mut tables = self.begin()?;
        let matches = tables
            .photos
            .get(&photo_id)
            .is_some_and(|p| p.version == expected_version);
        if !matches {
            return Ok(0);
        }
        tables.photos.remove(&photo_id);
        Ok(1)
    }

    async fn insert_attendance(
        &self,
        attendance: &EventAttendance,
    ) -> StoreResult<EventAttendance> {
        let mut tables = self.begin()?;
        if !tables.events.contains_key(&attendance.event_id) {
            return Err(StoreError::foreign_key(FK_EVENT_ATTENDANCES_EVENTS));
        }
        if !tables.users.contains_key(&attendance.user_id) {
            return Err(StoreError::foreign_key(FK_EVENT_ATTENDANCES_USERS));
        }
        if tables.attendances.contains_key(&attendance.key()) {
            return Err(StoreError::unique(PK_EVENT_ATTENDANCES));
        }
        let row = EventAttendance {
            event: None,
            user: None,
            ..attendance.clone()
        };
        tables.attendances.insert(row.key(), row.clone());
        Ok(row)
    }

    async fn fetch_attendance(
        &self,
        event_id: i32,
        user_id: i32,
    ) -> StoreResult<Option<EventAttendance>> {
        let tables = self.begin()?;
        Ok(tables
            .attendances
            .get(&(event_id, user_id))
            .map(|a| tables.attendance_with_navigations(a)))
    }

    async fn fetch_attendances(&self) -> StoreResult<Vec<EventAttendance>> {
        let tables = self.begin()?;
        Ok(tables.attendances_matching(|_| true))
    }

    async fn fetch_attendances_by_event(&self, event_id: i32) -> StoreResult<Vec<EventAttendance>> {
        let tables = self.begin()?;
        Ok(tables.attendances_matching(|a| a.event_id == event_id))
    }

    async fn fetch_attendances_by_user(&self, user_id: i32) -> StoreResult<Vec<EventAttendance>> {
        let tables = self.begin()?;
        Ok(tables.attendances_matching(|a| a.user_id == user_id))
    }

    async fn update_attendance_check_in(
        &self,
        event_id: i32,
        user_id: i32,
        expected: Option<DateTime<Utc>>,
        check_in: Option<DateTime<Utc>>,
    ) -> StoreResult<u64> {
        let mut tables = self.begin()?;
        match tables
            .attendances
            .get_mut(&(event_id, user_id))
            .filter(|a| a.check_in == expected)
        {
            Some(attendance) => {
                attendance.check_in = check_in;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_attendance(&self, event_id: i32, user_id: i32) -> StoreResult<u64> {
        let mut tables = self.begin()?;
        Ok(u64::from(
            tables.attendances.remove(&(event_id, user_id)).is_some(),
        ))
    }

    async fn run_nightly_cleanup(&self) -> StoreResult<()> {
        let mut tables = self.begin()?;
        let events: Vec<i32> = tables
            .events
            .values()
            .filter(|e| e.is_deleted)
            .map(|e| e.event_id)
            .collect();
        let users: Vec<i32> = tables
            .users
            .values()
            .filter(|u| u.is_deleted)
            .map(|u| u.user_id)
            .collect();

        tables
            .attendances
            .retain(|(event_id, user_id), _| !events.contains(event_id) && !users.contains(user_id));
        tables.photos.retain(|_, p| !events.contains(&p.event_id));
        for event_id in &events {
            if let Some(event) = tables.events.remove(event_id) {
                tables.locations.remove(&event.location_id);
            }
        }
        for user_id in &users {
            tables.users.remove(user_id);
        }
        Ok(())
    }

    async fn run_status_update(&self) -> StoreResult<()> {
        let mut tables = self.begin()?;
        let now = Utc::now();
        for event in tables.events.values_mut() {
            if event.is_deleted || event.status_id == CANCELED {
                continue;
            }
            let status_id = if now < event.start_time {
                UPCOMING
            } else if now < event.end_time {
                ONGOING
            } else {
                COMPLETED
            };
            if event.status_id != status_id {
                event.version = next_version(event.version)?;
                event.status_id = status_id;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_overflow_is_an_error() {
        assert_eq!(next_version(1), Ok(2));
        assert_eq!(
            next_version(i32::MAX),
            Err(StoreError::Database("row version overflow".to_string()))
        );
    }

    #[tokio::test]
    async fn test_write_at_max_version_fails_without_changing_row() {
        let store = MemoryStore::new();
        let photo = {
            let mut tables = store.tables.lock().expect("tables");
            tables.events.insert(
                1,
                Event {
                    event_id: 1,
                    title: "Beach Cleanup".to_string(),
                    description: "Bring gloves".to_string(),
                    start_time: DateTime::<Utc>::UNIX_EPOCH,
                    end_time: DateTime::<Utc>::UNIX_EPOCH + chrono::Duration::hours(2),
                    family_friendly: true,
                    trash_collected: Decimal::ZERO,
                    number_of_attendees: 0,
                    status_id: UPCOMING,
                    location_id: 1,
                    is_deleted: false,
                    version: 1,
                    status: None,
                    location: None,
                    attendances: Vec::new(),
                    photos: Vec::new(),
                },
            );
            let photo = Photo {
                photo_id: 1,
                event_id: 1,
                photo_data: vec![1, 2, 3],
                caption: None,
                version: i32::MAX,
            };
            tables.photos.insert(1, photo.clone());
            photo
        };

        let result = store
            .update_photo_caption(1, i32::MAX, Some("After"))
            .await;

        assert!(matches!(result, Err(StoreError::Database(_))));
        assert_eq!(store.fetch_photo(1).await, Ok(Some(photo)));
    }
}
