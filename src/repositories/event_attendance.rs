use std::sync::Arc;

use tracing::{debug, info};

use super::event::visible;
use super::{settle, Classify};
use crate::models::{Event, EventAttendance, User};
use crate::store::Store;
use crate::utils::outcome::{Failure, Outcome};

const ALREADY_ATTENDING: &str = "The user is already attending this event.";

#[derive(Clone)]
pub struct EventAttendanceRepository {
    store: Arc<dyn Store>,
}

fn not_found(event_id: i32, user_id: i32) -> Failure {
    Failure::not_found(format!(
        "Attendance of user {user_id} at event {event_id} was not found."
    ))
}

/// An attendance is listed only while both its event and its user are live.
fn is_live(attendance: &EventAttendance) -> bool {
    let event_live = attendance.event.as_ref().map_or(true, |e| !e.is_deleted);
    event_live && !attendance.has_deleted_user()
}

impl EventAttendanceRepository {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    async fn existing(
        &self,
        event_id: i32,
        user_id: i32,
        operation: &'static str,
    ) -> Result<EventAttendance, Failure> {
        self.store
            .fetch_attendance(event_id, user_id)
            .await
            .classify(operation)?
            .filter(is_live)
            .ok_or_else(|| not_found(event_id, user_id))
    }

    async fn live_event(&self, event_id: i32, operation: &'static str) -> Result<Event, Failure> {
        self.store
            .fetch_event(event_id)
            .await
            .classify(operation)?
            .and_then(visible)
            .ok_or_else(|| Failure::not_found("The specified event does not exist."))
    }

    async fn live_user(&self, user_id: i32, operation: &'static str) -> Result<User, Failure> {
        self.store
            .fetch_user(user_id)
            .await
            .classify(operation)?
            .filter(|user| !user.is_deleted)
            .ok_or_else(|| Failure::not_found("The specified user does not exist."))
    }

    /// Registers a user for an event. Both must exist and the pair must not
    /// already be registered.
    pub async fn create(&self, attendance: EventAttendance) -> Outcome<EventAttendance> {
        debug!(
            event_id = attendance.event_id,
            user_id = attendance.user_id,
            "Creating attendance"
        );
        settle(self.try_create(attendance).await, Outcome::created)
    }

    async fn try_create(
        &self,
        attendance: EventAttendance,
    ) -> Result<EventAttendance, Failure> {
        let (event_id, user_id) = attendance.key();
        self.live_event(event_id, "attendances.create").await?;
        self.live_user(user_id, "attendances.create").await?;

        // The primary key settles concurrent registrations; this probe only
        // answers the common case without a failed insert.
        let existing = self
            .store
            .fetch_attendance(event_id, user_id)
            .await
            .classify("attendances.create")?;
        if existing.is_some() {
            return Err(Failure::conflict(ALREADY_ATTENDING));
        }

        let inserted = self
            .store
            .insert_attendance(&attendance)
            .await
            .classify("attendances.create")?;
        info!(event_id, user_id, "Attendance created");
        Ok(inserted)
    }

    pub async fn get_all(&self) -> Outcome<Vec<EventAttendance>> {
        debug!("Fetching all attendances");
        match self
            .store
            .fetch_attendances()
            .await
            .classify("attendances.get_all")
        {
            Ok(attendances) => Outcome::ok(attendances.into_iter().filter(is_live).collect()),
            Err(failure) => failure.into(),
        }
    }

    pub async fn get_by_id(&self, event_id: i32, user_id: i32) -> Outcome<EventAttendance> {
        debug!(event_id, user_id, "Fetching attendance");
        settle(
            self.existing(event_id, user_id, "attendances.get_by_id")
                .await,
            Outcome::ok,
        )
    }

    /// Sets the check-in time, the only mutable field of an attendance.
    pub async fn update(&self, attendance: EventAttendance) -> Outcome<EventAttendance> {
        debug!(
            event_id = attendance.event_id,
            user_id = attendance.user_id,
            "Updating attendance"
        );
        settle(self.try_update(attendance).await, Outcome::ok)
    }

    async fn try_update(
        &self,
        attendance: EventAttendance,
    ) -> Result<EventAttendance, Failure> {
        let (event_id, user_id) = attendance.key();
        let current = self
            .existing(event_id, user_id, "attendances.update")
            .await?;
        if current.check_in == attendance.check_in {
            return Ok(current);
        }

        let affected = self
            .store
            .update_attendance_check_in(event_id, user_id, current.check_in, attendance.check_in)
            .await
            .classify("attendances.update")?;
        if affected == 0 {
            return Err(Failure::conflict(
                "The attendance was modified by another request. Reload it and try again.",
            ));
        }
        info!(event_id, user_id, "Attendance check-in updated");
        self.existing(event_id, user_id, "attendances.update").await
    }

    /// Removes the attendance row and returns it as it was before removal.
    pub async fn delete(&self, event_id: i32, user_id: i32) -> Outcome<EventAttendance> {
        debug!(event_id, user_id, "Deleting attendance");
        settle(self.try_delete(event_id, user_id).await, Outcome::ok)
    }

    async fn try_delete(
        &self,
        event_id: i32,
        user_id: i32,
    ) -> Result<EventAttendance, Failure> {
        let current = self
            .existing(event_id, user_id, "attendances.delete")
            .await?;
        let affected = self
            .store
            .delete_attendance(event_id, user_id)
            .await
            .classify("attendances.delete")?;
        if affected == 0 {
            return Err(Failure::conflict(
                "The attendance was removed by another request.",
            ));
        }
        info!(event_id, user_id, "Attendance deleted");
        Ok(current)
    }

    /// Live events the user is registered for, fully loaded.
    pub async fn get_events_by_user_id(&self, user_id: i32) -> Outcome<Vec<Event>> {
        debug!(user_id, "Fetching events of user");
        settle(self.try_get_events_by_user_id(user_id).await, Outcome::ok)
    }

    async fn try_get_events_by_user_id(&self, user_id: i32) -> Result<Vec<Event>, Failure> {
        self.live_user(user_id, "attendances.get_events_by_user_id")
            .await?;
        let attendances = self
            .store
            .fetch_attendances_by_user(user_id)
            .await
            .classify("attendances.get_events_by_user_id")?;

        let mut events = Vec::with_capacity(attendances.len());
        for attendance in attendances {
            let event = self
                .store
                .fetch_event(attendance.event_id)
                .await
                .classify("attendances.get_events_by_user_id")?;
            events.extend(event.and_then(visible));
        }
        Ok(events)
    }

    /// Live users registered for the event.
    pub async fn get_users_by_event_id(&self, event_id: i32) -> Outcome<Vec<User>> {
        debug!(event_id, "Fetching users of event");
        settle(self.try_get_users_by_event_id(event_id).await, Outcome::ok)
    }

    async fn try_get_users_by_event_id(&self, event_id: i32) -> Result<Vec<User>, Failure> {
        self.live_event(event_id, "attendances.get_users_by_event_id")
            .await?;
        let attendances = self
            .store
            .fetch_attendances_by_event(event_id)
            .await
            .classify("attendances.get_users_by_event_id")?;
        Ok(attendances
            .into_iter()
            .filter_map(|attendance| attendance.user)
            .filter(|user| !user.is_deleted)
            .collect())
    }
}
