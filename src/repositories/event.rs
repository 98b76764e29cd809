use std::sync::Arc;

use tracing::{debug, info};

use super::{settle, stale, Classify};
use crate::models::{Event, EventPatch, Location};
use crate::store::Store;
use crate::utils::outcome::{Failure, Outcome};

#[derive(Clone)]
pub struct EventRepository {
    store: Arc<dyn Store>,
}

/// Hides soft-deleted events and strips attendances whose user has been
/// soft-deleted. The attendance rows themselves stay in the store.
pub(crate) fn visible(event: Event) -> Option<Event> {
    if event.is_deleted {
        return None;
    }
    Some(without_deleted_attendees(event))
}

fn without_deleted_attendees(mut event: Event) -> Event {
    event.attendances.retain(|a| !a.has_deleted_user());
    event
}

fn not_found(event_id: i32) -> Failure {
    Failure::not_found(format!("Event with id {event_id} was not found."))
}

impl EventRepository {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    async fn live(&self, event_id: i32, operation: &'static str) -> Result<Event, Failure> {
        self.store
            .fetch_event(event_id)
            .await
            .classify(operation)?
            .and_then(visible)
            .ok_or_else(|| not_found(event_id))
    }

    pub async fn create(&self, event: Event, location: Location) -> Outcome<Event> {
        debug!(title = %event.title, status_id = event.status_id, "Creating event");
        settle(self.try_create(event, location).await, Outcome::created)
    }

    async fn try_create(&self, event: Event, location: Location) -> Result<Event, Failure> {
        let status = self
            .store
            .fetch_status(event.status_id)
            .await
            .classify("events.create")?;
        if status.is_none() {
            return Err(Failure::not_found("The specified status does not exist."));
        }

        let inserted = self
            .store
            .insert_event(&event, &location)
            .await
            .classify("events.create")?;
        info!(event_id = inserted.event_id, "Event created");

        let loaded = self
            .store
            .fetch_event(inserted.event_id)
            .await
            .classify("events.create")?;
        Ok(loaded.and_then(visible).unwrap_or(inserted))
    }

    pub async fn get_all(&self) -> Outcome<Vec<Event>> {
        debug!("Fetching all events");
        match self.store.fetch_events().await.classify("events.get_all") {
            Ok(events) => Outcome::ok(events.into_iter().filter_map(visible).collect()),
            Err(failure) => failure.into(),
        }
    }

    pub async fn get_by_id(&self, event_id: i32) -> Outcome<Event> {
        debug!(event_id, "Fetching event");
        settle(self.live(event_id, "events.get_by_id").await, Outcome::ok)
    }

    /// Writes the mutable fields of `event` that differ from the stored row.
    ///
    /// `event.version` must match the stored version. The soft-delete flag
    /// and attendee count of the stored row are never touched.
    pub async fn update(&self, event: Event) -> Outcome<Event> {
        debug!(event_id = event.event_id, version = event.version, "Updating event");
        settle(self.try_update(event).await, Outcome::ok)
    }

    async fn try_update(&self, event: Event) -> Result<Event, Failure> {
        let current = self.live(event.event_id, "events.update").await?;
        if current.version != event.version {
            return Err(stale("event"));
        }

        let patch = EventPatch::between(&current, &event);
        if patch.is_empty() {
            return Ok(current);
        }
        self.write(&current, &patch, "events.update").await
    }

    /// Moves the event to another status. Any existing status is accepted.
    pub async fn update_status(&self, event_id: i32, status_id: i32) -> Outcome<Event> {
        debug!(event_id, status_id, "Updating event status");
        settle(self.try_update_status(event_id, status_id).await, Outcome::ok)
    }

    async fn try_update_status(
        &self,
        event_id: i32,
        status_id: i32,
    ) -> Result<Event, Failure> {
        let current = self.live(event_id, "events.update_status").await?;
        let status = self
            .store
            .fetch_status(status_id)
            .await
            .classify("events.update_status")?;
        if status.is_none() {
            return Err(Failure::conflict("The specified status does not exist."));
        }
        if current.status_id == status_id {
            return Ok(current);
        }
        self.write(&current, &EventPatch::status(status_id), "events.update_status")
            .await
    }

    async fn write(
        &self,
        current: &Event,
        patch: &EventPatch,
        operation: &'static str,
    ) -> Result<Event, Failure> {
        let affected = self
            .store
            .update_event(current.event_id, current.version, patch)
            .await
            .classify(operation)?;
        if affected == 0 {
            return Err(stale("event"));
        }
        info!(event_id = current.event_id, columns = ?patch.columns(), "Event updated");
        self.live(current.event_id, operation).await
    }

    /// Soft-deletes the event and returns it with the flag set.
    pub async fn delete(&self, event_id: i32) -> Outcome<Event> {
        debug!(event_id, "Deleting event");
        settle(self.try_delete(event_id).await, Outcome::ok)
    }

    async fn try_delete(&self, event_id: i32) -> Result<Event, Failure> {
        let current = self.live(event_id, "events.delete").await?;
        let affected = self
            .store
            .soft_delete_event(event_id, current.version)
            .await
            .classify("events.delete")?;
        if affected == 0 {
            return Err(stale("event"));
        }
        info!(event_id, "Event soft-deleted");

        let flagged = self
            .store
            .fetch_event(event_id)
            .await
            .classify("events.delete")?;
        Ok(flagged.map(without_deleted_attendees).unwrap_or(Event {
            is_deleted: true,
            version: current.version + 1,
            ..current
        }))
    }
}
