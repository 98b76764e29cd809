use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use super::event::visible;
use super::{settle, stale, Classify};
use crate::models::Photo;
use crate::store::Store;
use crate::utils::outcome::{Failure, Outcome, Status};

#[derive(Clone)]
pub struct PhotoRepository {
    store: Arc<dyn Store>,
}

fn not_found(photo_id: i32) -> Failure {
    Failure::not_found(format!("Photo with id {photo_id} was not found."))
}

impl PhotoRepository {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// A photo is only visible while the event it belongs to is live.
    async fn existing(&self, photo_id: i32, operation: &'static str) -> Result<Photo, Failure> {
        let photo = self
            .store
            .fetch_photo(photo_id)
            .await
            .classify(operation)?
            .ok_or_else(|| not_found(photo_id))?;
        match self.ensure_event(photo.event_id, operation).await {
            Ok(()) => Ok(photo),
            Err(failure) if failure.status() == Status::NotFound => Err(not_found(photo_id)),
            Err(failure) => Err(failure),
        }
    }

    async fn ensure_event(&self, event_id: i32, operation: &'static str) -> Result<(), Failure> {
        let event = self
            .store
            .fetch_event(event_id)
            .await
            .classify(operation)?
            .and_then(visible);
        match event {
            Some(_) => Ok(()),
            None => Err(Failure::not_found("The specified event does not exist.")),
        }
    }

    pub async fn create(&self, photo: Photo) -> Outcome<Photo> {
        debug!(event_id = photo.event_id, bytes = photo.photo_data.len(), "Creating photo");
        settle(self.try_create(photo).await, Outcome::created)
    }

    async fn try_create(&self, photo: Photo) -> Result<Photo, Failure> {
        self.ensure_event(photo.event_id, "photos.create").await?;
        let inserted = self
            .store
            .insert_photo(&photo)
            .await
            .classify("photos.create")?;
        info!(photo_id = inserted.photo_id, event_id = inserted.event_id, "Photo created");
        Ok(inserted)
    }

    pub async fn get_all(&self) -> Outcome<Vec<Photo>> {
        debug!("Fetching all photos");
        settle(self.try_get_all().await, Outcome::ok)
    }

    async fn try_get_all(&self) -> Result<Vec<Photo>, Failure> {
        let photos = self
            .store
            .fetch_photos()
            .await
            .classify("photos.get_all")?;
        let live_events: HashSet<i32> = self
            .store
            .fetch_events()
            .await
            .classify("photos.get_all")?
            .into_iter()
            .filter(|event| !event.is_deleted)
            .map(|event| event.event_id)
            .collect();
        Ok(photos
            .into_iter()
            .filter(|photo| live_events.contains(&photo.event_id))
            .collect())
    }

    pub async fn get_by_id(&self, photo_id: i32) -> Outcome<Photo> {
        debug!(photo_id, "Fetching photo");
        settle(self.existing(photo_id, "photos.get_by_id").await, Outcome::ok)
    }

    pub async fn get_by_event_id(&self, event_id: i32) -> Outcome<Vec<Photo>> {
        debug!(event_id, "Fetching photos of event");
        let result = match self.ensure_event(event_id, "photos.get_by_event_id").await {
            Ok(()) => self
                .store
                .fetch_photos_by_event(event_id)
                .await
                .classify("photos.get_by_event_id"),
            Err(failure) => Err(failure),
        };
        settle(result, Outcome::ok)
    }

    /// Replaces the caption, the only mutable field of a photo.
    pub async fn update(&self, photo: Photo) -> Outcome<Photo> {
        debug!(photo_id = photo.photo_id, version = photo.version, "Updating photo");
        settle(self.try_update(photo).await, Outcome::ok)
    }

    async fn try_update(&self, photo: Photo) -> Result<Photo, Failure> {
        let current = self.existing(photo.photo_id, "photos.update").await?;
        if current.version != photo.version {
            return Err(stale("photo"));
        }
        if current.caption == photo.caption {
            return Ok(current);
        }

        let affected = self
            .store
            .update_photo_caption(current.photo_id, current.version, photo.caption.as_deref())
            .await
            .classify("photos.update")?;
        if affected == 0 {
            return Err(stale("photo"));
        }
        info!(photo_id = current.photo_id, "Photo caption updated");
        self.existing(current.photo_id, "photos.update").await
    }

    /// Removes the photo row and returns it as it was before removal.
    pub async fn delete(&self, photo_id: i32) -> Outcome<Photo> {
        debug!(photo_id, "Deleting photo");
        settle(self.try_delete(photo_id).await, Outcome::ok)
    }

    async fn try_delete(&self, photo_id: i32) -> Result<Photo, Failure> {
        let current = self.existing(photo_id, "photos.delete").await?;
        let affected = self
            .store
            .delete_photo(photo_id, current.version)
            .await
            .classify("photos.delete")?;
        if affected == 0 {
            return Err(stale("photo"));
        }
        info!(photo_id, "Photo deleted");
        Ok(current)
    }
}
