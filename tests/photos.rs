mod common;

use cleanup_server::dtos::UpdatePhotoRequest;
use cleanup_server::utils::{Outcome, Status};

use common::scripted::ScriptedStore;
use common::{create_event, photo_request, scripted, setup};

#[tokio::test]
async fn test_caption_over_limit_is_bad_request() {
    let (store, state) = setup();
    let mut request = photo_request(1);
    request.caption = Some("x".repeat(201));

    let outcome = state.photos.create(request).await;

    assert_eq!(
        outcome,
        Outcome::bad_request("Caption cannot exceed 200 characters.")
    );
    assert_eq!(store.statements(), 0);
}

#[tokio::test]
async fn test_photo_for_missing_event_is_not_found() {
    let (_, state) = setup();

    let outcome = state.photos.create(photo_request(5)).await;

    assert_eq!(outcome.status(), Status::NotFound);
}

#[tokio::test]
async fn test_photos_are_listed_per_event() {
    let (_, state) = setup();
    let beach = create_event(&state, "Beach Cleanup").await;
    let park = create_event(&state, "Park Cleanup").await;

    let first = state.photos.create(photo_request(beach.event_id)).await;
    assert_eq!(first.status(), Status::Created);
    let _ = state.photos.create(photo_request(beach.event_id)).await;
    let _ = state.photos.create(photo_request(park.event_id)).await;

    let beach_photos = state
        .photos
        .get_by_event_id(beach.event_id)
        .await
        .into_value()
        .expect("listing succeeds");
    assert_eq!(beach_photos.len(), 2);
    assert!(beach_photos.iter().all(|p| p.event_id == beach.event_id));

    let event = state
        .events
        .get_by_id(beach.event_id)
        .await
        .into_value()
        .expect("event");
    assert_eq!(event.photos.len(), 2);
}

#[tokio::test]
async fn test_update_changes_caption_only_and_checks_version() {
    let (_, state) = setup();
    let event = create_event(&state, "Beach Cleanup").await;
    let photo = state
        .photos
        .create(photo_request(event.event_id))
        .await
        .into_value()
        .expect("photo");

    let updated = state
        .photos
        .update(UpdatePhotoRequest {
            photo_id: photo.photo_id,
            caption: Some("After".to_string()),
            version: photo.version,
        })
        .await
        .into_value()
        .expect("update succeeds");
    assert_eq!(updated.caption.as_deref(), Some("After"));
    assert_eq!(updated.photo_data, photo.photo_data);
    assert_eq!(updated.event_id, photo.event_id);

    let stale = state
        .photos
        .update(UpdatePhotoRequest {
            photo_id: photo.photo_id,
            caption: None,
            version: photo.version,
        })
        .await;
    assert_eq!(stale.status(), Status::Conflict);
}

#[tokio::test]
async fn test_delete_removes_photo() {
    let (_, state) = setup();
    let event = create_event(&state, "Beach Cleanup").await;
    let photo = state
        .photos
        .create(photo_request(event.event_id))
        .await
        .into_value()
        .expect("photo");

    assert_eq!(state.photos.delete(photo.photo_id).await.status(), Status::Ok);
    assert_eq!(
        state.photos.get_by_id(photo.photo_id).await.status(),
        Status::NotFound
    );
    assert_eq!(
        state.photos.delete(photo.photo_id).await.status(),
        Status::NotFound
    );
}

#[tokio::test]
async fn test_photo_write_matching_no_row_is_conflict() {
    let state = scripted(ScriptedStore::losing_writes());
    let event = create_event(&state, "Beach Cleanup").await;
    let photo = state
        .photos
        .create(photo_request(event.event_id))
        .await
        .into_value()
        .expect("photo");

    let outcome = state
        .photos
        .update(UpdatePhotoRequest {
            photo_id: photo.photo_id,
            caption: Some("After".to_string()),
            version: photo.version,
        })
        .await;

    assert_eq!(
        outcome,
        Outcome::conflict("The photo was modified by another request. Reload it and try again.")
    );
}

#[tokio::test]
async fn test_photos_of_deleted_event_are_hidden() {
    let (_, state) = setup();
    let beach = create_event(&state, "Beach Cleanup").await;
    let park = create_event(&state, "Park Cleanup").await;
    let hidden = state
        .photos
        .create(photo_request(beach.event_id))
        .await
        .into_value()
        .expect("photo");
    let kept = state
        .photos
        .create(photo_request(park.event_id))
        .await
        .into_value()
        .expect("photo");

    let _ = state.events.delete(beach.event_id).await;

    let listed: Vec<i32> = state
        .photos
        .get_all()
        .await
        .into_value()
        .expect("listing succeeds")
        .iter()
        .map(|p| p.photo_id)
        .collect();
    assert_eq!(listed, vec![kept.photo_id]);
    assert_eq!(
        state.photos.get_by_id(hidden.photo_id).await.status(),
        Status::NotFound
    );
    assert_eq!(
        state.photos.get_by_event_id(beach.event_id).await.status(),
        Status::NotFound
    );
}
