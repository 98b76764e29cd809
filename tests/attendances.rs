mod common;

use chrono::{Duration, Utc};

use cleanup_server::dtos::{CreateEventAttendanceRequest, UpdateEventAttendanceRequest};
use cleanup_server::utils::{Outcome, Status};

use common::scripted::ScriptedStore;
use common::{create_event, create_user, scripted, setup};

fn attend(event_id: i32, user_id: i32) -> CreateEventAttendanceRequest {
    CreateEventAttendanceRequest {
        event_id,
        user_id,
        check_in: None,
    }
}

#[tokio::test]
async fn test_same_pair_cannot_attend_twice() {
    let (_, state) = setup();
    let event = create_event(&state, "Beach Cleanup").await;
    let user = create_user(&state, "Ada").await;

    let first = state
        .attendances
        .create(attend(event.event_id, user.user_id))
        .await;
    assert_eq!(first.status(), Status::Created);

    let second = state
        .attendances
        .create(attend(event.event_id, user.user_id))
        .await;
    assert_eq!(
        second,
        Outcome::conflict("The user is already attending this event.")
    );
}

#[tokio::test]
async fn test_missing_event_or_user_is_not_found() {
    let (_, state) = setup();
    let event = create_event(&state, "Beach Cleanup").await;
    let user = create_user(&state, "Ada").await;

    assert_eq!(
        state.attendances.create(attend(99, user.user_id)).await.status(),
        Status::NotFound
    );
    assert_eq!(
        state.attendances.create(attend(event.event_id, 99)).await.status(),
        Status::NotFound
    );
}

#[tokio::test]
async fn test_invalid_key_is_rejected_before_store() {
    let (store, state) = setup();

    let outcome = state.attendances.get_by_id(0, 3).await;

    assert_eq!(outcome.status(), Status::BadRequest);
    assert_eq!(store.statements(), 0);
}

#[tokio::test]
async fn test_deleted_user_is_hidden_from_event_attendances() {
    let (_, state) = setup();
    let event = create_event(&state, "Beach Cleanup").await;
    let ada = create_user(&state, "Ada").await;
    let ben = create_user(&state, "Ben").await;
    for user_id in [ada.user_id, ben.user_id] {
        let _ = state.attendances.create(attend(event.event_id, user_id)).await;
    }

    let _ = state.users.delete(ben.user_id).await;

    let event = state
        .events
        .get_by_id(event.event_id)
        .await
        .into_value()
        .expect("event");
    let attendees: Vec<i32> = event.attendances.iter().map(|a| a.user_id).collect();
    assert_eq!(attendees, vec![ada.user_id]);

    let users = state
        .attendances
        .get_users_by_event_id(event.event_id)
        .await
        .into_value()
        .expect("users");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].user_id, ada.user_id);

    assert_eq!(
        state
            .attendances
            .get_by_id(event.event_id, ben.user_id)
            .await
            .status(),
        Status::NotFound
    );
}

#[tokio::test]
async fn test_events_by_user_skip_deleted_events() {
    let (_, state) = setup();
    let beach = create_event(&state, "Beach Cleanup").await;
    let park = create_event(&state, "Park Cleanup").await;
    let user = create_user(&state, "Ada").await;
    for event_id in [beach.event_id, park.event_id] {
        let _ = state.attendances.create(attend(event_id, user.user_id)).await;
    }

    let _ = state.events.delete(park.event_id).await;

    let events = state
        .attendances
        .get_events_by_user_id(user.user_id)
        .await
        .into_value()
        .expect("events");
    let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Beach Cleanup"]);
}

#[tokio::test]
async fn test_check_in_update_and_hard_delete() {
    let (_, state) = setup();
    let event = create_event(&state, "Beach Cleanup").await;
    let user = create_user(&state, "Ada").await;
    let _ = state
        .attendances
        .create(attend(event.event_id, user.user_id))
        .await;

    let check_in = Utc::now() - Duration::minutes(5);
    let updated = state
        .attendances
        .update(UpdateEventAttendanceRequest {
            event_id: event.event_id,
            user_id: user.user_id,
            check_in: Some(check_in),
        })
        .await
        .into_value()
        .expect("update succeeds");
    assert_eq!(updated.check_in, Some(check_in));

    let deleted = state
        .attendances
        .delete(event.event_id, user.user_id)
        .await;
    assert_eq!(deleted.status(), Status::Ok);
    assert_eq!(
        state
            .attendances
            .get_by_id(event.event_id, user.user_id)
            .await
            .status(),
        Status::NotFound
    );
    assert!(state
        .attendances
        .get_all()
        .await
        .into_value()
        .is_some_and(|all| all.is_empty()));
}

#[tokio::test]
async fn test_composite_key_holds_when_lookup_misses() {
    let state = scripted(ScriptedStore::missing_duplicates());
    let event = create_event(&state, "Beach Cleanup").await;
    let user = create_user(&state, "Ada").await;

    let first = state
        .attendances
        .create(attend(event.event_id, user.user_id))
        .await;
    assert_eq!(first.status(), Status::Created);

    let second = state
        .attendances
        .create(attend(event.event_id, user.user_id))
        .await;
    assert_eq!(
        second,
        Outcome::conflict("The user is already attending this event.")
    );
}
