mod common;

use cleanup_server::dtos::{ChangePasswordRequest, UpdateUserRequest, UserResponse};
use cleanup_server::models::role::ORGANIZER;
use cleanup_server::store::Store;
use cleanup_server::utils::password;
use cleanup_server::utils::{Outcome, Status};

use common::scripted::ScriptedStore;
use common::{create_user, scripted, setup, user_request, PASSWORD};

fn update_request(user: &UserResponse) -> UpdateUserRequest {
    UpdateUserRequest {
        user_id: user.user_id,
        name: user.name.clone(),
        email: user.email.clone(),
        role_id: user.role_id,
        version: user.version,
    }
}

#[tokio::test]
async fn test_create_stores_a_digest_not_the_password() {
    let (store, state) = setup();

    let user = create_user(&state, "Ada").await;
    assert_eq!(user.role.map(|r| r.name), Some("Volunteer".to_string()));

    let row = store
        .fetch_user(user.user_id)
        .await
        .expect("store read")
        .expect("row exists");
    assert_ne!(row.password_hash, PASSWORD);
    assert!(password::verify(PASSWORD, &row.password_hash));
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let (_, state) = setup();
    create_user(&state, "Ada").await;

    let outcome = state.users.create(user_request("Ada")).await;

    assert_eq!(
        outcome,
        Outcome::conflict("A user with this email already exists.")
    );
}

#[tokio::test]
async fn test_name_error_is_reported_before_email_error() {
    let (store, state) = setup();
    let mut request = user_request("Ada");
    request.name = String::new();
    request.email = "not-an-email".to_string();

    let outcome = state.users.create(request).await;

    assert_eq!(outcome, Outcome::bad_request("Name is required."));
    assert_eq!(store.statements(), 0);
}

#[tokio::test]
async fn test_deleted_user_disappears_from_reads() {
    let (_, state) = setup();
    let mut users = Vec::new();
    for name in ["Ada", "Ben", "Cy", "Dee", "Eve", "Fay", "Gus"] {
        users.push(create_user(&state, name).await);
    }
    let seventh = users[6].user_id;
    assert_eq!(seventh, 7);

    let deleted = state.users.delete(seventh).await;
    assert!(deleted.value().is_some_and(|u| u.is_deleted));

    let remaining = state.users.get_all().await.into_value().expect("list");
    assert_eq!(remaining.len(), 6);
    assert!(remaining.iter().all(|u| u.user_id != seventh));
    assert_eq!(state.users.get_by_id(seventh).await.status(), Status::NotFound);
    assert_eq!(state.users.delete(seventh).await.status(), Status::NotFound);
}

#[tokio::test]
async fn test_update_changes_role_and_rejects_taken_email() {
    let (_, state) = setup();
    let ada = create_user(&state, "Ada").await;
    let ben = create_user(&state, "Ben").await;

    let mut promote = update_request(&ada);
    promote.role_id = ORGANIZER;
    let promoted = state
        .users
        .update(promote)
        .await
        .into_value()
        .expect("update succeeds");
    assert_eq!(promoted.role_id, ORGANIZER);
    assert_eq!(promoted.version, ada.version + 1);

    let mut steal = update_request(&promoted);
    steal.email = ben.email.clone();
    assert_eq!(state.users.update(steal).await.status(), Status::Conflict);
}

#[tokio::test]
async fn test_change_password_checks_current_password() {
    let (_, state) = setup();
    let user = create_user(&state, "Ada").await;

    let wrong = state
        .users
        .change_password(ChangePasswordRequest {
            user_id: user.user_id,
            current_password: "not-the-password".to_string(),
            new_password: "new-password-1".to_string(),
        })
        .await;
    assert_eq!(wrong, Outcome::unauthorized("Current password is incorrect."));

    let changed = state
        .users
        .change_password(ChangePasswordRequest {
            user_id: user.user_id,
            current_password: PASSWORD.to_string(),
            new_password: "new-password-1".to_string(),
        })
        .await;
    assert_eq!(changed.status(), Status::Ok);

    let again = state
        .users
        .change_password(ChangePasswordRequest {
            user_id: user.user_id,
            current_password: PASSWORD.to_string(),
            new_password: "another-password".to_string(),
        })
        .await;
    assert_eq!(again.status(), Status::Unauthorized);
}

#[tokio::test]
async fn test_change_password_for_missing_user_is_not_found() {
    let (_, state) = setup();

    let outcome = state
        .users
        .change_password(ChangePasswordRequest {
            user_id: 12,
            current_password: PASSWORD.to_string(),
            new_password: "new-password-1".to_string(),
        })
        .await;

    assert_eq!(outcome.status(), Status::NotFound);
}

#[tokio::test]
async fn test_unique_email_holds_when_lookup_misses() {
    let state = scripted(ScriptedStore::missing_duplicates());
    create_user(&state, "Ada").await;

    let outcome = state.users.create(user_request("Ada")).await;

    assert_eq!(
        outcome,
        Outcome::conflict("A user with this email already exists.")
    );
    assert_eq!(
        state.users.get_all().await.into_value().map(|users| users.len()),
        Some(1)
    );
}

#[tokio::test]
async fn test_user_write_matching_no_row_is_conflict() {
    let state = scripted(ScriptedStore::losing_writes());
    let user = create_user(&state, "Ada").await;

    let mut request = update_request(&user);
    request.name = "Ada Lovelace".to_string();

    assert_eq!(
        state.users.update(request).await,
        Outcome::conflict("The user was modified by another request. Reload it and try again.")
    );
}
