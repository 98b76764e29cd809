use std::sync::Arc;

use tracing::{debug, info};

use super::{settle, stale, Classify};
use crate::models::{User, UserPatch};
use crate::store::Store;
use crate::utils::outcome::{Failure, Outcome};

const DUPLICATE_EMAIL: &str = "A user with this email already exists.";

#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn Store>,
}

fn not_found(user_id: i32) -> Failure {
    Failure::not_found(format!("User with id {user_id} was not found."))
}

impl UserRepository {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    async fn live(&self, user_id: i32, operation: &'static str) -> Result<User, Failure> {
        self.store
            .fetch_user(user_id)
            .await
            .classify(operation)?
            .filter(|user| !user.is_deleted)
            .ok_or_else(|| not_found(user_id))
    }

    /// Rejects an email already used by another user.
    ///
    /// The probe only saves a round trip; the unique index decides races.
    async fn ensure_email_free(
        &self,
        email: &str,
        user_id: i32,
        operation: &'static str,
    ) -> Result<(), Failure> {
        let owner = self
            .store
            .fetch_user_by_email(email)
            .await
            .classify(operation)?;
        match owner {
            Some(owner) if owner.user_id != user_id => Err(Failure::conflict(DUPLICATE_EMAIL)),
            _ => Ok(()),
        }
    }

    pub async fn create(&self, user: User) -> Outcome<User> {
        debug!(role_id = user.role_id, "Creating user");
        settle(self.try_create(user).await, Outcome::created)
    }

    async fn try_create(&self, user: User) -> Result<User, Failure> {
        let role = self
            .store
            .fetch_role(user.role_id)
            .await
            .classify("users.create")?;
        if role.is_none() {
            return Err(Failure::not_found("The specified role does not exist."));
        }
        self.ensure_email_free(&user.email, user.user_id, "users.create")
            .await?;

        let inserted = self
            .store
            .insert_user(&user)
            .await
            .classify("users.create")?;
        info!(user_id = inserted.user_id, "User created");
        Ok(User { role, ..inserted })
    }

    pub async fn get_all(&self) -> Outcome<Vec<User>> {
        debug!("Fetching all users");
        match self.store.fetch_users().await.classify("users.get_all") {
            Ok(users) => Outcome::ok(users.into_iter().filter(|u| !u.is_deleted).collect()),
            Err(failure) => failure.into(),
        }
    }

    pub async fn get_by_id(&self, user_id: i32) -> Outcome<User> {
        debug!(user_id, "Fetching user");
        settle(self.live(user_id, "users.get_by_id").await, Outcome::ok)
    }

    /// Writes name, email and role changes. `user.version` must match the
    /// stored version; the password hash and soft-delete flag are kept.
    pub async fn update(&self, user: User) -> Outcome<User> {
        debug!(user_id = user.user_id, version = user.version, "Updating user");
        settle(self.try_update(user).await, Outcome::ok)
    }

    async fn try_update(&self, user: User) -> Result<User, Failure> {
        let current = self.live(user.user_id, "users.update").await?;
        if current.version != user.version {
            return Err(stale("user"));
        }

        let patch = UserPatch::between(&current, &user);
        if patch.is_empty() {
            return Ok(current);
        }
        if patch.email.is_some() {
            self.ensure_email_free(&user.email, user.user_id, "users.update")
                .await?;
        }
        self.write(&current, &patch, "users.update").await
    }

    /// Replaces the stored password digest of a live user.
    pub async fn update_password(
        &self,
        user_id: i32,
        expected_version: i32,
        password_hash: String,
    ) -> Outcome<User> {
        debug!(user_id, "Updating user password");
        settle(
            self.try_update_password(user_id, expected_version, password_hash)
                .await,
            Outcome::ok,
        )
    }

    async fn try_update_password(
        &self,
        user_id: i32,
        expected_version: i32,
        password_hash: String,
    ) -> Result<User, Failure> {
        let current = self.live(user_id, "users.update_password").await?;
        if current.version != expected_version {
            return Err(stale("user"));
        }
        self.write(
            &current,
            &UserPatch::password(password_hash),
            "users.update_password",
        )
        .await
    }

    async fn write(
        &self,
        current: &User,
        patch: &UserPatch,
        operation: &'static str,
    ) -> Result<User, Failure> {
        let affected = self
            .store
            .update_user(current.user_id, current.version, patch)
            .await
            .classify(operation)?;
        if affected == 0 {
            return Err(stale("user"));
        }
        info!(user_id = current.user_id, columns = ?patch.columns(), "User updated");
        self.live(current.user_id, operation).await
    }

    /// Soft-deletes the user and returns it with the flag set. Attendance
    /// rows are kept but no longer listed.
    pub async fn delete(&self, user_id: i32) -> Outcome<User> {
        debug!(user_id, "Deleting user");
        settle(self.try_delete(user_id).await, Outcome::ok)
    }

    async fn try_delete(&self, user_id: i32) -> Result<User, Failure> {
        let current = self.live(user_id, "users.delete").await?;
        let affected = self
            .store
            .soft_delete_user(user_id, current.version)
            .await
            .classify("users.delete")?;
        if affected == 0 {
            return Err(stale("user"));
        }
        info!(user_id, "User soft-deleted");

        let flagged = self
            .store
            .fetch_user(user_id)
            .await
            .classify("users.delete")?;
        Ok(flagged.unwrap_or(User {
            is_deleted: true,
            version: current.version + 1,
            ..current
        }))
    }
}
