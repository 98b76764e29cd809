use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::Role;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: i32,
    pub created_date: DateTime<Utc>,
    pub is_deleted: bool,
    pub version: i32,
    #[sqlx(skip)]
    pub role: Option<Role>,
}

/// Mutable user columns that changed. `password_hash` only moves through
/// the dedicated password change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role_id: Option<i32>,
    pub password_hash: Option<String>,
}

impl UserPatch {
    pub fn between(current: &User, requested: &User) -> Self {
        Self {
            name: (current.name != requested.name).then(|| requested.name.clone()),
            email: (current.email != requested.email).then(|| requested.email.clone()),
            role_id: (current.role_id != requested.role_id).then_some(requested.role_id),
            password_hash: None,
        }
    }

    pub fn password(password_hash: String) -> Self {
        Self {
            password_hash: Some(password_hash),
            ..Self::default()
        }
    }

    pub fn columns(&self) -> Vec<&'static str> {
        let mut columns = Vec::new();
        if self.name.is_some() {
            columns.push("name");
        }
        if self.email.is_some() {
            columns.push("email");
        }
        if self.password_hash.is_some() {
            columns.push("password_hash");
        }
        if self.role_id.is_some() {
            columns.push("role_id");
        }
        columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns().is_empty()
    }

    pub fn apply(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(password_hash) = &self.password_hash {
            user.password_hash = password_hash.clone();
        }
        if let Some(role_id) = self.role_id {
            user.role_id = role_id;
        }
    }
}
