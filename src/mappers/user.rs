use chrono::{DateTime, Utc};

use super::{Mapper, RoleMapper};
use crate::dtos::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::models::User;

pub struct UserMapper;

impl UserMapper {
    /// The plain password never reaches the entity; callers pass its digest.
    pub fn from_create(
        request: &CreateUserRequest,
        password_hash: String,
        created_date: DateTime<Utc>,
    ) -> User {
        User {
            user_id: 0,
            name: request.name.clone(),
            email: request.email.clone(),
            password_hash,
            role_id: request.role_id,
            created_date,
            is_deleted: false,
            version: 0,
            role: None,
        }
    }

    /// `password_hash` and `created_date` are not updatable and are left at
    /// placeholder values the repository ignores.
    pub fn from_update(request: &UpdateUserRequest) -> User {
        User {
            user_id: request.user_id,
            name: request.name.clone(),
            email: request.email.clone(),
            password_hash: String::new(),
            role_id: request.role_id,
            created_date: DateTime::<Utc>::UNIX_EPOCH,
            is_deleted: false,
            version: request.version,
            role: None,
        }
    }
}

impl Mapper for UserMapper {
    type Entity = User;
    type Response = UserResponse;

    fn to_response(entity: &User) -> UserResponse {
        UserResponse {
            user_id: entity.user_id,
            name: entity.name.clone(),
            email: entity.email.clone(),
            role_id: entity.role_id,
            created_date: entity.created_date,
            is_deleted: entity.is_deleted,
            version: entity.version,
            role: entity.role.as_ref().map(RoleMapper::to_response),
        }
    }

    /// The response omits the password hash; it comes back empty.
    fn to_entity(response: &UserResponse) -> User {
        User {
            user_id: response.user_id,
            name: response.name.clone(),
            email: response.email.clone(),
            password_hash: String::new(),
            role_id: response.role_id,
            created_date: response.created_date,
            is_deleted: response.is_deleted,
            version: response.version,
            role: response.role.as_ref().map(RoleMapper::to_entity),
        }
    }
}
