use chrono::Utc;
use tracing::warn;

use crate::dtos::{ChangePasswordRequest, CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::mappers::{Mapper, UserMapper};
use crate::repositories::UserRepository;
use crate::utils::outcome::Outcome;
use crate::utils::password;
use crate::validators::{UserValidator, Validator};

#[derive(Clone)]
pub struct UserService {
    repository: UserRepository,
}

impl UserService {
    pub fn new(repository: UserRepository) -> Self {
        Self { repository }
    }

    pub async fn create(&self, request: CreateUserRequest) -> Outcome<UserResponse> {
        if let Some(rejected) = UserValidator::validate_for_create(&request).rejection() {
            return rejected;
        }
        let user = UserMapper::from_create(&request, password::hash(&request.password), Utc::now());
        self.repository
            .create(user)
            .await
            .map(|user| UserMapper::to_response(&user))
    }

    pub async fn get_all(&self) -> Outcome<Vec<UserResponse>> {
        self.repository
            .get_all()
            .await
            .map(|users| UserMapper::to_responses(&users))
    }

    pub async fn get_by_id(&self, user_id: i32) -> Outcome<UserResponse> {
        if let Some(rejected) = UserValidator::validate_id(user_id).rejection() {
            return rejected;
        }
        self.repository
            .get_by_id(user_id)
            .await
            .map(|user| UserMapper::to_response(&user))
    }

    pub async fn update(&self, request: UpdateUserRequest) -> Outcome<UserResponse> {
        if let Some(rejected) = UserValidator::validate_for_update(&request).rejection() {
            return rejected;
        }
        let user = UserMapper::from_update(&request);
        self.repository
            .update(user)
            .await
            .map(|user| UserMapper::to_response(&user))
    }

    /// Replaces the password after checking the current one.
    ///
    /// A wrong current password is reported as Unauthorized.
    pub async fn change_password(&self, request: ChangePasswordRequest) -> Outcome<UserResponse> {
        if let Some(rejected) = UserValidator::validate_for_password_change(&request).rejection() {
            return rejected;
        }
        let user = match self.repository.get_by_id(request.user_id).await.into_result() {
            Ok(user) => user,
            Err(failure) => return failure.map(|user| UserMapper::to_response(&user)),
        };
        if !password::verify(&request.current_password, &user.password_hash) {
            warn!(user_id = user.user_id, "Password change with wrong current password");
            return Outcome::unauthorized("Current password is incorrect.");
        }

        self.repository
            .update_password(user.user_id, user.version, password::hash(&request.new_password))
            .await
            .map(|user| UserMapper::to_response(&user))
    }

    pub async fn delete(&self, user_id: i32) -> Outcome<UserResponse> {
        if let Some(rejected) = UserValidator::validate_id(user_id).rejection() {
            return rejected;
        }
        self.repository
            .delete(user_id)
            .await
            .map(|user| UserMapper::to_response(&user))
    }
}
