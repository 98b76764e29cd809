use validator::ValidateEmail;

use super::{positive_id, required, run, version, Rule, Validator};
use crate::dtos::{ChangePasswordRequest, CreateUserRequest, UpdateUserRequest};
use crate::models::Role;
use crate::utils::outcome::Outcome;

const NAME_MAX: usize = 100;
const EMAIL_MAX: usize = 255;
const PASSWORD_MIN: usize = 8;
const PASSWORD_MAX: usize = 50;

pub struct UserValidator;

fn email(value: &str) -> Rule {
    required("Email", value, EMAIL_MAX)?;
    if !value.validate_email() {
        return Err("Email is not a valid email address.".to_string());
    }
    Ok(())
}

fn password(field: &str, value: &str) -> Rule {
    let length = value.chars().count();
    if !(PASSWORD_MIN..=PASSWORD_MAX).contains(&length) {
        return Err(format!(
            "{field} must be between {PASSWORD_MIN} and {PASSWORD_MAX} characters."
        ));
    }
    Ok(())
}

fn role(role_id: i32) -> Rule {
    if !Role::is_known(role_id) {
        return Err("Role must be Organizer or Volunteer.".to_string());
    }
    Ok(())
}

impl UserValidator {
    pub fn validate_for_password_change(request: &ChangePasswordRequest) -> Outcome<bool> {
        run(|| {
            positive_id("User id", request.user_id)?;
            if request.current_password.is_empty() {
                return Err("Current password is required.".to_string());
            }
            password("New password", &request.new_password)?;
            if request.new_password == request.current_password {
                return Err("New password must differ from the current password.".to_string());
            }
            Ok(())
        })
    }
}

impl Validator for UserValidator {
    type Create = CreateUserRequest;
    type Update = UpdateUserRequest;

    fn validate_for_create(request: &CreateUserRequest) -> Outcome<bool> {
        run(|| {
            required("Name", &request.name, NAME_MAX)?;
            email(&request.email)?;
            password("Password", &request.password)?;
            role(request.role_id)
        })
    }

    fn validate_for_update(request: &UpdateUserRequest) -> Outcome<bool> {
        run(|| {
            positive_id("User id", request.user_id)?;
            required("Name", &request.name, NAME_MAX)?;
            email(&request.email)?;
            role(request.role_id)?;
            version(request.version)
        })
    }

    fn validate_id(id: i32) -> Outcome<bool> {
        run(|| positive_id("User id", id))
    }
}
