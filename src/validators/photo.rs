use super::{max_length, positive_id, run, version, Rule, Validator};
use crate::dtos::{CreatePhotoRequest, UpdatePhotoRequest};
use crate::utils::outcome::Outcome;

const CAPTION_MAX: usize = 200;

pub struct PhotoValidator;

fn caption(value: Option<&str>) -> Rule {
    match value {
        Some(caption) => max_length("Caption", caption, CAPTION_MAX),
        None => Ok(()),
    }
}

impl Validator for PhotoValidator {
    type Create = CreatePhotoRequest;
    type Update = UpdatePhotoRequest;

    fn validate_for_create(request: &CreatePhotoRequest) -> Outcome<bool> {
        run(|| {
            positive_id("Event id", request.event_id)?;
            if request.photo_data.is_empty() {
                return Err("Photo data is required.".to_string());
            }
            caption(request.caption.as_deref())
        })
    }

    fn validate_for_update(request: &UpdatePhotoRequest) -> Outcome<bool> {
        run(|| {
            positive_id("Photo id", request.photo_id)?;
            caption(request.caption.as_deref())?;
            version(request.version)
        })
    }

    fn validate_id(id: i32) -> Outcome<bool> {
        run(|| positive_id("Photo id", id))
    }
}
