use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::{positive_id, required, run, version, Rule, Validator};
use crate::dtos::{CreateEventRequest, UpdateEventRequest};
use crate::utils::outcome::Outcome;

const TITLE_MAX: usize = 100;
const DESCRIPTION_MAX: usize = 500;

pub struct EventValidator;

fn schedule(start: DateTime<Utc>, end: DateTime<Utc>) -> Rule {
    if end <= start {
        return Err("End time must be after start time.".to_string());
    }
    Ok(())
}

fn trash_collected(value: Decimal) -> Rule {
    if value < Decimal::ZERO {
        return Err("Trash collected cannot be negative.".to_string());
    }
    Ok(())
}

fn coordinates(latitude: f64, longitude: f64) -> Rule {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err("Latitude must be between -90 and 90.".to_string());
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err("Longitude must be between -180 and 180.".to_string());
    }
    Ok(())
}

impl EventValidator {
    pub fn validate_status(status_id: i32) -> Outcome<bool> {
        run(|| positive_id("Status id", status_id))
    }
}

impl Validator for EventValidator {
    type Create = CreateEventRequest;
    type Update = UpdateEventRequest;

    fn validate_for_create(request: &CreateEventRequest) -> Outcome<bool> {
        run(|| {
            required("Title", &request.title, TITLE_MAX)?;
            required("Description", &request.description, DESCRIPTION_MAX)?;
            schedule(request.start_time, request.end_time)?;
            trash_collected(request.trash_collected)?;
            if request.number_of_attendees < 0 {
                return Err("Number of attendees cannot be negative.".to_string());
            }
            positive_id("Status id", request.status_id)?;
            coordinates(request.latitude, request.longitude)
        })
    }

    fn validate_for_update(request: &UpdateEventRequest) -> Outcome<bool> {
        run(|| {
            positive_id("Event id", request.event_id)?;
            required("Title", &request.title, TITLE_MAX)?;
            required("Description", &request.description, DESCRIPTION_MAX)?;
            schedule(request.start_time, request.end_time)?;
            trash_collected(request.trash_collected)?;
            positive_id("Status id", request.status_id)?;
            positive_id("Location id", request.location_id)?;
            version(request.version)
        })
    }

    fn validate_id(id: i32) -> Outcome<bool> {
        run(|| positive_id("Event id", id))
    }
}
