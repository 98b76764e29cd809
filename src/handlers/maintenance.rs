use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::repositories::GENERIC_FAILURE;
use crate::state::AppState;
use crate::utils::outcome::Outcome;

#[derive(Serialize)]
struct MaintenanceRun {
    completed: bool,
}

fn report(completed: bool) -> Response {
    if completed {
        Outcome::ok(MaintenanceRun { completed }).into_response()
    } else {
        Outcome::<MaintenanceRun>::internal_server_error(GENERIC_FAILURE).into_response()
    }
}

pub async fn nightly_cleanup(State(state): State<AppState>) -> Response {
    report(state.maintenance.run_nightly_cleanup().await)
}

pub async fn status_update(State(state): State<AppState>) -> Response {
    report(state.maintenance.run_status_update().await)
}
