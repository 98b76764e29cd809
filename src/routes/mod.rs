use axum::routing::{get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::{apply_security_headers, create_cors_layer, Config};
use crate::handlers::{attendances, events, health_check, maintenance, photos, users};
use crate::state::AppState;

pub fn create_routes(state: AppState, config: &Config) -> Router {
    let api = Router::new()
        .route(
            "/events",
            get(events::list).post(events::create).put(events::update),
        )
        .route("/events/:id", get(events::get).delete(events::delete))
        .route("/events/:id/status", put(events::update_status))
        .route("/events/:id/photos", get(events::photos))
        .route("/events/:id/users", get(events::users))
        .route(
            "/attendances",
            get(attendances::list)
                .post(attendances::create)
                .put(attendances::update),
        )
        .route(
            "/attendances/:event_id/:user_id",
            get(attendances::get).delete(attendances::delete),
        )
        .route(
            "/photos",
            get(photos::list).post(photos::create).put(photos::update),
        )
        .route("/photos/:id", get(photos::get).delete(photos::delete))
        .route(
            "/users",
            get(users::list).post(users::create).put(users::update),
        )
        .route("/users/password", put(users::change_password))
        .route("/users/:id", get(users::get).delete(users::delete))
        .route("/users/:id/events", get(users::events))
        .route(
            "/maintenance/nightly-cleanup",
            post(maintenance::nightly_cleanup),
        )
        .route(
            "/maintenance/status-update",
            post(maintenance::status_update),
        );

    let router = Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .with_state(state);

    apply_security_headers(router, config.include_hsts)
        .layer(create_cors_layer(&config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
}
