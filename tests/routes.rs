mod common;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use cleanup_server::config::Config;
use cleanup_server::routes::create_routes;

use common::{event_request, setup};

fn app() -> Router {
    let (_, state) = setup();
    create_routes(state, &Config::default())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

#[tokio::test]
async fn test_health_sets_security_headers() {
    let response = app().oneshot(get("/health")).await.expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-content-type-options"),
        Some(&header::HeaderValue::from_static("nosniff"))
    );
    assert!(response.headers().get("strict-transport-security").is_none());
}

#[tokio::test]
async fn test_negative_id_is_bad_request() {
    let (status, body) = send(app(), get("/api/events/-1")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"]["code"], json!("BAD_REQUEST"));
    assert_eq!(
        body["error"]["message"],
        json!("Event id must be a positive number.")
    );
}

#[tokio::test]
async fn test_create_then_fetch_event() {
    let app = app();
    let request = serde_json::to_value(event_request("Beach Cleanup")).expect("json");

    let (status, created) = send(app.clone(), post_json("/api/events", request)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["success"], json!(true));
    let event_id = created["data"]["event_id"].as_i64().expect("id");

    let (status, fetched) = send(app, get(&format!("/api/events/{event_id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["title"], json!("Beach Cleanup"));
}

#[tokio::test]
async fn test_empty_list_is_ok() {
    let (status, body) = send(app(), get("/api/users")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_missing_photo_is_not_found() {
    let (status, body) = send(app(), get("/api/photos/8")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], json!("NOT_FOUND"));
}

#[tokio::test]
async fn test_maintenance_trigger() {
    let (status, body) = send(
        app(),
        Request::builder()
            .method("POST")
            .uri("/api/maintenance/status-update")
            .body(Body::empty())
            .expect("request"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["completed"], json!(true));
}
