// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod client_route_tests;
mod room_route_tests;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use innkeep_api::HotelSettings;
use innkeep_persistence::Persistence;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceExt;

use crate::{AppState, build_router};

/// Helper to create test app state with in-memory persistence.
fn create_test_app_state() -> AppState {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        settings: HotelSettings::default(),
    }
}

fn create_test_app() -> Router {
    build_router(create_test_app_state())
}

/// Sends one request and decodes the JSON response body.
async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request: Request<Body> = match body {
        Some(payload) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&payload).unwrap()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn room_body(number: i64, room_type: &str, price: &str) -> Value {
    json!({
        "number": number,
        "room_type": room_type,
        "nightly_price": price,
    })
}

fn client_body(document_number: &str, rooms: &[i64]) -> Value {
    json!({
        "first_names": "Ana Lucia",
        "last_names": "Quispe Rojas",
        "document_type": "national_id",
        "document_number": document_number,
        "desired_rooms": rooms.len(),
        "payment_type": "cash",
        "amount_paid": "240.00",
        "age": 34,
        "phone": "987654321",
        "check_in": "2026-03-10T14:00:00Z",
        "planned_checkout": "2026-03-12T12:00:00Z",
        "rooms": rooms,
    })
}

/// Creates rooms 101, 102 and 201 and returns their ids.
async fn seed_rooms(app: &Router) -> Vec<i64> {
    let mut ids: Vec<i64> = Vec::new();
    for (number, room_type, price) in [
        (101, "simple", "80.00"),
        (102, "double", "120.00"),
        (201, "family", "250.00"),
    ] {
        let (status, body) = send(
            app,
            "POST",
            "/rooms",
            Some(room_body(number, room_type, price)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        ids.push(body["room_id"].as_i64().unwrap());
    }
    ids
}

async fn register(app: &Router, document_number: &str, rooms: &[i64]) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/clients",
        Some(client_body(document_number, rooms)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {body}");
    body["client"]["client_id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_health() {
    let app: Router = create_test_app();

    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app: Router = create_test_app();
    let request: Request<Body> = Request::builder()
        .method("POST")
        .uri("/rooms")
        .header("content-type", "application/json")
        .body(Body::from("{\"number\": "))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
