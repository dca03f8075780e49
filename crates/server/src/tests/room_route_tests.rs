// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{Router, http::StatusCode};
use serde_json::{Value, json};

use super::{create_test_app, register, room_body, seed_rooms, send};

#[tokio::test]
async fn test_create_and_get_room() {
    let app: Router = create_test_app();

    let (status, created) = send(&app, "POST", "/rooms", Some(room_body(305, "triple", "180.50"))).await;
    let room_id: i64 = created["room_id"].as_i64().unwrap();
    let (get_status, fetched) = send(&app, "GET", &format!("/rooms/{room_id}"), None).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["state"], "available");
    assert_eq!(created["nightly_price"], "180.50");
    assert_eq!(get_status, StatusCode::OK);
    assert_eq!(fetched["number"], 305);
}

#[tokio::test]
async fn test_invalid_room_lists_field_errors() {
    let app: Router = create_test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/rooms",
        Some(json!({
            "number": 0,
            "room_type": "penthouse",
            "nightly_price": "-1",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["room_type", "number", "nightly_price"]);
}

#[tokio::test]
async fn test_missing_room_is_not_found() {
    let app: Router = create_test_app();

    let (status, body) = send(&app, "GET", "/rooms/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains("999"));
}

#[tokio::test]
async fn test_patch_room_rejects_state() {
    let app: Router = create_test_app();
    let ids: Vec<i64> = seed_rooms(&app).await;

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/rooms/{}", ids[0]),
        Some(json!({ "state": "maintenance" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "state");
}

#[tokio::test]
async fn test_patch_room_price() {
    let app: Router = create_test_app();
    let ids: Vec<i64> = seed_rooms(&app).await;

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/rooms/{}", ids[1]),
        Some(json!({ "nightly_price": "135.00", "description": "Twin beds" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nightly_price"], "135.00");
    assert_eq!(body["description"], "Twin beds");
    assert_eq!(body["number"], 102);
}

#[tokio::test]
async fn test_room_listings() {
    let app: Router = create_test_app();
    let ids: Vec<i64> = seed_rooms(&app).await;
    register(&app, "45871236", &[ids[0]]).await;

    let (_, filtered) = send(&app, "GET", "/rooms?room_type=double", None).await;
    let (_, available) = send(&app, "GET", "/rooms/available", None).await;
    let (_, by_type) = send(&app, "GET", "/rooms/by_type", None).await;
    let (_, stats) = send(&app, "GET", "/rooms/statistics", None).await;

    assert_eq!(filtered["count"], 1);
    assert_eq!(filtered["rooms"][0]["number"], 102);
    assert_eq!(available["count"], 2);
    assert_eq!(by_type["groups"].as_array().unwrap().len(), 3);
    assert_eq!(stats["total_rooms"], 3);
    assert_eq!(stats["by_state"]["occupied"], 1);
}

#[tokio::test]
async fn test_bad_list_filter_is_bad_request() {
    let app: Router = create_test_app();

    let (status, body) = send(&app, "GET", "/rooms?state=flooded", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "state");
}

#[tokio::test]
async fn test_check_number() {
    let app: Router = create_test_app();
    seed_rooms(&app).await;

    let (status, taken) = send(
        &app,
        "POST",
        "/rooms/check_number",
        Some(json!({ "number": 101 })),
    )
    .await;
    let (_, free) = send(
        &app,
        "POST",
        "/rooms/check_number",
        Some(json!({ "number": 404 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(taken["available"], false);
    assert_eq!(free["available"], true);
}

#[tokio::test]
async fn test_housekeeping_routes() {
    let app: Router = create_test_app();
    let ids: Vec<i64> = seed_rooms(&app).await;
    let client_id: i64 = register(&app, "45871236", &[ids[0]]).await;

    send(&app, "POST", &format!("/clients/{client_id}/release"), None).await;
    let (_, dirty) = send(&app, "GET", &format!("/rooms/{}", ids[0]), None).await;
    let (clean_status, cleaned) =
        send(&app, "POST", &format!("/rooms/{}/clean", ids[0]), None).await;
    let (again_status, _) = send(&app, "POST", &format!("/rooms/{}/clean", ids[0]), None).await;

    assert_eq!(dirty["state"], "dirty");
    assert_eq!(clean_status, StatusCode::OK);
    assert_eq!(cleaned["state"], "available");
    assert_eq!(again_status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_maintenance_routes() {
    let app: Router = create_test_app();
    let ids: Vec<i64> = seed_rooms(&app).await;
    let uri: String = format!("/rooms/{}/maintenance", ids[2]);

    let (_, down) = send(&app, "POST", &uri, None).await;
    let (_, up) = send(&app, "POST", &format!("{uri}/finish"), None).await;

    assert_eq!(down["state"], "maintenance");
    assert_eq!(up["state"], "available");
}

#[tokio::test]
async fn test_delete_room() {
    let app: Router = create_test_app();
    let ids: Vec<i64> = seed_rooms(&app).await;
    register(&app, "45871236", &[ids[0]]).await;

    let (held_status, held): (StatusCode, Value) =
        send(&app, "DELETE", &format!("/rooms/{}", ids[0]), None).await;
    let (free_status, _) = send(&app, "DELETE", &format!("/rooms/{}", ids[1]), None).await;
    let (gone_status, _) = send(&app, "GET", &format!("/rooms/{}", ids[1]), None).await;

    assert_eq!(held_status, StatusCode::BAD_REQUEST);
    assert_eq!(held["errors"][0]["field"], "room");
    assert_eq!(free_status, StatusCode::OK);
    assert_eq!(gone_status, StatusCode::NOT_FOUND);
}
