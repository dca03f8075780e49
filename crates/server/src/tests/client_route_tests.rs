// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{Router, http::StatusCode};
use serde_json::json;

use super::{client_body, create_test_app, register, seed_rooms, send};

#[tokio::test]
async fn test_register_client_with_rooms() {
    let app: Router = create_test_app();
    let ids: Vec<i64> = seed_rooms(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/clients",
        Some(client_body("45871236", &[ids[0], ids[1]])),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["client"]["full_name"], "Ana Lucia Quispe Rojas");
    assert_eq!(body["client"]["is_active"], true);
    assert_eq!(body["active_rooms"].as_array().unwrap().len(), 2);
    let (_, room) = send(&app, "GET", &format!("/rooms/{}", ids[0]), None).await;
    assert_eq!(room["state"], "occupied");
}

#[tokio::test]
async fn test_register_rejects_active_document() {
    let app: Router = create_test_app();
    let ids: Vec<i64> = seed_rooms(&app).await;
    register(&app, "45871236", &[ids[0]]).await;

    let (status, body) = send(
        &app,
        "POST",
        "/clients",
        Some(client_body("45871236", &[ids[1]])),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "document_number");
}

#[tokio::test]
async fn test_register_rejects_occupied_room() {
    let app: Router = create_test_app();
    let ids: Vec<i64> = seed_rooms(&app).await;
    register(&app, "45871236", &[ids[0]]).await;

    let (status, body) = send(
        &app,
        "POST",
        "/clients",
        Some(client_body("70011223", &[ids[0]])),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "rooms");
}

#[tokio::test]
async fn test_full_stay_cycle() {
    let app: Router = create_test_app();
    let ids: Vec<i64> = seed_rooms(&app).await;
    let first: i64 = register(&app, "45871236", &[ids[0]]).await;

    let (release_status, release) =
        send(&app, "POST", &format!("/clients/{first}/release"), None).await;
    send(&app, "POST", &format!("/rooms/{}/clean", ids[0]), None).await;
    let second: i64 = register(&app, "70011223", &[ids[0]]).await;
    let (_, history) = send(&app, "GET", &format!("/clients/{first}/rooms"), None).await;

    assert_eq!(release_status, StatusCode::OK);
    assert_eq!(release["released"][0]["state"], "dirty");
    assert!(release["warning"].is_null());
    assert_ne!(first, second);
    assert_eq!(history["count"], 1);
    assert_eq!(history["entries"][0]["state"], "released");
}

#[tokio::test]
async fn test_release_twice_warns() {
    let app: Router = create_test_app();
    let ids: Vec<i64> = seed_rooms(&app).await;
    let client_id: i64 = register(&app, "45871236", &[ids[0]]).await;
    let uri: String = format!("/clients/{client_id}/release");
    send(&app, "POST", &uri, None).await;

    let (status, body) = send(&app, "POST", &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["warning"].is_string());
    assert!(body["released"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_patch_and_get_client() {
    let app: Router = create_test_app();
    let ids: Vec<i64> = seed_rooms(&app).await;
    let client_id: i64 = register(&app, "45871236", &[ids[0]]).await;

    let (status, patched) = send(
        &app,
        "PATCH",
        &format!("/clients/{client_id}"),
        Some(json!({ "payment_type": "card", "age": 35 })),
    )
    .await;
    let (_, detail) = send(&app, "GET", &format!("/clients/{client_id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["payment_type"], "card");
    assert_eq!(detail["client"]["age"], 35);
    assert_eq!(detail["active_rooms"][0]["room_number"], 101);
}

#[tokio::test]
async fn test_add_rooms_route() {
    let app: Router = create_test_app();
    let ids: Vec<i64> = seed_rooms(&app).await;
    let client_id: i64 = register(&app, "45871236", &[ids[0]]).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/clients/{client_id}/rooms"),
        Some(json!({ "rooms": [ids[2]] })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["client"]["active_rooms"], 2);
}

#[tokio::test]
async fn test_delete_client_releases_rooms() {
    let app: Router = create_test_app();
    let ids: Vec<i64> = seed_rooms(&app).await;
    let client_id: i64 = register(&app, "45871236", &[ids[0]]).await;

    let (status, body) = send(&app, "DELETE", &format!("/clients/{client_id}"), None).await;
    let (gone, _) = send(&app, "GET", &format!("/clients/{client_id}"), None).await;
    let (_, room) = send(&app, "GET", &format!("/rooms/{}", ids[0]), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["freed"].as_array().unwrap().len(), 1);
    assert_eq!(gone, StatusCode::NOT_FOUND);
    assert_eq!(room["state"], "dirty");
}

#[tokio::test]
async fn test_client_listings() {
    let app: Router = create_test_app();
    let ids: Vec<i64> = seed_rooms(&app).await;
    let leaving: i64 = register(&app, "45871236", &[ids[0]]).await;
    register(&app, "70011223", &[ids[1]]).await;
    send(&app, "POST", &format!("/clients/{leaving}/release"), None).await;

    let (_, all) = send(&app, "GET", "/clients", None).await;
    let (_, active) = send(&app, "GET", "/clients/active", None).await;
    let (_, history) = send(&app, "GET", "/clients/history", None).await;
    let (_, searched) = send(&app, "GET", "/clients?search=7001", None).await;
    let (_, stats) = send(&app, "GET", "/clients/statistics", None).await;

    assert_eq!(all["count"], 2);
    assert_eq!(active["count"], 1);
    assert_eq!(history["inactive"]["count"], 1);
    assert_eq!(searched["clients"][0]["document_number"], "70011223");
    assert_eq!(stats["total_clients"], 2);
}

#[tokio::test]
async fn test_clients_by_date() {
    let app: Router = create_test_app();
    let ids: Vec<i64> = seed_rooms(&app).await;
    register(&app, "45871236", &[ids[0]]).await;

    let (on_status, on_date) = send(&app, "GET", "/clients/on_date?date=2026-03-11", None).await;
    let (_, before) = send(&app, "GET", "/clients/on_date?date=2026-03-01", None).await;
    let (range_status, in_range) = send(
        &app,
        "GET",
        "/clients/in_range?start_date=2026-03-01&end_date=2026-03-31",
        None,
    )
    .await;
    let (bad_status, bad) = send(&app, "GET", "/clients/on_date?date=yesterday", None).await;

    assert_eq!(on_status, StatusCode::OK);
    assert_eq!(on_date["count"], 1);
    assert_eq!(before["count"], 0);
    assert_eq!(range_status, StatusCode::OK);
    assert_eq!(in_range["count"], 1);
    assert_eq!(bad_status, StatusCode::BAD_REQUEST);
    assert_eq!(bad["errors"][0]["field"], "date");
}

#[tokio::test]
async fn test_check_document_route() {
    let app: Router = create_test_app();
    let ids: Vec<i64> = seed_rooms(&app).await;
    register(&app, "45871236", &[ids[0]]).await;

    let (status, body) = send(
        &app,
        "POST",
        "/clients/check_document",
        Some(json!({ "document_type": "national_id", "document_number": "45871236" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available"], false);
    assert_eq!(body["reason"], "active_client");
}
