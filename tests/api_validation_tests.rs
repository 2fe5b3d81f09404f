// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API input validation tests.
//!
//! These run against an offline mock database: every request here must be
//! rejected (or answered) before any store access happens.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;

mod common;

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_api_root_lists_collections() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(Request::builder().uri("/api").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    for key in ["users", "teams", "activities", "leaderboard", "workouts"] {
        assert!(body.get(key).is_some(), "missing api root key {}", key);
    }
}

#[tokio::test]
async fn test_create_user_rejects_invalid_email() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(post_json(
            "/api/users",
            serde_json::json!({"name": "Test User", "email": "not-an-email"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "validation_failed");
}

#[tokio::test]
async fn test_create_user_rejects_missing_name() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(post_json(
            "/api/users",
            serde_json::json!({"email": "someone@example.com"}),
        ))
        .await
        .unwrap();

    // Missing required field is a deserialization failure.
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_user_rejects_client_supplied_id() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(post_json(
            "/api/users",
            serde_json::json!({
                "id": "chosen-by-client",
                "name": "Test User",
                "email": "someone@example.com"
            }),
        ))
        .await
        .unwrap();

    // `id` is server-assigned and payloads deny unknown fields.
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_user_rejects_client_supplied_created_at() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(post_json(
            "/api/users",
            serde_json::json!({
                "name": "Test User",
                "email": "someone@example.com",
                "created_at": "2020-01-01T00:00:00Z"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_team_rejects_empty_name() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(post_json(
            "/api/teams",
            serde_json::json!({"name": "", "description": "empty name"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_activity_rejects_negative_duration() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(post_json(
            "/api/activities",
            serde_json::json!({
                "user_id": "user123",
                "activity_type": "Running",
                "duration": -5,
                "calories": 100,
                "date": "2026-01-15T10:00:00Z"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_activity_rejects_invalid_date() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(post_json(
            "/api/activities",
            serde_json::json!({
                "user_id": "user123",
                "activity_type": "Running",
                "duration": 30,
                "calories": 100,
                "date": "yesterday"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_leaderboard_rejects_rank_zero() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(post_json(
            "/api/leaderboard",
            serde_json::json!({
                "user_id": "user123",
                "team_id": "team123",
                "total_calories": 1000,
                "total_activities": 10,
                "rank": 0
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_workout_rejects_negative_calories() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(post_json(
            "/api/workouts",
            serde_json::json!({
                "title": "Morning Run",
                "description": "A refreshing morning run",
                "difficulty": "Medium",
                "duration": 30,
                "calories_estimate": -250
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
