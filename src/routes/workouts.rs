// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CRUD routes for workouts.

use crate::error::{AppError, Result};
use crate::models::{RecordId, Workout};
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/workouts", get(list_workouts).post(create_workout))
        .route(
            "/api/workouts/{id}",
            get(get_workout).put(update_workout).delete(delete_workout),
        )
}

/// Caller-supplied workout fields.
///
/// Server-assigned fields (`id`, `created_at`) are rejected as unknown keys.
/// Exercise elements are accepted as arbitrary JSON; there is no per-element
/// schema to enforce.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct WorkoutPayload {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1, message = "difficulty must not be empty"))]
    pub difficulty: String,
    #[validate(range(min = 0, message = "duration must not be negative"))]
    pub duration: i64,
    #[validate(range(min = 0, message = "calories_estimate must not be negative"))]
    pub calories_estimate: i64,
    #[serde(default)]
    pub exercises: Vec<serde_json::Value>,
}

async fn list_workouts(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Workout>>> {
    Ok(Json(state.db.list_workouts().await?))
}

async fn get_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Workout>> {
    let id = RecordId::from(id);
    let workout = state
        .db
        .get_workout(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Workout {} not found", id)))?;
    Ok(Json(workout))
}

async fn create_workout(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<WorkoutPayload>,
) -> Result<(StatusCode, Json<Workout>)> {
    payload.validate()?;

    let workout = Workout {
        id: RecordId::generate(),
        title: payload.title,
        description: payload.description,
        difficulty: payload.difficulty,
        duration: payload.duration,
        calories_estimate: payload.calories_estimate,
        exercises: payload.exercises,
        created_at: now_rfc3339(),
    };
    state.db.set_workout(&workout).await?;

    Ok((StatusCode::CREATED, Json(workout)))
}

async fn update_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<WorkoutPayload>,
) -> Result<Json<Workout>> {
    payload.validate()?;

    let id = RecordId::from(id);
    let existing = state
        .db
        .get_workout(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Workout {} not found", id)))?;

    let workout = Workout {
        id: existing.id,
        title: payload.title,
        description: payload.description,
        difficulty: payload.difficulty,
        duration: payload.duration,
        calories_estimate: payload.calories_estimate,
        exercises: payload.exercises,
        created_at: existing.created_at,
    };
    state.db.set_workout(&workout).await?;

    Ok(Json(workout))
}

async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = RecordId::from(id);
    if state.db.get_workout(&id).await?.is_none() {
        return Err(AppError::NotFound(format!("Workout {} not found", id)));
    }
    state.db.delete_workout(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
