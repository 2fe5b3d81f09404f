// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CRUD routes for leaderboard entries.
//!
//! These endpoints expose the stored snapshot as-is. Totals and ranks are
//! whatever the seed pipeline (or a caller) last wrote; nothing here
//! recomputes them from activities.

use crate::error::{AppError, Result};
use crate::models::{LeaderboardEntry, RecordId};
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
        .route("/api/leaderboard", get(list_entries).post(create_entry))
        .route(
            "/api/leaderboard/{id}",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
}

/// Caller-supplied leaderboard fields.
///
/// Server-assigned fields (`id`, `updated_at`) are rejected as unknown keys.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LeaderboardPayload {
    #[validate(length(min = 1, message = "user_id must not be empty"))]
    pub user_id: String,
    #[validate(length(min = 1, message = "team_id must not be empty"))]
    pub team_id: String,
    #[validate(range(min = 0, message = "total_calories must not be negative"))]
    pub total_calories: i64,
    #[validate(range(min = 0, message = "total_activities must not be negative"))]
    pub total_activities: i64,
    #[validate(range(min = 1, message = "rank must be at least 1"))]
    pub rank: u32,
}

async fn list_entries(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LeaderboardEntry>>> {
    Ok(Json(state.db.list_leaderboard().await?))
}

async fn get_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<LeaderboardEntry>> {
    let id = RecordId::from(id);
    let entry = state
        .db
        .get_leaderboard_entry(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Leaderboard entry {} not found", id)))?;
    Ok(Json(entry))
}

async fn create_entry(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LeaderboardPayload>,
) -> Result<(StatusCode, Json<LeaderboardEntry>)> {
    payload.validate()?;

    let entry = LeaderboardEntry {
        id: RecordId::generate(),
        user_id: RecordId::from(payload.user_id),
        team_id: RecordId::from(payload.team_id),
        total_calories: payload.total_calories,
        total_activities: payload.total_activities,
        rank: payload.rank,
        updated_at: now_rfc3339(),
    };
    state.db.set_leaderboard_entry(&entry).await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

async fn update_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<LeaderboardPayload>,
) -> Result<Json<LeaderboardEntry>> {
    payload.validate()?;

    let id = RecordId::from(id);
    let existing = state
        .db
        .get_leaderboard_entry(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Leaderboard entry {} not found", id)))?;

    let entry = LeaderboardEntry {
        id: existing.id,
        user_id: RecordId::from(payload.user_id),
        team_id: RecordId::from(payload.team_id),
        total_calories: payload.total_calories,
        total_activities: payload.total_activities,
        rank: payload.rank,
        updated_at: now_rfc3339(),
    };
    state.db.set_leaderboard_entry(&entry).await?;

    Ok(Json(entry))
}

async fn delete_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = RecordId::from(id);
    if state.db.get_leaderboard_entry(&id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "Leaderboard entry {} not found",
            id
        )));
    }
    state.db.delete_leaderboard_entry(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
