// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CRUD routes for activities.

use crate::error::{AppError, Result};
use crate::models::{Activity, RecordId};
use crate::time_utils::{format_utc_rfc3339, now_rfc3339};
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
        .route("/api/activities", get(list_activities).post(create_activity))
        .route(
            "/api/activities/{id}",
            get(get_activity).put(update_activity).delete(delete_activity),
        )
}

/// Caller-supplied activity fields.
///
/// Server-assigned fields (`id`, `created_at`) are rejected as unknown keys.
/// `calories` is taken as reported, never derived from the duration. Writing
/// an activity never touches the leaderboard; that snapshot only moves when
/// the seed pipeline runs.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ActivityPayload {
    #[validate(length(min = 1, message = "user_id must not be empty"))]
    pub user_id: String,
    #[validate(length(min = 1, message = "activity_type must not be empty"))]
    pub activity_type: String,
    #[validate(range(min = 0, message = "duration must not be negative"))]
    pub duration: i64,
    #[validate(range(min = 0, message = "calories must not be negative"))]
    pub calories: i64,
    pub date: String,
}

/// Parse and normalize the caller-supplied activity date.
fn parse_date(raw: &str) -> Result<String> {
    let parsed = chrono::DateTime::parse_from_rfc3339(raw).map_err(|_| {
        AppError::Validation("Invalid 'date': must be an RFC3339 datetime".to_string())
    })?;
    Ok(format_utc_rfc3339(parsed.with_timezone(&chrono::Utc)))
}

async fn list_activities(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Activity>>> {
    Ok(Json(state.db.list_activities().await?))
}

async fn get_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Activity>> {
    let id = RecordId::from(id);
    let activity = state
        .db
        .get_activity(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Activity {} not found", id)))?;
    Ok(Json(activity))
}

async fn create_activity(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ActivityPayload>,
) -> Result<(StatusCode, Json<Activity>)> {
    payload.validate()?;
    let date = parse_date(&payload.date)?;

    let activity = Activity {
        id: RecordId::generate(),
        user_id: RecordId::from(payload.user_id),
        activity_type: payload.activity_type,
        duration: payload.duration,
        calories: payload.calories,
        date,
        created_at: now_rfc3339(),
    };
    state.db.set_activity(&activity).await?;

    Ok((StatusCode::CREATED, Json(activity)))
}

async fn update_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<ActivityPayload>,
) -> Result<Json<Activity>> {
    payload.validate()?;
    let date = parse_date(&payload.date)?;

    let id = RecordId::from(id);
    let existing = state
        .db
        .get_activity(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Activity {} not found", id)))?;

    let activity = Activity {
        id: existing.id,
        user_id: RecordId::from(payload.user_id),
        activity_type: payload.activity_type,
        duration: payload.duration,
        calories: payload.calories,
        date,
        created_at: existing.created_at,
    };
    state.db.set_activity(&activity).await?;

    Ok(Json(activity))
}

async fn delete_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = RecordId::from(id);
    if state.db.get_activity(&id).await?.is_none() {
        return Err(AppError::NotFound(format!("Activity {} not found", id)));
    }
    state.db.delete_activity(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_normalizes_to_utc() {
        let normalized = parse_date("2026-01-15T10:00:00+02:00").unwrap();
        assert_eq!(normalized, "2026-01-15T08:00:00Z");
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        let err = parse_date("yesterday").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
