// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CRUD routes for users.

use crate::error::{AppError, Result};
use crate::models::{RecordId, User};
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
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}

/// Caller-supplied user fields.
///
/// Server-assigned fields (`id`, `created_at`) are rejected as unknown keys.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UserPayload {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    pub team_id: Option<String>,
}

async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>> {
    Ok(Json(state.db.list_users().await?))
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<User>> {
    let id = RecordId::from(id);
    let user = state
        .db
        .get_user(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;
    Ok(Json(user))
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UserPayload>,
) -> Result<(StatusCode, Json<User>)> {
    payload.validate()?;
    ensure_email_free(&state, &payload.email, None).await?;

    let user = User {
        id: RecordId::generate(),
        name: payload.name,
        email: payload.email,
        team_id: payload.team_id.map(RecordId::from),
        created_at: now_rfc3339(),
    };
    state.db.set_user(&user).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UserPayload>,
) -> Result<Json<User>> {
    payload.validate()?;

    let id = RecordId::from(id);
    let existing = state
        .db
        .get_user(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;
    ensure_email_free(&state, &payload.email, Some(&existing.id)).await?;

    // Full-record replace; only `created_at` survives from the stored record.
    let user = User {
        id: existing.id,
        name: payload.name,
        email: payload.email,
        team_id: payload.team_id.map(RecordId::from),
        created_at: existing.created_at,
    };
    state.db.set_user(&user).await?;

    Ok(Json(user))
}

async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = RecordId::from(id);
    if state.db.get_user(&id).await?.is_none() {
        return Err(AppError::NotFound(format!("User {} not found", id)));
    }
    state.db.delete_user(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Reject an email already used by a different user.
///
/// Check-then-write: the check is not atomic with the subsequent write,
/// matching the single-document write model of the store.
async fn ensure_email_free(
    state: &AppState,
    email: &str,
    allow: Option<&RecordId>,
) -> Result<()> {
    if let Some(existing) = state.db.find_user_by_email(email).await? {
        if allow != Some(&existing.id) {
            return Err(AppError::Conflict(format!(
                "Email {} is already in use",
                email
            )));
        }
    }
    Ok(())
}
