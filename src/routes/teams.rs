// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CRUD routes for teams.

use crate::error::{AppError, Result};
use crate::models::{RecordId, Team};
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/teams", get(list_teams).post(create_team))
        .route(
            "/api/teams/{id}",
            get(get_team).put(update_team).delete(delete_team),
        )
}

/// Caller-supplied team fields.
///
/// Server-assigned fields (`id`, `created_at`) are rejected as unknown keys.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct TeamPayload {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Team response with derived membership count.
#[derive(Serialize)]
pub struct TeamResponse {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub created_at: String,
    /// Number of users whose `team_id` references this team.
    /// Computed at serialization time, never stored.
    pub member_count: usize,
}

impl TeamResponse {
    fn from_team(team: Team, member_count: usize) -> Self {
        Self {
            id: team.id,
            name: team.name,
            description: team.description,
            created_at: team.created_at,
            member_count,
        }
    }
}

async fn list_teams(State(state): State<Arc<AppState>>) -> Result<Json<Vec<TeamResponse>>> {
    let teams = state.db.list_teams().await?;

    // One user scan shared across the whole response.
    let users = state.db.list_users().await?;
    let mut counts: HashMap<&RecordId, usize> = HashMap::new();
    for user in &users {
        if let Some(team_id) = &user.team_id {
            *counts.entry(team_id).or_insert(0) += 1;
        }
    }

    let responses = teams
        .into_iter()
        .map(|team| {
            let member_count = counts.get(&team.id).copied().unwrap_or(0);
            TeamResponse::from_team(team, member_count)
        })
        .collect();

    Ok(Json(responses))
}

async fn get_team(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TeamResponse>> {
    let id = RecordId::from(id);
    let team = state
        .db
        .get_team(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Team {} not found", id)))?;
    let member_count = state.db.list_users_in_team(&team.id).await?.len();

    Ok(Json(TeamResponse::from_team(team, member_count)))
}

async fn create_team(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TeamPayload>,
) -> Result<(StatusCode, Json<TeamResponse>)> {
    payload.validate()?;

    let team = Team {
        id: RecordId::generate(),
        name: payload.name,
        description: payload.description,
        created_at: now_rfc3339(),
    };
    state.db.set_team(&team).await?;

    // A freshly generated id cannot be referenced by any user yet.
    Ok((StatusCode::CREATED, Json(TeamResponse::from_team(team, 0))))
}

async fn update_team(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<TeamPayload>,
) -> Result<Json<TeamResponse>> {
    payload.validate()?;

    let id = RecordId::from(id);
    let existing = state
        .db
        .get_team(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Team {} not found", id)))?;

    let team = Team {
        id: existing.id,
        name: payload.name,
        description: payload.description,
        created_at: existing.created_at,
    };
    state.db.set_team(&team).await?;
    let member_count = state.db.list_users_in_team(&team.id).await?.len();

    Ok(Json(TeamResponse::from_team(team, member_count)))
}

async fn delete_team(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = RecordId::from(id);
    if state.db.get_team(&id).await?.is_none() {
        return Err(AppError::NotFound(format!("Team {} not found", id)));
    }

    // Users referencing this team keep their (now dangling) team_id.
    state.db.delete_team(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
