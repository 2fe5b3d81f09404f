// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard entry model for storage and API.

use crate::models::RecordId;
use serde::{Deserialize, Serialize};

/// One user's position on the leaderboard.
///
/// This is a snapshot: entries are materialized by the seed pipeline
/// (aggregate activity totals, then rank) and are not recomputed when
/// activities are written afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Record id (also used as document ID)
    pub id: RecordId,
    /// Ranked user (soft reference)
    pub user_id: RecordId,
    /// The user's team at the time the snapshot was taken
    pub team_id: RecordId,
    /// Sum of calories across the user's activities
    pub total_calories: i64,
    /// Number of the user's activities
    pub total_activities: i64,
    /// Dense rank, 1 = highest total calories
    pub rank: u32,
    /// When the snapshot was taken (RFC 3339)
    pub updated_at: String,
}
