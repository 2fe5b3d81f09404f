// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout model for storage and API.

use crate::models::RecordId;
use serde::{Deserialize, Serialize};

/// A suggested workout routine stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    /// Record id (also used as document ID)
    pub id: RecordId,
    /// Workout title
    pub title: String,
    /// Longer description
    pub description: String,
    /// Easy / Medium / Hard (free text, not an enum)
    pub difficulty: String,
    /// Expected duration in minutes
    pub duration: i64,
    /// Estimated calories burned
    pub calories_estimate: i64,
    /// Ordered exercise list. Elements have no fixed schema (objects with
    /// name + reps, duration or distance, or plain strings), so they are
    /// kept as raw JSON values.
    pub exercises: Vec<serde_json::Value>,
    /// When the record was created (RFC 3339)
    pub created_at: String,
}
