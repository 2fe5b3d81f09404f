// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity model for storage and API.

use crate::models::RecordId;
use serde::{Deserialize, Serialize};

/// A logged fitness activity stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    /// Record id (also used as document ID)
    pub id: RecordId,
    /// Owning user (soft reference, never enforced)
    pub user_id: RecordId,
    /// Activity category (Running, Cycling, ...)
    pub activity_type: String,
    /// Duration in minutes
    pub duration: i64,
    /// Calories burned, as reported by the caller (not derived)
    pub calories: i64,
    /// When the activity took place (RFC 3339)
    pub date: String,
    /// When the record was created (RFC 3339)
    pub created_at: String,
}
