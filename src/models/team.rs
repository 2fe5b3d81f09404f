// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Team model for storage and API.

use crate::models::RecordId;
use serde::{Deserialize, Serialize};

/// Team stored in Firestore.
///
/// Membership lives on the user side (`User::team_id`); a team document
/// carries no member list. Deleting a team leaves any referencing users
/// untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Record id (also used as document ID)
    pub id: RecordId,
    /// Team name (not unique)
    pub name: String,
    /// Free-form description, may be empty
    pub description: String,
    /// When the record was created (RFC 3339)
    pub created_at: String,
}
