//! User model for storage and API.

use crate::models::RecordId;
use serde::{Deserialize, Serialize};

/// User profile stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Record id (also used as document ID)
    pub id: RecordId,
    /// Display name
    pub name: String,
    /// Email address, globally unique across users
    pub email: String,
    /// Team the user belongs to, if any (soft reference, never enforced)
    pub team_id: Option<RecordId>,
    /// When the record was created (RFC 3339)
    pub created_at: String,
}
