// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Opaque record identity.

use rand::{distributions::Alphanumeric, thread_rng, Rng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of generated document ids, matching the shape of Firestore auto-ids.
const DOCUMENT_ID_LEN: usize = 20;

/// Opaque identity of a stored record.
///
/// Wraps the Firestore document id. Internal logic compares `RecordId`s
/// directly; the raw string form only appears at the serialization boundary
/// and when addressing documents in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Generate a fresh alphanumeric document id.
    pub fn generate() -> Self {
        let id: String = thread_rng()
            .sample_iter(&Alphanumeric)
            .take(DOCUMENT_ID_LEN)
            .map(char::from)
            .collect();
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RecordId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for RecordId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique_and_sized() {
        let a = RecordId::generate();
        let b = RecordId::generate();

        assert_eq!(a.as_str().len(), DOCUMENT_ID_LEN);
        assert!(a.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_string_round_trip() {
        let id = RecordId::from("abc123");
        assert_eq!(id.to_string(), "abc123");
        assert_eq!(RecordId::from(id.to_string()), id);
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = RecordId::from("doc-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"doc-1\"");

        let parsed: RecordId = serde_json::from_str("\"doc-1\"").unwrap();
        assert_eq!(parsed, id);
    }
}
