// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for the five record collections:
//! users, teams, activities, leaderboard and workouts. Each record stores
//! its id as a document field equal to the document id, so reads round-trip
//! without touching document metadata.

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Activity, LeaderboardEntry, RecordId, Team, User, Workout};
use futures_util::{stream, StreamExt};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

const MAX_CONCURRENT_DB_OPS: usize = 50;
// Firestore limits batch/transaction writes to 500 operations.
// We use a safe limit of 400 to allow headroom.
const BATCH_SIZE: usize = 400;

/// Minimal projection of a stored record. Every document in every collection
/// carries its own id as a field, so this deserializes from any of them.
#[derive(Deserialize)]
struct DocId {
    id: RecordId,
}

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // Use ExternalJwtFunctionSource to provide a dummy token without needing async-trait
        // or a custom TokenSource implementation struct.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── Generic Document Operations ─────────────────────────────

    async fn get_doc<T>(&self, collection: &'static str, id: &RecordId) -> Result<Option<T>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collection)
            .obj()
            .one(id.as_str())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn list_docs<T>(&self, collection: &'static str) -> Result<Vec<T>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        self.get_client()?
            .fluent()
            .select()
            .from(collection)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn set_doc<T>(&self, collection: &'static str, id: &RecordId, object: &T) -> Result<(), AppError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collection)
            .document_id(id.as_str())
            .object(object)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn delete_doc(&self, collection: &'static str, id: &RecordId) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collection)
            .document_id(id.as_str())
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Query a collection for documents whose `field` equals `value`.
    async fn query_by_field<T>(
        &self,
        collection: &'static str,
        field: &'static str,
        value: String,
    ) -> Result<Vec<T>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        self.get_client()?
            .fluent()
            .select()
            .from(collection)
            .filter(move |q| q.for_all([q.field(field).eq(value.clone())]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.list_docs(collections::USERS).await
    }

    pub async fn get_user(&self, id: &RecordId) -> Result<Option<User>, AppError> {
        self.get_doc(collections::USERS, id).await
    }

    /// Create or replace a user document.
    pub async fn set_user(&self, user: &User) -> Result<(), AppError> {
        self.set_doc(collections::USERS, &user.id, user).await
    }

    pub async fn delete_user(&self, id: &RecordId) -> Result<(), AppError> {
        self.delete_doc(collections::USERS, id).await
    }

    /// Look up a user by exact email.
    ///
    /// Emails are unique, so at most one document matches; if duplicates were
    /// ever written out-of-band, an arbitrary one is returned.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let matches: Vec<User> = self
            .query_by_field(collections::USERS, "email", email.to_string())
            .await?;
        Ok(matches.into_iter().next())
    }

    /// All users whose `team_id` equals the given team.
    pub async fn list_users_in_team(&self, team_id: &RecordId) -> Result<Vec<User>, AppError> {
        self.query_by_field(collections::USERS, "team_id", team_id.to_string())
            .await
    }

    // ─── Team Operations ─────────────────────────────────────────

    pub async fn list_teams(&self) -> Result<Vec<Team>, AppError> {
        self.list_docs(collections::TEAMS).await
    }

    pub async fn get_team(&self, id: &RecordId) -> Result<Option<Team>, AppError> {
        self.get_doc(collections::TEAMS, id).await
    }

    /// Create or replace a team document.
    pub async fn set_team(&self, team: &Team) -> Result<(), AppError> {
        self.set_doc(collections::TEAMS, &team.id, team).await
    }

    pub async fn delete_team(&self, id: &RecordId) -> Result<(), AppError> {
        self.delete_doc(collections::TEAMS, id).await
    }

    // ─── Activity Operations ─────────────────────────────────────

    pub async fn list_activities(&self) -> Result<Vec<Activity>, AppError> {
        self.list_docs(collections::ACTIVITIES).await
    }

    pub async fn get_activity(&self, id: &RecordId) -> Result<Option<Activity>, AppError> {
        self.get_doc(collections::ACTIVITIES, id).await
    }

    /// Create or replace an activity document.
    pub async fn set_activity(&self, activity: &Activity) -> Result<(), AppError> {
        self.set_doc(collections::ACTIVITIES, &activity.id, activity)
            .await
    }

    /// Store multiple activity documents.
    ///
    /// Uses concurrent writes with a limit to avoid overloading Firestore.
    pub async fn set_activities(&self, activities: &[Activity]) -> Result<(), AppError> {
        let client = self.get_client()?;

        stream::iter(activities.to_vec())
            .map(|activity| async move {
                let _: () = client
                    .fluent()
                    .update()
                    .in_col(collections::ACTIVITIES)
                    .document_id(activity.id.as_str())
                    .object(&activity)
                    .execute()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;

                Ok::<_, AppError>(())
            })
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<(), AppError>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<()>, AppError>>()?;

        Ok(())
    }

    pub async fn delete_activity(&self, id: &RecordId) -> Result<(), AppError> {
        self.delete_doc(collections::ACTIVITIES, id).await
    }

    /// All activities belonging to the given user.
    pub async fn list_activities_for_user(
        &self,
        user_id: &RecordId,
    ) -> Result<Vec<Activity>, AppError> {
        self.query_by_field(collections::ACTIVITIES, "user_id", user_id.to_string())
            .await
    }

    // ─── Leaderboard Operations ──────────────────────────────────

    pub async fn list_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, AppError> {
        self.list_docs(collections::LEADERBOARD).await
    }

    pub async fn get_leaderboard_entry(
        &self,
        id: &RecordId,
    ) -> Result<Option<LeaderboardEntry>, AppError> {
        self.get_doc(collections::LEADERBOARD, id).await
    }

    /// Create or replace a leaderboard entry document.
    pub async fn set_leaderboard_entry(&self, entry: &LeaderboardEntry) -> Result<(), AppError> {
        self.set_doc(collections::LEADERBOARD, &entry.id, entry).await
    }

    pub async fn delete_leaderboard_entry(&self, id: &RecordId) -> Result<(), AppError> {
        self.delete_doc(collections::LEADERBOARD, id).await
    }

    // ─── Workout Operations ──────────────────────────────────────

    pub async fn list_workouts(&self) -> Result<Vec<Workout>, AppError> {
        self.list_docs(collections::WORKOUTS).await
    }

    pub async fn get_workout(&self, id: &RecordId) -> Result<Option<Workout>, AppError> {
        self.get_doc(collections::WORKOUTS, id).await
    }

    /// Create or replace a workout document.
    pub async fn set_workout(&self, workout: &Workout) -> Result<(), AppError> {
        self.set_doc(collections::WORKOUTS, &workout.id, workout).await
    }

    pub async fn delete_workout(&self, id: &RecordId) -> Result<(), AppError> {
        self.delete_doc(collections::WORKOUTS, id).await
    }

    // ─── Maintenance Operations ──────────────────────────────────

    /// Delete every document in a collection.
    ///
    /// Used by the seed pipeline's reset step. Deletions are batched into
    /// transactions of at most [`BATCH_SIZE`] writes; the listing and the
    /// deletes are not atomic with respect to concurrent writers.
    ///
    /// Returns the number of documents deleted.
    pub async fn delete_all(&self, collection: &'static str) -> Result<usize, AppError> {
        let docs: Vec<DocId> = self.list_docs(collection).await?;
        let client = self.get_client()?;

        for chunk in docs.chunks(BATCH_SIZE) {
            let mut transaction = client
                .begin_transaction()
                .await
                .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

            for doc in chunk {
                client
                    .fluent()
                    .delete()
                    .from(collection)
                    .document_id(doc.id.as_str())
                    .add_to_transaction(&mut transaction)
                    .map_err(|e| {
                        AppError::Database(format!(
                            "Failed to add deletion to transaction for {}: {}",
                            collection, e
                        ))
                    })?;
            }

            transaction.commit().await.map_err(|e| {
                AppError::Database(format!("Failed to commit batch deletion: {}", e))
            })?;
        }

        tracing::debug!(collection, count = docs.len(), "Cleared collection");

        Ok(docs.len())
    }

    /// Count the documents in a collection.
    pub async fn count(&self, collection: &'static str) -> Result<usize, AppError> {
        let docs: Vec<DocId> = self.list_docs(collection).await?;
        Ok(docs.len())
    }
}
