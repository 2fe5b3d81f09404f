// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database seed/reset command.
//!
//! Wipes all five collections and repopulates them with the demo dataset.
//! Destructive by design and intended for development databases only; any
//! failure aborts the run with a non-zero exit and no rollback.
//!
//! Usage: `populate` (no arguments; honors FIRESTORE_EMULATOR_HOST and
//! GCP_PROJECT_ID like the API server).

use octofit_tracker::{config::Config, db::FirestoreDb, services::seed};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = Config::from_env()?;
    tracing::info!(project = %config.gcp_project_id, "Populating database");

    let db = FirestoreDb::new(&config.gcp_project_id).await?;

    let mut rng = rand::thread_rng();
    let summary = seed::populate_database(&db, &mut rng).await?;

    tracing::info!("Database population complete");
    tracing::info!(count = summary.teams, "Teams");
    tracing::info!(count = summary.users, "Users");
    tracing::info!(count = summary.activities, "Activities");
    tracing::info!(count = summary.leaderboard_entries, "Leaderboard entries");
    tracing::info!(count = summary.workouts, "Workouts");

    Ok(())
}

/// Compact console logging for the one-shot command.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer().compact().with_target(false);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("octofit_tracker=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
