// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Seed pipeline integration tests.
//!
//! These tests require the Firestore emulator (FIRESTORE_EMULATOR_HOST set).
//! The pipeline wipes all collections, so everything is asserted inside a
//! single test rather than racing parallel seed runs.

use octofit_tracker::services::seed::populate_database;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

mod common;

#[tokio::test]
async fn test_populate_twice_leaves_one_clean_dataset() {
    require_emulator!();
    let db = common::test_db().await;

    let mut rng = StdRng::seed_from_u64(1);
    let first = populate_database(&db, &mut rng)
        .await
        .expect("first seed run should succeed");

    assert_eq!(first.teams, 2);
    assert_eq!(first.users, 12);
    assert_eq!(first.leaderboard_entries, 12);
    assert_eq!(first.workouts, 6);
    // 12 users × [5, 10] activities each.
    assert!(first.activities >= 60 && first.activities <= 120);

    // Second run clears the first; nothing accumulates.
    let mut rng = StdRng::seed_from_u64(2);
    let second = populate_database(&db, &mut rng)
        .await
        .expect("second seed run should succeed");

    assert_eq!(second.teams, 2);
    assert_eq!(second.users, 12);
    assert_eq!(second.leaderboard_entries, 12);
    assert_eq!(second.workouts, 6);
    assert!(second.activities >= 60 && second.activities <= 120);

    // The leaderboard snapshot is a dense ranking of all 12 users.
    let entries = db.list_leaderboard().await.unwrap();
    assert_eq!(entries.len(), 12);

    let ranks: HashSet<u32> = entries.iter().map(|e| e.rank).collect();
    assert_eq!(ranks, (1..=12).collect::<HashSet<u32>>());

    let users: HashSet<_> = entries.iter().map(|e| e.user_id.clone()).collect();
    assert_eq!(users.len(), 12, "one entry per user");

    // Rank order must agree with total calories.
    let mut by_rank = entries.clone();
    by_rank.sort_by_key(|e| e.rank);
    for pair in by_rank.windows(2) {
        assert!(
            pair[0].total_calories >= pair[1].total_calories,
            "rank {} has fewer calories than rank {}",
            pair[0].rank,
            pair[1].rank
        );
    }

    // Every entry matches the activities actually in the store.
    let activities = db.list_activities().await.unwrap();
    for entry in &entries {
        let expected =
            octofit_tracker::services::stats::activity_totals(&entry.user_id, &activities);
        assert_eq!(entry.total_calories, expected.total_calories);
        assert_eq!(entry.total_activities, expected.total_activities);
    }

    // Seeded users keep their 6/6 team split.
    let teams = db.list_teams().await.unwrap();
    assert_eq!(teams.len(), 2);
    for team in &teams {
        let members = db.list_users_in_team(&team.id).await.unwrap();
        assert_eq!(members.len(), 6, "team {} should have 6 members", team.name);
    }
}
