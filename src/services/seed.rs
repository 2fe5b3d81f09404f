// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database seeding pipeline.
//!
//! Resets all five collections and repopulates them with the demo dataset:
//! two teams, twelve superhero users split across them, a random batch of
//! activities per user, a leaderboard snapshot derived from those activities,
//! and a fixed workout catalog.
//!
//! The run is destructive and not transactional: a failure part-way through
//! aborts the run and leaves the store partially populated. Callers that need
//! a clean state simply run it again.
//!
//! The random source is injected so tests can seed generation deterministically.

use crate::db::{collections, FirestoreDb};
use crate::error::{AppError, Result};
use crate::models::{Activity, LeaderboardEntry, RecordId, Team, User, Workout};
use crate::services::stats;
use crate::time_utils::format_utc_rfc3339;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde_json::json;
use std::collections::HashMap;

const MIN_ACTIVITIES_PER_USER: usize = 5;
const MAX_ACTIVITIES_PER_USER: usize = 10;
const MIN_DURATION_MINUTES: i64 = 20;
const MAX_DURATION_MINUTES: i64 = 90;
const MAX_DATE_OFFSET_DAYS: i64 = 30;

/// An activity category with its calorie burn rate.
struct ActivityKind {
    activity_type: &'static str,
    calories_per_minute: i64,
}

const ACTIVITY_KINDS: [ActivityKind; 6] = [
    ActivityKind { activity_type: "Running", calories_per_minute: 10 },
    ActivityKind { activity_type: "Weightlifting", calories_per_minute: 7 },
    ActivityKind { activity_type: "Cycling", calories_per_minute: 8 },
    ActivityKind { activity_type: "Swimming", calories_per_minute: 11 },
    ActivityKind { activity_type: "Boxing", calories_per_minute: 12 },
    ActivityKind { activity_type: "Yoga", calories_per_minute: 4 },
];

const MARVEL_ROSTER: [(&str, &str); 6] = [
    ("Iron Man", "tony.stark@marvel.com"),
    ("Captain America", "steve.rogers@marvel.com"),
    ("Thor", "thor.odinson@marvel.com"),
    ("Black Widow", "natasha.romanoff@marvel.com"),
    ("Hulk", "bruce.banner@marvel.com"),
    ("Spider-Man", "peter.parker@marvel.com"),
];

const DC_ROSTER: [(&str, &str); 6] = [
    ("Superman", "clark.kent@dc.com"),
    ("Batman", "bruce.wayne@dc.com"),
    ("Wonder Woman", "diana.prince@dc.com"),
    ("The Flash", "barry.allen@dc.com"),
    ("Aquaman", "arthur.curry@dc.com"),
    ("Green Lantern", "hal.jordan@dc.com"),
];

/// Per-collection record counts after a seed run.
#[derive(Debug, Clone, Copy)]
pub struct SeedSummary {
    pub teams: usize,
    pub users: usize,
    pub activities: usize,
    pub leaderboard_entries: usize,
    pub workouts: usize,
}

/// Reset the store and populate it with the demo dataset.
///
/// Steps run in order: clear, teams, users, activities, leaderboard, workouts.
/// Any error aborts the remaining steps.
pub async fn populate_database<R: Rng>(db: &FirestoreDb, rng: &mut R) -> Result<SeedSummary> {
    let now = Utc::now();
    let now_str = format_utc_rfc3339(now);

    tracing::info!("Clearing existing data");
    for collection in collections::ALL {
        let removed = db.delete_all(collection).await?;
        tracing::debug!(collection, removed, "Collection cleared");
    }

    tracing::info!("Creating teams");
    let team_marvel = create_team(db, "Team Marvel", "Earth's Mightiest Heroes", &now_str).await?;
    let team_dc = create_team(db, "Team DC", "Justice League Champions", &now_str).await?;
    tracing::info!(first = %team_marvel.name, second = %team_dc.name, "Created teams");

    tracing::info!("Creating users");
    // Team-grouped enumeration order: the whole Marvel roster first, then DC.
    // Leaderboard ties between equal-calorie users resolve in this order.
    let mut users = Vec::with_capacity(MARVEL_ROSTER.len() + DC_ROSTER.len());
    for (name, email) in MARVEL_ROSTER {
        users.push(create_user(db, name, email, &team_marvel.id, &now_str).await?);
    }
    for (name, email) in DC_ROSTER {
        users.push(create_user(db, name, email, &team_dc.id, &now_str).await?);
    }
    tracing::info!(count = users.len(), "Created users");

    tracing::info!("Creating activities");
    let mut activities = Vec::new();
    for user in &users {
        activities.extend(random_activities(rng, &user.id, now));
    }
    db.set_activities(&activities).await?;
    tracing::info!(count = activities.len(), "Created activities");

    tracing::info!("Creating leaderboard entries");
    let totals_by_user: HashMap<RecordId, stats::ActivityTotals> = users
        .iter()
        .map(|user| (user.id.clone(), stats::activity_totals(&user.id, &activities)))
        .collect();

    let ranked = stats::assign_ranks(
        users
            .iter()
            .map(|user| {
                let totals = totals_by_user.get(&user.id).copied().unwrap_or_default();
                (user.id.clone(), totals.total_calories)
            })
            .collect(),
    );

    let user_by_id: HashMap<&RecordId, &User> =
        users.iter().map(|user| (&user.id, user)).collect();

    for ranked_user in &ranked {
        let user = user_by_id.get(&ranked_user.user_id).ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "Ranked unknown user {}",
                ranked_user.user_id
            ))
        })?;
        let team_id = user.team_id.clone().ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("Seeded user {} has no team", user.id))
        })?;
        let totals = totals_by_user
            .get(&ranked_user.user_id)
            .copied()
            .unwrap_or_default();

        let entry = LeaderboardEntry {
            id: RecordId::generate(),
            user_id: ranked_user.user_id.clone(),
            team_id,
            total_calories: totals.total_calories,
            total_activities: totals.total_activities,
            rank: ranked_user.rank,
            updated_at: now_str.clone(),
        };
        db.set_leaderboard_entry(&entry).await?;
    }
    tracing::info!(count = ranked.len(), "Created leaderboard entries");

    tracing::info!("Creating workouts");
    let workouts = workout_catalog(&now_str);
    for workout in &workouts {
        db.set_workout(workout).await?;
    }
    tracing::info!(count = workouts.len(), "Created workouts");

    Ok(SeedSummary {
        teams: db.count(collections::TEAMS).await?,
        users: db.count(collections::USERS).await?,
        activities: db.count(collections::ACTIVITIES).await?,
        leaderboard_entries: db.count(collections::LEADERBOARD).await?,
        workouts: db.count(collections::WORKOUTS).await?,
    })
}

async fn create_team(
    db: &FirestoreDb,
    name: &str,
    description: &str,
    now: &str,
) -> Result<Team> {
    let team = Team {
        id: RecordId::generate(),
        name: name.to_string(),
        description: description.to_string(),
        created_at: now.to_string(),
    };
    db.set_team(&team).await?;
    Ok(team)
}

async fn create_user(
    db: &FirestoreDb,
    name: &str,
    email: &str,
    team_id: &RecordId,
    now: &str,
) -> Result<User> {
    let user = User {
        id: RecordId::generate(),
        name: name.to_string(),
        email: email.to_string(),
        team_id: Some(team_id.clone()),
        created_at: now.to_string(),
    };
    db.set_user(&user).await?;
    Ok(user)
}

/// Generate a random batch of activities for one user.
///
/// Each user gets 5-10 activities. An activity draws a category, a duration
/// in [20, 90] minutes and a date up to 30 days back; calories follow from
/// the category's burn rate.
fn random_activities<R: Rng>(rng: &mut R, user_id: &RecordId, now: DateTime<Utc>) -> Vec<Activity> {
    let count = rng.gen_range(MIN_ACTIVITIES_PER_USER..=MAX_ACTIVITIES_PER_USER);

    (0..count)
        .map(|_| {
            let kind = &ACTIVITY_KINDS[rng.gen_range(0..ACTIVITY_KINDS.len())];
            let duration = rng.gen_range(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES);
            let days_ago = rng.gen_range(0..=MAX_DATE_OFFSET_DAYS);

            Activity {
                id: RecordId::generate(),
                user_id: user_id.clone(),
                activity_type: kind.activity_type.to_string(),
                duration,
                calories: duration * kind.calories_per_minute,
                date: format_utc_rfc3339(now - Duration::days(days_ago)),
                created_at: format_utc_rfc3339(now),
            }
        })
        .collect()
}

/// The fixed workout catalog.
fn workout_catalog(now: &str) -> Vec<Workout> {
    let fixed = [
        (
            "Superhero Strength Training",
            "Build strength worthy of a superhero with this intense workout",
            "Hard",
            60,
            450,
            vec![
                json!({"name": "Bench Press", "sets": 4, "reps": 10}),
                json!({"name": "Squats", "sets": 4, "reps": 12}),
                json!({"name": "Deadlifts", "sets": 3, "reps": 8}),
                json!({"name": "Pull-ups", "sets": 3, "reps": 15}),
            ],
        ),
        (
            "Speed Force Cardio",
            "Flash-inspired cardio workout for lightning-fast results",
            "Medium",
            30,
            350,
            vec![
                json!({"name": "Sprint Intervals", "sets": 5, "duration": "2 min"}),
                json!({"name": "Jump Rope", "sets": 3, "duration": "3 min"}),
                json!({"name": "Burpees", "sets": 3, "reps": 20}),
            ],
        ),
        (
            "Warrior Yoga Flow",
            "Wonder Woman-inspired flexibility and balance routine",
            "Easy",
            45,
            180,
            vec![
                json!({"name": "Warrior Pose", "sets": 3, "duration": "1 min each side"}),
                json!({"name": "Tree Pose", "sets": 3, "duration": "1 min each side"}),
                json!({"name": "Sun Salutation", "sets": 5, "reps": 10}),
            ],
        ),
        (
            "Hulk Smash HIIT",
            "High-intensity workout to unleash your inner Hulk",
            "Hard",
            40,
            500,
            vec![
                json!({"name": "Box Jumps", "sets": 4, "reps": 15}),
                json!({"name": "Kettlebell Swings", "sets": 4, "reps": 20}),
                json!({"name": "Mountain Climbers", "sets": 4, "reps": 30}),
                json!({"name": "Battle Ropes", "sets": 3, "duration": "45 sec"}),
            ],
        ),
        (
            "Atlantean Swimming Circuit",
            "Aquaman-approved aquatic workout routine",
            "Medium",
            50,
            550,
            vec![
                json!({"name": "Freestyle", "sets": 10, "distance": "100m"}),
                json!({"name": "Backstroke", "sets": 5, "distance": "100m"}),
                json!({"name": "Underwater Swimming", "sets": 5, "distance": "25m"}),
            ],
        ),
        (
            "Web-Slinger Core Workout",
            "Spider-Man inspired core strengthening routine",
            "Medium",
            35,
            280,
            vec![
                json!({"name": "Plank", "sets": 3, "duration": "2 min"}),
                json!({"name": "Hanging Leg Raises", "sets": 3, "reps": 15}),
                json!({"name": "Russian Twists", "sets": 3, "reps": 30}),
                json!({"name": "Bicycle Crunches", "sets": 3, "reps": 40}),
            ],
        ),
    ];

    fixed
        .into_iter()
        .map(
            |(title, description, difficulty, duration, calories_estimate, exercises)| Workout {
                id: RecordId::generate(),
                title: title.to_string(),
                description: description.to_string(),
                difficulty: difficulty.to_string(),
                duration,
                calories_estimate,
                exercises,
                created_at: now.to_string(),
            },
        )
        .collect()
}
