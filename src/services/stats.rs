// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity aggregation and leaderboard ranking.
//!
//! Both functions are pure: they see in-memory slices and never touch the
//! store. The seed pipeline drives them; request handlers never do, so
//! leaderboard entries stay snapshots.

use crate::models::{Activity, RecordId};

/// Per-user totals derived from activity records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActivityTotals {
    /// Sum of `calories` across the user's activities
    pub total_calories: i64,
    /// Number of the user's activities
    pub total_activities: i64,
}

/// Reduce activities down to totals for one user.
///
/// Activities belonging to other users are skipped. An unknown user simply
/// has no matches and yields zero totals, not an error.
pub fn activity_totals(user_id: &RecordId, activities: &[Activity]) -> ActivityTotals {
    let mut totals = ActivityTotals::default();
    for activity in activities {
        if activity.user_id == *user_id {
            totals.total_calories += activity.calories;
            totals.total_activities += 1;
        }
    }
    totals
}

/// A user's computed leaderboard position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedUser {
    pub user_id: RecordId,
    /// Dense rank, 1 = highest total calories
    pub rank: u32,
}

/// Order users by total calories descending and assign ranks 1..N.
///
/// The sort is stable, so users with equal totals keep their relative input
/// order and still receive consecutive distinct ranks. This is intentionally
/// not competition ranking: ties never share a rank.
pub fn assign_ranks(totals: Vec<(RecordId, i64)>) -> Vec<RankedUser> {
    let mut totals = totals;
    totals.sort_by(|a, b| b.1.cmp(&a.1));

    totals
        .into_iter()
        .enumerate()
        .map(|(i, (user_id, _))| RankedUser {
            user_id,
            rank: i as u32 + 1,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_activity(user_id: &RecordId, calories: i64) -> Activity {
        Activity {
            id: RecordId::generate(),
            user_id: user_id.clone(),
            activity_type: "Running".to_string(),
            duration: 30,
            calories,
            date: "2026-01-15T10:00:00Z".to_string(),
            created_at: "2026-01-15T12:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_totals_sum_and_count_only_matching_user() {
        let user_a = RecordId::from("user-a");
        let user_b = RecordId::from("user-b");

        // Enumeration order matters for nothing here, but mirrors a store scan.
        let activities = vec![
            make_activity(&user_a, 300),
            make_activity(&user_b, 300),
            make_activity(&user_a, 0),
        ];

        let totals_a = activity_totals(&user_a, &activities);
        assert_eq!(totals_a.total_calories, 300);
        assert_eq!(totals_a.total_activities, 2);

        let totals_b = activity_totals(&user_b, &activities);
        assert_eq!(totals_b.total_calories, 300);
        assert_eq!(totals_b.total_activities, 1);
    }

    #[test]
    fn test_totals_for_unknown_user_are_zero() {
        let user_a = RecordId::from("user-a");
        let activities = vec![make_activity(&user_a, 120)];

        let totals = activity_totals(&RecordId::from("nobody"), &activities);
        assert_eq!(totals, ActivityTotals::default());
    }

    #[test]
    fn test_totals_on_empty_input_are_zero() {
        let totals = activity_totals(&RecordId::from("user-a"), &[]);
        assert_eq!(totals.total_calories, 0);
        assert_eq!(totals.total_activities, 0);
    }

    #[test]
    fn test_ranks_descend_by_calories() {
        let ranked = assign_ranks(vec![
            (RecordId::from("low"), 100),
            (RecordId::from("high"), 900),
            (RecordId::from("mid"), 500),
        ]);

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0], RankedUser { user_id: RecordId::from("high"), rank: 1 });
        assert_eq!(ranked[1], RankedUser { user_id: RecordId::from("mid"), rank: 2 });
        assert_eq!(ranked[2], RankedUser { user_id: RecordId::from("low"), rank: 3 });
    }

    #[test]
    fn test_ties_keep_input_order_and_distinct_ranks() {
        // A precedes B in the input, so with equal totals A wins the tie.
        let ranked = assign_ranks(vec![
            (RecordId::from("a"), 300),
            (RecordId::from("b"), 300),
        ]);

        assert_eq!(ranked[0], RankedUser { user_id: RecordId::from("a"), rank: 1 });
        assert_eq!(ranked[1], RankedUser { user_id: RecordId::from("b"), rank: 2 });
    }

    #[test]
    fn test_ranks_are_dense_permutation() {
        let input: Vec<(RecordId, i64)> = (0..12)
            .map(|i| (RecordId::from(format!("user-{}", i)), (i % 4) * 100))
            .collect();
        let input_ids: Vec<RecordId> = input.iter().map(|(id, _)| id.clone()).collect();

        let ranked = assign_ranks(input);

        let mut ranks: Vec<u32> = ranked.iter().map(|r| r.rank).collect();
        ranks.sort_unstable();
        assert_eq!(ranks, (1..=12).collect::<Vec<u32>>());

        // Output is a permutation of the input users.
        for id in &input_ids {
            assert!(ranked.iter().any(|r| r.user_id == *id));
        }
    }

    #[test]
    fn test_empty_input_ranks_to_empty() {
        assert!(assign_ranks(Vec::new()).is_empty());
    }
}
