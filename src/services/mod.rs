// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod seed;
pub mod stats;

pub use seed::{populate_database, SeedSummary};
pub use stats::{activity_totals, assign_ranks, ActivityTotals, RankedUser};
