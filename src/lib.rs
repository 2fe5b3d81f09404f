// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! OctoFit Tracker: fitness activity tracking for Mergington High School
//!
//! This crate provides the backend API for users, teams, activities,
//! leaderboard snapshots and workout suggestions, plus the seed pipeline
//! that resets and repopulates the database.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
}
