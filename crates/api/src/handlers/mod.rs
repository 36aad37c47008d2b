//! HTTP request handlers, grouped by resource.

pub mod achievements;
pub mod auth;
pub mod challenges;
pub mod leaderboard;
pub mod learn;
pub mod profile;
pub mod tasks;
