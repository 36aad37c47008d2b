//! Pure domain logic for the DevQuest progression system.
//!
//! Everything in this crate is side-effect free: streak evaluation, reward
//! calculation, and the achievement catalog operate on plain values so they
//! can be exercised without a database or runtime.

pub mod achievements;
pub mod error;
pub mod guard;
pub mod rewards;
pub mod streak;
pub mod types;
