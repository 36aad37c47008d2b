//! Progression engine: rewarded completions, streaks, and achievements.
//!
//! [`ProgressionEngine`] coordinates a single completion event end to end:
//! validation, the daily completion guard, reward calculation, atomic
//! persistence, the best-effort achievement check, and notification events.
//! The event bus is injected at construction; nothing here touches global
//! state.

mod achievements;
mod engine;

pub use achievements::AchievementEngine;
pub use engine::{ProgressionEngine, StatsSummary};
