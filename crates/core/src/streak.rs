//! Streak evaluation over calendar days.
//!
//! A streak counts consecutive calendar days with at least one rewarded
//! completion. Day boundaries are **UTC midnight** everywhere in the system;
//! this module is the single place that definition lives.

use chrono::{TimeZone, Utc};

use crate::types::Timestamp;

/// What a new rewarded completion does to the user's streak counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakOutcome {
    /// Increment the streak by one (also starts a fresh streak at 1).
    Extend,
    /// The last rewarded completion is two or more days old; streak drops
    /// to zero.
    Reset,
    /// Same calendar day as the last rewarded completion; leave the streak
    /// untouched. The completion guard normally prevents this path, but the
    /// evaluator still handles it.
    Noop,
}

/// Truncate a timestamp to its UTC calendar day (midnight).
pub fn day_start(at: Timestamp) -> Timestamp {
    let date = at.date_naive();
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap())
}

/// Evaluate how a completion at `now` affects the streak, given the
/// timestamp of the last rewarded completion.
///
/// Pure function over UTC calendar dates:
/// - no prior completion        -> [`StreakOutcome::Extend`]
/// - exactly one day earlier    -> [`StreakOutcome::Extend`]
/// - two or more days earlier   -> [`StreakOutcome::Reset`]
/// - same day                   -> [`StreakOutcome::Noop`]
pub fn evaluate(last_completion_at: Option<Timestamp>, now: Timestamp) -> StreakOutcome {
    let Some(last) = last_completion_at else {
        return StreakOutcome::Extend;
    };

    let gap_days = (now.date_naive() - last.date_naive()).num_days();

    if gap_days == 1 {
        StreakOutcome::Extend
    } else if gap_days >= 2 {
        StreakOutcome::Reset
    } else {
        // Same day (gap 0). A negative gap would mean a clock anomaly;
        // treat it the same way and leave the streak alone.
        StreakOutcome::Noop
    }
}

/// Apply an outcome to a streak counter, returning the new value.
pub fn apply(outcome: StreakOutcome, streak: i32) -> i32 {
    match outcome {
        StreakOutcome::Extend => streak + 1,
        StreakOutcome::Reset => 0,
        StreakOutcome::Noop => streak,
    }
}
