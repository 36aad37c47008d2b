//! Daily completion guard predicate.
//!
//! A user earns at most one rewarded completion (task or challenge,
//! combined) per UTC calendar day. `last_completion_at` on the user record
//! is the single source of truth: it is written on every rewarded completion
//! regardless of item kind. The progression engine evaluates this predicate
//! while holding the user's row lock, which makes check-and-reward atomic
//! per user.

use crate::streak::day_start;
use crate::types::Timestamp;

/// Whether a completion at `now` may still be rewarded today.
///
/// True iff the user has no rewarded completion yet, or the last one falls
/// before today's UTC midnight.
pub fn can_reward_today(last_completion_at: Option<Timestamp>, now: Timestamp) -> bool {
    match last_completion_at {
        None => true,
        Some(last) => last < day_start(now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(d: u32, h: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2024, 3, d, h, 0, 0).unwrap()
    }

    #[test]
    fn no_prior_completion_allows_reward() {
        assert!(can_reward_today(None, at(10, 12)));
    }

    #[test]
    fn completion_earlier_today_blocks() {
        assert!(!can_reward_today(Some(at(10, 1)), at(10, 23)));
    }

    #[test]
    fn completion_yesterday_allows() {
        // Even one minute before midnight counts as yesterday.
        let last = at(9, 23) + chrono::Duration::minutes(59);
        assert!(can_reward_today(Some(last), at(10, 0)));
    }

    #[test]
    fn completion_at_exact_midnight_blocks_for_the_day() {
        assert!(!can_reward_today(Some(at(10, 0)), at(10, 18)));
    }
}
