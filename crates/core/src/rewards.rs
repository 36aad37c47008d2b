//! Reward calculation: XP per difficulty, challenge bonuses, and streak
//! milestone coin awards.

use crate::error::CoreError;
use crate::streak::StreakOutcome;

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

/// Task difficulty tier. Stored in the database as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Parse the lowercase database/API representation.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(CoreError::Validation(format!(
                "Invalid difficulty level: {other}"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

// ---------------------------------------------------------------------------
// XP
// ---------------------------------------------------------------------------

/// XP awarded for completing a task of the given difficulty.
pub fn xp_for_difficulty(difficulty: Difficulty) -> i32 {
    match difficulty {
        Difficulty::Easy => 10,
        Difficulty::Medium => 50,
        Difficulty::Hard => 100,
    }
}

/// Lowest XP bonus a generated challenge may carry.
pub const MIN_CHALLENGE_XP_BONUS: i32 = 50;
/// Highest XP bonus a generated challenge may carry.
pub const MAX_CHALLENGE_XP_BONUS: i32 = 100;

/// Clamp an author- or AI-supplied challenge bonus into the allowed range.
pub fn clamp_challenge_bonus(bonus: i32) -> i32 {
    bonus.clamp(MIN_CHALLENGE_XP_BONUS, MAX_CHALLENGE_XP_BONUS)
}

// ---------------------------------------------------------------------------
// Coins
// ---------------------------------------------------------------------------

/// Flat coin award on every rewarded challenge completion. Task completions
/// do not receive this bonus.
pub const CHALLENGE_COMPLETION_COINS: i32 = 10;

/// Streak lengths that trigger a one-time coin bonus, with the bonus amount.
const MILESTONES: &[(i32, i32)] = &[(3, 10), (7, 20), (14, 50)];

/// Coin bonus for reaching `new_streak` by extending the streak.
///
/// Returns a bonus only when the new length exactly equals a milestone, so
/// each threshold pays out once per crossing, never retroactively.
pub fn milestone_coin_bonus(new_streak: i32) -> i32 {
    MILESTONES
        .iter()
        .find(|(len, _)| *len == new_streak)
        .map(|(_, coins)| *coins)
        .unwrap_or(0)
}

/// Celebration message shown alongside a milestone bonus.
pub fn milestone_message(new_streak: i32) -> Option<String> {
    let coins = milestone_coin_bonus(new_streak);
    if coins == 0 {
        return None;
    }
    Some(format!("{new_streak}-Day Streak! +{coins} coins"))
}

/// Milestone bonus for a streak transition, gated on the streak actually
/// being extended. Resets and same-day no-ops never pay out.
pub fn milestone_for_outcome(outcome: StreakOutcome, new_streak: i32) -> i32 {
    match outcome {
        StreakOutcome::Extend => milestone_coin_bonus(new_streak),
        StreakOutcome::Reset | StreakOutcome::Noop => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xp_table() {
        assert_eq!(xp_for_difficulty(Difficulty::Easy), 10);
        assert_eq!(xp_for_difficulty(Difficulty::Medium), 50);
        assert_eq!(xp_for_difficulty(Difficulty::Hard), 100);
    }

    #[test]
    fn difficulty_parse_round_trip() {
        for s in ["easy", "medium", "hard"] {
            assert_eq!(Difficulty::parse(s).unwrap().as_str(), s);
        }
        assert!(Difficulty::parse("extreme").is_err());
        assert!(Difficulty::parse("Easy").is_err());
    }

    #[test]
    fn challenge_bonus_clamped_into_range() {
        assert_eq!(clamp_challenge_bonus(75), 75);
        assert_eq!(clamp_challenge_bonus(10), 50);
        assert_eq!(clamp_challenge_bonus(5000), 100);
    }

    #[test]
    fn milestone_only_at_exact_thresholds() {
        assert_eq!(milestone_coin_bonus(3), 10);
        assert_eq!(milestone_coin_bonus(7), 20);
        assert_eq!(milestone_coin_bonus(14), 50);

        // One past a threshold pays nothing, no retroactive awards.
        assert_eq!(milestone_coin_bonus(4), 0);
        assert_eq!(milestone_coin_bonus(8), 0);
        assert_eq!(milestone_coin_bonus(15), 0);
        assert_eq!(milestone_coin_bonus(0), 0);
        assert_eq!(milestone_coin_bonus(1), 0);
    }

    #[test]
    fn milestone_requires_extend() {
        assert_eq!(milestone_for_outcome(StreakOutcome::Extend, 3), 10);
        assert_eq!(milestone_for_outcome(StreakOutcome::Reset, 3), 0);
        assert_eq!(milestone_for_outcome(StreakOutcome::Noop, 3), 0);
    }

    #[test]
    fn milestone_message_matches_bonus() {
        assert_eq!(
            milestone_message(7).as_deref(),
            Some("7-Day Streak! +20 coins")
        );
        assert_eq!(milestone_message(6), None);
    }
}
