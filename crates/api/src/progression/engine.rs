//! Completion flows for tasks and daily challenges.
//!
//! Both flows share one routine: guard the day, mark the item completed,
//! compute the reward delta, and persist the user's new progression state in
//! a single transaction. The user row is locked (`SELECT ... FOR UPDATE`)
//! before the guard check so that concurrent completions for the same user
//! serialize and at most one is rewarded per UTC day.

use std::sync::Arc;

use devquest_core::error::CoreError;
use devquest_core::rewards::{self, Difficulty, CHALLENGE_COMPLETION_COINS};
use devquest_core::types::{DbId, Timestamp};
use devquest_core::{guard, streak};
use devquest_db::models::challenge::Challenge;
use devquest_db::models::task::Task;
use devquest_db::models::user::{ProgressionUpdate, User};
use devquest_db::repositories::challenge_repo::ChallengeRepo;
use devquest_db::repositories::task_repo::TaskRepo;
use devquest_db::repositories::user_repo::UserRepo;
use devquest_db::DbPool;
use devquest_events::bus::{DomainEvent, EventBus};
use devquest_events::types as event_types;
use serde::Serialize;

use crate::error::AppResult;
use crate::progression::AchievementEngine;

/// What kind of item is being rewarded. Determines the XP source and which
/// counters move.
enum RewardInput {
    Task {
        difficulty: Difficulty,
        actual_minutes: i32,
    },
    Challenge {
        xp_bonus: i32,
    },
}

/// Result of a reward computation: the absolute progression state to persist
/// plus presentation details for the completion response.
struct Reward {
    update: ProgressionUpdate,
    xp_awarded: i32,
    milestone_message: Option<String>,
}

/// Post-completion snapshot of the user's progression counters, included in
/// completion responses and `stats.updated` events.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSummary {
    pub xp: i32,
    pub coins: i32,
    pub streak: i32,
    pub tasks_completed: i32,
    pub total_hours_coded: f64,
}

impl From<&ProgressionUpdate> for StatsSummary {
    fn from(update: &ProgressionUpdate) -> Self {
        Self {
            xp: update.xp,
            coins: update.coins,
            streak: update.streak,
            tasks_completed: update.tasks_completed,
            total_hours_coded: update.total_hours_coded,
        }
    }
}

/// Outcome of a successful task completion.
pub struct TaskCompletion {
    pub task: Task,
    pub stats: StatsSummary,
    pub xp_awarded: i32,
    pub milestone_message: Option<String>,
}

/// Outcome of a successful challenge completion.
pub struct ChallengeCompletion {
    pub challenge: Challenge,
    pub stats: StatsSummary,
    pub xp_awarded: i32,
    pub milestone_message: Option<String>,
}

/// Compute the reward for a completion against the user's current state.
///
/// Pure: reads the locked user row, never touches the database. The streak
/// is evaluated once per completion and the result folded into an absolute
/// [`ProgressionUpdate`].
fn compute_rewards(user: &User, input: &RewardInput, now: Timestamp) -> Reward {
    let (xp_gain, flat_coins, tasks_inc, hours_inc) = match input {
        RewardInput::Task {
            difficulty,
            actual_minutes,
        } => (
            rewards::xp_for_difficulty(*difficulty),
            0,
            1,
            f64::from(*actual_minutes) / 60.0,
        ),
        RewardInput::Challenge { xp_bonus } => (*xp_bonus, CHALLENGE_COMPLETION_COINS, 0, 0.0),
    };

    let outcome = streak::evaluate(user.last_completion_at, now);
    let new_streak = streak::apply(outcome, user.streak);
    let milestone_coins = rewards::milestone_for_outcome(outcome, new_streak);
    let milestone_message = if milestone_coins > 0 {
        rewards::milestone_message(new_streak)
    } else {
        None
    };

    Reward {
        update: ProgressionUpdate {
            xp: user.xp + xp_gain,
            coins: user.coins + flat_coins + milestone_coins,
            streak: new_streak,
            tasks_completed: user.tasks_completed + tasks_inc,
            total_hours_coded: user.total_hours_coded + hours_inc,
            last_completion_at: now,
        },
        xp_awarded: xp_gain,
        milestone_message,
    }
}

/// Coordinates rewarded completions for a user.
pub struct ProgressionEngine {
    pool: DbPool,
    bus: Arc<EventBus>,
    achievements: Arc<AchievementEngine>,
}

impl ProgressionEngine {
    pub fn new(pool: DbPool, bus: Arc<EventBus>) -> Self {
        let achievements = Arc::new(AchievementEngine::new(pool.clone(), Arc::clone(&bus)));
        Self {
            pool,
            bus,
            achievements,
        }
    }

    /// Complete a task the user owns, awarding XP by difficulty plus streak
    /// milestone coins when the daily guard allows.
    pub async fn complete_task(
        &self,
        user_id: DbId,
        task_id: DbId,
        actual_minutes: i32,
        learned: bool,
    ) -> AppResult<TaskCompletion> {
        let task = TaskRepo::find_by_id(&self.pool, task_id)
            .await?
            .filter(|t| t.user_id == user_id)
            .ok_or(CoreError::NotFound {
                entity: "task",
                id: task_id,
            })?;

        if task.is_completed() {
            return Err(CoreError::InvalidState("Task is already completed".into()).into());
        }
        if actual_minutes <= 0 {
            return Err(CoreError::Validation("Actual time must be a positive number of minutes".into()).into());
        }
        let difficulty = Difficulty::parse(&task.difficulty)?;

        let now = chrono::Utc::now();
        let mut tx = self.pool.begin().await?;

        let user = UserRepo::lock_for_progression(&mut *tx, user_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "user",
                id: user_id,
            })?;

        if !guard::can_reward_today(user.last_completion_at, now) {
            return Err(CoreError::DuplicateDailyCompletion.into());
        }

        let completed = TaskRepo::mark_completed(&mut *tx, task.id, actual_minutes, learned, now)
            .await?
            .ok_or_else(|| CoreError::InvalidState("Task is already completed".into()))?;

        let reward = compute_rewards(
            &user,
            &RewardInput::Task {
                difficulty,
                actual_minutes,
            },
            now,
        );
        UserRepo::apply_progression(&mut *tx, user.id, &reward.update).await?;
        tx.commit().await?;

        self.achievements.spawn_check(user.id);

        let stats = StatsSummary::from(&reward.update);
        self.publish_completion(
            event_types::TASK_COMPLETED,
            user.id,
            serde_json::json!({
                "task": completed,
                "stats": stats,
                "xp_awarded": reward.xp_awarded,
                "milestone_message": reward.milestone_message,
            }),
            &stats,
        );
        // Task completions move the XP leaderboard; broadcast to everyone.
        self.bus.publish(
            DomainEvent::new(event_types::LEADERBOARD_UPDATED).with_payload(serde_json::json!({
                "user_id": user.id,
                "xp": stats.xp,
            })),
        );

        Ok(TaskCompletion {
            task: completed,
            stats,
            xp_awarded: reward.xp_awarded,
            milestone_message: reward.milestone_message,
        })
    }

    /// Complete the user's open daily challenge, awarding its XP bonus plus
    /// flat completion coins when the daily guard allows.
    pub async fn complete_challenge(
        &self,
        user_id: DbId,
        challenge_id: DbId,
    ) -> AppResult<ChallengeCompletion> {
        let challenge = ChallengeRepo::find_by_id(&self.pool, challenge_id)
            .await?
            .filter(|c| c.user_id == user_id)
            .ok_or(CoreError::NotFound {
                entity: "challenge",
                id: challenge_id,
            })?;

        if challenge.completed {
            return Err(CoreError::InvalidState("Challenge is already completed".into()).into());
        }

        let now = chrono::Utc::now();
        let mut tx = self.pool.begin().await?;

        let user = UserRepo::lock_for_progression(&mut *tx, user_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "user",
                id: user_id,
            })?;

        if !guard::can_reward_today(user.last_completion_at, now) {
            return Err(CoreError::DuplicateDailyCompletion.into());
        }

        let completed = ChallengeRepo::mark_completed(&mut *tx, challenge.id, now)
            .await?
            .ok_or_else(|| CoreError::InvalidState("Challenge is already completed".into()))?;

        let reward = compute_rewards(
            &user,
            &RewardInput::Challenge {
                xp_bonus: challenge.xp_bonus,
            },
            now,
        );
        UserRepo::apply_progression(&mut *tx, user.id, &reward.update).await?;
        tx.commit().await?;

        self.achievements.spawn_check(user.id);

        let stats = StatsSummary::from(&reward.update);
        self.publish_completion(
            event_types::CHALLENGE_COMPLETED,
            user.id,
            serde_json::json!({
                "challenge": completed,
                "stats": stats,
                "xp_awarded": reward.xp_awarded,
                "milestone_message": reward.milestone_message,
            }),
            &stats,
        );

        Ok(ChallengeCompletion {
            challenge: completed,
            stats,
            xp_awarded: reward.xp_awarded,
            milestone_message: reward.milestone_message,
        })
    }

    /// Access the achievement engine (used by handlers for on-demand checks).
    pub fn achievements(&self) -> &Arc<AchievementEngine> {
        &self.achievements
    }

    fn publish_completion(
        &self,
        event_type: &'static str,
        user_id: DbId,
        payload: serde_json::Value,
        stats: &StatsSummary,
    ) {
        self.bus
            .publish(DomainEvent::new(event_type).for_user(user_id).with_payload(payload));
        self.bus.publish(
            DomainEvent::new(event_types::STATS_UPDATED)
                .for_user(user_id)
                .with_payload(serde_json::to_value(stats).unwrap_or(serde_json::Value::Null)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn user_with(
        xp: i32,
        coins: i32,
        streak: i32,
        tasks_completed: i32,
        last_completion_at: Option<Timestamp>,
    ) -> User {
        User {
            id: 1,
            name: "Dev".into(),
            username: Some("dev".into()),
            email: "dev@example.com".into(),
            password_hash: "hash".into(),
            avatar: "avatar-1.jpg".into(),
            bio: None,
            tech_stack: vec![],
            learning_goals: vec![],
            xp,
            coins,
            streak,
            tasks_completed,
            total_hours_coded: 0.0,
            last_completion_at,
            created_at: Utc::now(),
        }
    }

    fn noon(year: i32, month: u32, day: u32) -> Timestamp {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn first_task_completion_starts_streak() {
        let user = user_with(0, 0, 0, 0, None);
        let reward = compute_rewards(
            &user,
            &RewardInput::Task {
                difficulty: Difficulty::Hard,
                actual_minutes: 90,
            },
            noon(2026, 3, 1),
        );

        assert_eq!(reward.update.xp, 100);
        assert_eq!(reward.update.streak, 1);
        assert_eq!(reward.update.tasks_completed, 1);
        assert!((reward.update.total_hours_coded - 1.5).abs() < 1e-9);
        assert_eq!(reward.update.coins, 0);
        assert!(reward.milestone_message.is_none());
    }

    #[test]
    fn consecutive_day_reaches_seven_day_milestone() {
        let yesterday = noon(2026, 3, 7);
        let user = user_with(300, 40, 6, 12, Some(yesterday));
        let reward = compute_rewards(
            &user,
            &RewardInput::Task {
                difficulty: Difficulty::Easy,
                actual_minutes: 30,
            },
            noon(2026, 3, 8),
        );

        assert_eq!(reward.update.streak, 7);
        assert_eq!(reward.update.coins, 60, "7-day milestone pays 20 coins");
        assert_eq!(
            reward.milestone_message.as_deref(),
            Some("7-Day Streak! +20 coins")
        );
        assert_eq!(reward.update.xp, 310);
    }

    #[test]
    fn gap_resets_streak_to_zero() {
        let three_days_ago = noon(2026, 3, 5);
        let user = user_with(500, 100, 9, 20, Some(three_days_ago));
        let reward = compute_rewards(
            &user,
            &RewardInput::Task {
                difficulty: Difficulty::Medium,
                actual_minutes: 60,
            },
            noon(2026, 3, 8),
        );

        assert_eq!(reward.update.streak, 0);
        assert_eq!(reward.update.coins, 100, "no milestone coins on a reset");
        assert!(reward.milestone_message.is_none());
        assert_eq!(reward.update.xp, 550);
    }

    #[test]
    fn challenge_pays_bonus_and_flat_coins() {
        let user = user_with(200, 15, 2, 5, Some(noon(2026, 3, 7)));
        let reward = compute_rewards(&user, &RewardInput::Challenge { xp_bonus: 75 }, noon(2026, 3, 8));

        assert_eq!(reward.update.xp, 275);
        assert_eq!(reward.update.streak, 3);
        // 10 flat completion coins + 10 for the 3-day milestone.
        assert_eq!(reward.update.coins, 35);
        assert_eq!(
            reward.milestone_message.as_deref(),
            Some("3-Day Streak! +10 coins")
        );
        assert_eq!(reward.update.tasks_completed, 5, "challenges do not count as tasks");
        assert_eq!(reward.xp_awarded, 75);
    }

    #[test]
    fn milestone_not_repeated_past_threshold() {
        let user = user_with(0, 10, 3, 0, Some(noon(2026, 3, 7)));
        let reward = compute_rewards(
            &user,
            &RewardInput::Task {
                difficulty: Difficulty::Easy,
                actual_minutes: 10,
            },
            noon(2026, 3, 8),
        );

        assert_eq!(reward.update.streak, 4);
        assert_eq!(reward.update.coins, 10, "streak 4 is not a milestone");
        assert!(reward.milestone_message.is_none());
    }

    #[test]
    fn same_day_completion_is_a_noop_for_streak() {
        let earlier_today = noon(2026, 3, 8) - Duration::hours(3);
        let user = user_with(100, 0, 5, 2, Some(earlier_today));
        let reward = compute_rewards(
            &user,
            &RewardInput::Task {
                difficulty: Difficulty::Easy,
                actual_minutes: 15,
            },
            noon(2026, 3, 8),
        );

        // The guard rejects same-day rewards before this runs; the streak
        // computation itself still must not move.
        assert_eq!(reward.update.streak, 5);
        assert_eq!(reward.update.coins, 0);
    }

    #[test]
    fn xp_crosses_threshold_exactly() {
        let user = user_with(490, 0, 0, 3, None);
        let reward = compute_rewards(
            &user,
            &RewardInput::Task {
                difficulty: Difficulty::Easy,
                actual_minutes: 20,
            },
            noon(2026, 3, 8),
        );
        assert_eq!(reward.update.xp, 500);
    }
}
