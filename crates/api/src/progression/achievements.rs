//! Best-effort achievement unlocking.
//!
//! Runs outside the completion transaction: a completion that succeeds is
//! never rolled back because an achievement write failed. Errors are logged
//! and swallowed; a missed unlock is picked up by the next check, since
//! evaluation always runs against the full stats snapshot.

use std::sync::Arc;

use devquest_core::achievements::{self, ProgressSnapshot};
use devquest_core::types::DbId;
use devquest_db::models::achievement::Achievement;
use devquest_db::repositories::achievement_repo::AchievementRepo;
use devquest_db::repositories::user_repo::UserRepo;
use devquest_db::DbPool;
use devquest_events::bus::{DomainEvent, EventBus};
use devquest_events::types as event_types;

/// Evaluates the achievement catalog against a user's stats and persists
/// any newly satisfied entries.
pub struct AchievementEngine {
    pool: DbPool,
    bus: Arc<EventBus>,
}

impl AchievementEngine {
    pub fn new(pool: DbPool, bus: Arc<EventBus>) -> Self {
        Self { pool, bus }
    }

    /// Run a check on a background task. Used after completions so the
    /// response never waits on achievement writes.
    pub fn spawn_check(self: &Arc<Self>, user_id: DbId) {
        let engine = Arc::clone(self);
        tokio::spawn(async move {
            engine.check_and_unlock(user_id).await;
        });
    }

    /// Evaluate and unlock achievements for a user. Never fails the caller.
    pub async fn check_and_unlock(&self, user_id: DbId) {
        if let Err(e) = self.try_check(user_id).await {
            tracing::error!(user_id, error = %e, "achievement check failed");
        }
    }

    async fn try_check(&self, user_id: DbId) -> Result<(), sqlx::Error> {
        let Some(user) = UserRepo::find_by_id(&self.pool, user_id).await? else {
            return Ok(());
        };
        let unlocked = AchievementRepo::criteria_for_user(&self.pool, user_id).await?;
        let stats = user.progress();

        for def in achievements::newly_satisfied(&stats, &unlocked) {
            let inserted = AchievementRepo::unlock(
                &self.pool,
                user_id,
                def.criterion.as_str(),
                def.name,
                def.description,
                def.icon,
            )
            .await?;

            // None means a concurrent check inserted it first; nothing to
            // announce.
            if let Some(achievement) = inserted {
                tracing::info!(
                    user_id,
                    criterion = def.criterion.as_str(),
                    "achievement unlocked"
                );
                self.announce_unlock(user_id, &achievement, &stats);
            }
        }
        Ok(())
    }

    /// Publish the event pair for a fresh unlock: the achievement itself,
    /// then the stats summary it was evaluated against.
    fn announce_unlock(&self, user_id: DbId, achievement: &Achievement, stats: &ProgressSnapshot) {
        self.bus.publish(
            DomainEvent::new(event_types::ACHIEVEMENT_UNLOCKED)
                .for_user(user_id)
                .with_payload(serde_json::json!({ "achievement": achievement })),
        );
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

    fn engine_with_bus() -> (AchievementEngine, Arc<EventBus>) {
        // A lazy pool never connects; these tests only exercise the bus.
        let pool = DbPool::connect_lazy("postgres://localhost/devquest").unwrap();
        let bus = Arc::new(EventBus::default());
        (AchievementEngine::new(pool, Arc::clone(&bus)), bus)
    }

    fn unlocked(criterion: &str, user_id: DbId) -> Achievement {
        let def = achievements::find(criterion).unwrap();
        Achievement {
            id: 1,
            user_id,
            criterion: criterion.to_string(),
            name: def.name.to_string(),
            description: def.description.to_string(),
            icon: def.icon.to_string(),
            unlocked_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn unlock_publishes_achievement_then_stats_events() {
        let (engine, bus) = engine_with_bus();
        let mut rx = bus.subscribe();

        let stats = ProgressSnapshot {
            xp: 10,
            coins: 0,
            streak: 1,
            tasks_completed: 1,
            total_hours_coded: 0.5,
        };
        engine.announce_unlock(7, &unlocked("first_task", 7), &stats);

        let first = rx.recv().await.unwrap();
        assert_eq!(first.event_type, event_types::ACHIEVEMENT_UNLOCKED);
        assert_eq!(first.user_id, Some(7));
        assert_eq!(first.payload["achievement"]["criterion"], "first_task");

        let second = rx.recv().await.unwrap();
        assert_eq!(second.event_type, event_types::STATS_UPDATED);
        assert_eq!(second.user_id, Some(7));
        assert_eq!(second.payload["tasks_completed"], 1);
        assert_eq!(second.payload["xp"], 10);
    }
}
