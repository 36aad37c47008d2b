//! In-process domain event bus.
//!
//! The bus is the notification port for the progression engine: completion
//! rewards, stat updates, and achievement unlocks are published here and
//! consumed by the WebSocket notification router. It is injected explicitly
//! (`Arc<EventBus>`) wherever events are emitted; nothing reaches it through
//! globals.

pub mod bus;

pub use bus::{DomainEvent, EventBus};

/// Event type names published by the progression engine.
pub mod types {
    /// A task was completed and rewarded. Addressed to the owner.
    pub const TASK_COMPLETED: &str = "task.completed";
    /// A challenge was completed and rewarded. Addressed to the owner.
    pub const CHALLENGE_COMPLETED: &str = "challenge.completed";
    /// A task was deleted. Addressed to the owner.
    pub const TASK_DELETED: &str = "task.deleted";
    /// The user's stats summary changed. Addressed to the owner.
    pub const STATS_UPDATED: &str = "stats.updated";
    /// An achievement unlocked for the first time. Addressed to the owner.
    pub const ACHIEVEMENT_UNLOCKED: &str = "achievement.unlocked";
    /// Leaderboard-affecting change. Broadcast to every connected client.
    pub const LEADERBOARD_UPDATED: &str = "leaderboard.updated";
}
