//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or a transaction connection) as the first argument.

pub mod achievement_repo;
pub mod challenge_repo;
pub mod task_repo;
pub mod user_repo;

pub use achievement_repo::AchievementRepo;
pub use challenge_repo::ChallengeRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
