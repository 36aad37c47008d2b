//! Achievement catalog and threshold evaluation.
//!
//! The catalog is a static data table: each entry names a criterion, the
//! stat it thresholds on, the threshold value, and display metadata. One
//! generic evaluator covers every entry, so adding a new achievement is a
//! single table row.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Progress snapshot
// ---------------------------------------------------------------------------

/// The user stats achievements are evaluated against. A plain value struct
/// so the evaluator stays pure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressSnapshot {
    pub xp: i32,
    pub coins: i32,
    pub streak: i32,
    pub tasks_completed: i32,
    pub total_hours_coded: f64,
}

// ---------------------------------------------------------------------------
// Criteria
// ---------------------------------------------------------------------------

/// Fixed set of achievement criteria. The string form is the database key
/// under the `(user_id, criterion)` uniqueness constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    FirstTask,
    ThreeTasks,
    Streak3,
    Streak7,
    Streak14,
    Xp500,
    Xp1000,
    Hours10,
}

impl Criterion {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstTask => "first_task",
            Self::ThreeTasks => "three_tasks",
            Self::Streak3 => "streak_3",
            Self::Streak7 => "streak_7",
            Self::Streak14 => "streak_14",
            Self::Xp500 => "xp_500",
            Self::Xp1000 => "xp_1000",
            Self::Hours10 => "hours_10",
        }
    }
}

/// Which stat an achievement thresholds on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdKind {
    TasksCompleted,
    Streak,
    Xp,
    HoursCoded,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// A single catalog row: criterion, threshold, and display metadata.
#[derive(Debug, Clone, Copy)]
pub struct AchievementDef {
    pub criterion: Criterion,
    pub kind: ThresholdKind,
    pub threshold: f64,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

impl AchievementDef {
    /// Current value of the stat this achievement thresholds on.
    pub fn current(&self, stats: &ProgressSnapshot) -> f64 {
        match self.kind {
            ThresholdKind::TasksCompleted => stats.tasks_completed as f64,
            ThresholdKind::Streak => stats.streak as f64,
            ThresholdKind::Xp => stats.xp as f64,
            ThresholdKind::HoursCoded => stats.total_hours_coded,
        }
    }

    /// Whether the stats satisfy this achievement's threshold.
    pub fn is_satisfied(&self, stats: &ProgressSnapshot) -> bool {
        self.current(stats) >= self.threshold
    }
}

/// The full, fixed achievement catalog.
pub const CATALOG: &[AchievementDef] = &[
    AchievementDef {
        criterion: Criterion::FirstTask,
        kind: ThresholdKind::TasksCompleted,
        threshold: 1.0,
        name: "First Quest",
        description: "Completed your first task",
        icon: "first-badge.jpg",
    },
    AchievementDef {
        criterion: Criterion::ThreeTasks,
        kind: ThresholdKind::TasksCompleted,
        threshold: 3.0,
        name: "Task Trifecta",
        description: "Completed 3 tasks",
        icon: "trifecta-badge.jpg",
    },
    AchievementDef {
        criterion: Criterion::Streak3,
        kind: ThresholdKind::Streak,
        threshold: 3.0,
        name: "3-Day Sprinter",
        description: "Achieved a 3-day streak",
        icon: "streak-3-badge.jpg",
    },
    AchievementDef {
        criterion: Criterion::Streak7,
        kind: ThresholdKind::Streak,
        threshold: 7.0,
        name: "Streak Starter",
        description: "Achieved a 7-day streak",
        icon: "streak-badge.jpg",
    },
    AchievementDef {
        criterion: Criterion::Streak14,
        kind: ThresholdKind::Streak,
        threshold: 14.0,
        name: "Streak Master",
        description: "Achieved a 14-day streak",
        icon: "streak-14-badge.jpg",
    },
    AchievementDef {
        criterion: Criterion::Xp500,
        kind: ThresholdKind::Xp,
        threshold: 500.0,
        name: "XP Novice",
        description: "Earned 500 XP",
        icon: "xp-badge.jpg",
    },
    AchievementDef {
        criterion: Criterion::Xp1000,
        kind: ThresholdKind::Xp,
        threshold: 1000.0,
        name: "XP Adept",
        description: "Earned 1000 XP",
        icon: "xp-adept-badge.jpg",
    },
    AchievementDef {
        criterion: Criterion::Hours10,
        kind: ThresholdKind::HoursCoded,
        threshold: 10.0,
        name: "Code Marathoner",
        description: "Coded for 10 hours",
        icon: "hours-badge.jpg",
    },
];

/// Look up a catalog entry by its string criterion key.
pub fn find(criterion: &str) -> Option<&'static AchievementDef> {
    CATALOG.iter().find(|d| d.criterion.as_str() == criterion)
}

/// Catalog entries satisfied by `stats` but not present in
/// `unlocked` (string criterion keys of already-unlocked achievements).
pub fn newly_satisfied<'a>(
    stats: &'a ProgressSnapshot,
    unlocked: &'a [String],
) -> impl Iterator<Item = &'static AchievementDef> + 'a {
    CATALOG.iter().filter(move |def| {
        !unlocked.iter().any(|c| c == def.criterion.as_str()) && def.is_satisfied(stats)
    })
}
