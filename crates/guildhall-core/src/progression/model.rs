//! Progression snapshot model.

use serde::{Deserialize, Serialize};

/// Server-computed level and XP state of the current user.
///
/// The client never derives leveling locally; this is a mirror of the
/// server's answer and is replaced wholesale on every refresh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressionSnapshot {
    pub level: u32,
    pub total_xp: i64,
    /// Total XP at which the current level starts.
    pub xp_for_current_level: i64,
    /// Total XP at which the next level starts.
    pub xp_for_next_level: i64,
    /// XP earned inside the current level.
    pub xp_progress: i64,
    /// XP still missing to reach the next level.
    pub xp_needed: i64,
    #[serde(default)]
    pub progress_percent: f64,
}

impl ProgressionSnapshot {
    /// XP span of the current level.
    pub fn level_span(&self) -> i64 {
        self.xp_for_next_level - self.xp_for_current_level
    }

    /// `xp_progress + xp_needed` must cover exactly the current level span.
    pub fn is_consistent(&self) -> bool {
        self.xp_progress >= 0
            && self.xp_needed >= 0
            && self.xp_progress + self.xp_needed == self.level_span()
    }
}
