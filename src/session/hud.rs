//! Heads-up display snapshot.

use serde::{Deserialize, Serialize};

/// Counters shown above the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub level: u32,
    pub max_level: u32,
    pub score: u32,
    pub pairs: u32,
    pub remaining_time: u32,
    pub levels_completed: u32,
}

/// Format countdown units as `MM:SS`.
#[must_use]
pub fn format_clock(units: u32) -> String {
    format!("{:02}:{:02}", units / 60, units % 60)
}

impl std::fmt::Display for Hud {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Level {}/{} | Score: {}/{} | Time: {}",
            self.level,
            self.max_level,
            self.score,
            self.pairs,
            format_clock(self.remaining_time)
        )
    }
}
