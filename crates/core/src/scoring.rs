//! Scoring module - points, lines and level
//!
//! The rules are deliberately simple:
//! - a clear of `n` rows awards `50 * n * n`,
//! - a user soft drop awards 1 point, a gravity drop awards nothing,
//! - a hard drop awards 2 points per row descended,
//! - the level is `lines / 3 + 1`.

use crate::types::{
    EventSource, HARD_DROP_POINTS_PER_ROW, LINES_PER_LEVEL, LINE_CLEAR_BASE, SOFT_DROP_POINTS,
};

/// Bonus for clearing `lines` rows at once
pub fn line_clear_bonus(lines: u32) -> u32 {
    LINE_CLEAR_BASE.saturating_mul(lines.saturating_mul(lines))
}

/// Points for one successful soft drop
pub fn soft_drop_points(source: EventSource) -> u32 {
    match source {
        EventSource::User => SOFT_DROP_POINTS,
        EventSource::Timer => 0,
    }
}

/// Points for a hard drop of `rows` rows
pub fn hard_drop_points(rows: u32) -> u32 {
    rows.saturating_mul(HARD_DROP_POINTS_PER_ROW)
}

/// Level for a running line total (starts at 1)
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Score, line and level counters for one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScoreTracker {
    points: u32,
    lines: u32,
    level: u32,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self {
            points: 0,
            lines: 0,
            level: 1,
        }
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn add_points(&mut self, points: u32) {
        self.points = self.points.saturating_add(points);
    }

    /// Add cleared lines and recompute the level
    pub fn add_lines(&mut self, lines: u32) {
        self.lines = self.lines.saturating_add(lines);
        self.level = calculate_level(self.lines);
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for ScoreTracker {
    fn default() -> Self {
        Self::new()
    }
}
