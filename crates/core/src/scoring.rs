//! Scoring module - classic line-clear scoring and level derivation

use crate::types::{LINES_PER_LEVEL, LINE_SCORES};

/// Points for clearing `lines` rows in one lock at `level` (0-based)
///
/// Base points come from [`LINE_SCORES`] and are multiplied by (level + 1).
/// Zero lines, or more than four, score nothing.
pub fn line_clear_points(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level.saturating_add(1))
}

/// Level for a total number of cleared lines
/// Level increases every 10 lines cleared
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL
}
