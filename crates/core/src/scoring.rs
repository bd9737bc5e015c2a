//! Scoring module - line clears, score, level and gravity speed
//!
//! Scoring is a flat table lookup: 100/300/500/800 for 1-4 lines with no level
//! multiplier. Level is `lines / 10`, and gravity speeds up by 50ms per level
//! down to a 100ms floor.

use crate::board::Board;
use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_STEP_MS, LINES_PER_LEVEL, LINE_SCORES,
};

/// Cumulative per-session counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub elapsed_ms: u64,
    pub drop_interval_ms: u32,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            score: 0,
            lines: 0,
            level: 0,
            elapsed_ms: 0,
            drop_interval_ms: drop_interval_ms(0),
        }
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of scoring one lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub lines_cleared: u32,
    pub points: u32,
    /// New level, if this lock crossed a level boundary
    pub level_up: Option<u32>,
}

/// Points for clearing `lines` rows in one lock
pub fn line_clear_score(lines: usize) -> u32 {
    LINE_SCORES[lines.min(LINE_SCORES.len() - 1)]
}

/// Level increases every 10 lines cleared
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL
}

/// Gravity interval for a level: `max(100, 1000 - 50 * level)`
pub fn drop_interval_ms(level: u32) -> u32 {
    BASE_DROP_MS
        .saturating_sub(level.saturating_mul(DROP_STEP_MS))
        .max(DROP_INTERVAL_MIN_MS)
}

/// Clear any full rows left by a lock and fold the result into `stats`.
pub fn process_lock(board: &mut Board, stats: &mut SessionStats) -> ScoreResult {
    let rows = board.find_full_rows();
    let cleared = board.clear_rows(&rows);

    let points = line_clear_score(cleared);
    stats.score = stats.score.saturating_add(points);
    stats.lines += cleared as u32;

    let level = calculate_level(stats.lines);
    let level_up = if level > stats.level {
        stats.level = level;
        stats.drop_interval_ms = drop_interval_ms(level);
        Some(level)
    } else {
        None
    };

    ScoreResult {
        lines_cleared: cleared as u32,
        points,
        level_up,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Block, BOARD_HEIGHT, BOARD_WIDTH};

    fn board_with_full_rows(count: usize) -> Board {
        let mut board = Board::new();
        for i in 0..count {
            let y = BOARD_HEIGHT as i8 - 1 - i as i8;
            for x in 0..BOARD_WIDTH as i8 {
                board.set(x, y, Some(Block::Garbage));
            }
        }
        board
    }

    #[test]
    fn test_line_scores() {
        assert_eq!(line_clear_score(0), 0);
        assert_eq!(line_clear_score(1), 100);
        assert_eq!(line_clear_score(2), 300);
        assert_eq!(line_clear_score(3), 500);
        assert_eq!(line_clear_score(4), 800);
        assert_eq!(line_clear_score(6), 800);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(calculate_level(0), 0);
        assert_eq!(calculate_level(9), 0);
        assert_eq!(calculate_level(10), 1);
        assert_eq!(calculate_level(29), 2);
        assert_eq!(calculate_level(100), 10);
    }

    #[test]
    fn test_drop_intervals() {
        assert_eq!(drop_interval_ms(0), 1000);
        assert_eq!(drop_interval_ms(1), 950);
        assert_eq!(drop_interval_ms(10), 500);
        assert_eq!(drop_interval_ms(18), 100);
        assert_eq!(drop_interval_ms(19), 100);
        assert_eq!(drop_interval_ms(u32::MAX), 100);
    }

    #[test]
    fn test_process_lock_scores_fresh_board() {
        for (n, expected) in [(0, 0), (1, 100), (2, 300), (3, 500), (4, 800)] {
            let mut board = board_with_full_rows(n);
            let mut stats = SessionStats::new();
            let result = process_lock(&mut board, &mut stats);
            assert_eq!(result.lines_cleared, n as u32);
            assert_eq!(result.points, expected);
            assert_eq!(stats.score, expected);
            assert_eq!(board, Board::new());
        }
    }

    #[test]
    fn test_level_up_updates_interval_once() {
        let mut stats = SessionStats::new();
        stats.lines = 8;

        let mut board = board_with_full_rows(2);
        let result = process_lock(&mut board, &mut stats);
        assert_eq!(result.level_up, Some(1));
        assert_eq!(stats.level, 1);
        assert_eq!(stats.drop_interval_ms, 950);

        let mut board = board_with_full_rows(1);
        let result = process_lock(&mut board, &mut stats);
        assert_eq!(result.level_up, None);
        assert_eq!(stats.lines, 11);
    }
}
