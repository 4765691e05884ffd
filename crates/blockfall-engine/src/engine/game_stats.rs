use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::GameConfig;

/// Score, level and counters of one game.
///
/// # Scoring
///
/// - Line clears score `line_scores[rows] * level`, once per lock. Four rows
///   cleared by one piece score the tetris entry, not four singles.
/// - Soft drops score per row moved, hard drops per row travelled.
/// - Level starts at `starting_level` and rises by one every
///   `lines_per_level` total cleared rows.
///
/// # Example
///
/// ```
/// use blockfall_engine::{GameConfig, GameStats};
///
/// let config = GameConfig::default();
/// let mut stats = GameStats::new(&config);
/// stats.record_lock(4, &config); // Tetris (4 lines)
///
/// assert_eq!(stats.score(), 800);
/// assert_eq!(stats.lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    score: u64,
    level: u32,
    lines: u32,
    locked_pieces: u32,
    line_cleared_counter: [u32; 5],
    play_time: Duration,
}

/// Effect of one lock on the statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockScore {
    pub points: u64,
    pub level_changed: bool,
}

impl GameStats {
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            score: 0,
            level: config.starting_level,
            lines: 0,
            locked_pieces: 0,
            line_cleared_counter: [0; 5],
            play_time: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Returns the total number of rows cleared.
    #[must_use]
    pub const fn lines(&self) -> u32 {
        self.lines
    }

    #[must_use]
    pub const fn locked_pieces(&self) -> u32 {
        self.locked_pieces
    }

    /// Returns a histogram of locks by rows cleared.
    ///
    /// - `[0]`: locks that cleared nothing
    /// - `[1]`: singles
    /// - `[2]`: doubles
    /// - `[3]`: triples
    /// - `[4]`: tetrises
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[u32; 5] {
        &self.line_cleared_counter
    }

    /// Time spent in the playing state.
    #[must_use]
    pub const fn play_time(&self) -> Duration {
        self.play_time
    }

    pub(crate) fn add_play_time(&mut self, elapsed: Duration) {
        self.play_time = self.play_time.saturating_add(elapsed);
    }

    /// Adds drop points for `rows` rows moved at `points_per_row`.
    pub fn add_drop_points(&mut self, rows: u32, points_per_row: u64) -> u64 {
        let points = u64::from(rows).saturating_mul(points_per_row);
        self.score = self.score.saturating_add(points);
        points
    }

    /// Updates statistics after a piece is locked and `cleared_rows` rows are
    /// removed.
    ///
    /// Points use the level in effect before the clear.
    pub fn record_lock(&mut self, cleared_rows: usize, config: &GameConfig) -> LockScore {
        let points = config.line_clear_points(cleared_rows, self.level);
        self.score = self.score.saturating_add(points);
        self.locked_pieces = self.locked_pieces.saturating_add(1);
        if let Some(counter) = self.line_cleared_counter.get_mut(cleared_rows) {
            *counter = counter.saturating_add(1);
        }
        self.lines = self
            .lines
            .saturating_add(u32::try_from(cleared_rows).unwrap_or(u32::MAX));

        let level = config
            .starting_level
            .saturating_add(self.lines / config.lines_per_level);
        let level_changed = level != self.level;
        self.level = level;

        LockScore {
            points,
            level_changed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_saturates_at_max() {
        let config = GameConfig {
            starting_level: u32::MAX,
            lines_per_level: 1,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
        let mut stats = GameStats::new(&config);
        let score = stats.record_lock(1, &config);
        assert_eq!(stats.level(), u32::MAX);
        assert!(!score.level_changed);
    }

    #[test]
    fn test_score_saturates_at_max() {
        let mut line_scores = GameConfig::default().line_scores;
        line_scores[1] = u64::MAX;
        let config = GameConfig {
            line_scores,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
        let mut stats = GameStats::new(&config);
        stats.record_lock(1, &config);
        stats.record_lock(1, &config);
        assert_eq!(stats.score(), u64::MAX);
        assert_eq!(stats.add_drop_points(u32::MAX, u64::MAX), u64::MAX);
        assert_eq!(stats.score(), u64::MAX);
    }

    #[test]
    fn test_initial_stats() {
        let config = GameConfig::default();
        let stats = GameStats::new(&config);
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.lines(), 0);
        assert_eq!(stats.line_cleared_counter(), &[0; 5]);
    }

    #[test]
    fn test_tetris_scores_once() {
        let config = GameConfig::default();
        let mut stats = GameStats::new(&config);
        let result = stats.record_lock(4, &config);
        assert_eq!(result.points, 800);
        assert_eq!(stats.score(), 800);
        assert_eq!(stats.line_cleared_counter()[1], 0);
        assert_eq!(stats.line_cleared_counter()[4], 1);
    }

    #[test]
    fn test_level_up_every_ten_lines() {
        let config = GameConfig::default();
        let mut stats = GameStats::new(&config);
        for _ in 0..2 {
            assert!(!stats.record_lock(4, &config).level_changed);
        }
        assert_eq!(stats.level(), 1);
        let result = stats.record_lock(2, &config);
        assert!(result.level_changed);
        assert_eq!(stats.level(), 2);
        assert_eq!(stats.lines(), 10);

        // Points at level 2 double.
        assert_eq!(stats.record_lock(1, &config).points, 200);
    }

    #[test]
    fn test_starting_level_offsets_level() {
        let config = GameConfig {
            starting_level: 5,
            lines_per_level: 4,
            ..GameConfig::default()
        };
        let mut stats = GameStats::new(&config);
        assert_eq!(stats.record_lock(1, &config).points, 500);
        stats.record_lock(3, &config);
        assert_eq!(stats.level(), 6);
    }

    #[test]
    fn test_drop_points() {
        let config = GameConfig::default();
        let mut stats = GameStats::new(&config);
        assert_eq!(stats.add_drop_points(3, config.soft_drop_points), 3);
        assert_eq!(stats.add_drop_points(10, config.hard_drop_points), 20);
        assert_eq!(stats.score(), 23);
        assert_eq!(stats.locked_pieces(), 0);
    }
}
