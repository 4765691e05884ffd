use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Piece selection policy used to feed the spawn queue.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "kebab-case")]
pub enum RandomizerKind {
    /// Shuffled bags of all seven kinds.
    #[default]
    #[display("bag")]
    Bag,
    /// Independent uniform draws.
    #[display("uniform")]
    Uniform,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("lines_per_level must be positive")]
    ZeroLinesPerLevel,
    #[display("starting_level must be positive")]
    ZeroStartingLevel,
    #[display("min_drop_interval_ms must be positive")]
    ZeroMinInterval,
    #[display("min_drop_interval_ms ({min}) exceeds base_drop_interval_ms ({base})")]
    MinAboveBase { min: u64, base: u64 },
}

/// Rules and timing of a game.
///
/// Every field has a default, so a JSON file only needs to name the fields it
/// changes:
///
/// ```
/// use blockfall_engine::{GameConfig, RandomizerKind};
///
/// let config: GameConfig =
///     serde_json::from_str(r#"{ "randomizer": "uniform", "lines_per_level": 5 }"#).unwrap();
/// assert_eq!(config.randomizer, RandomizerKind::Uniform);
/// assert_eq!(config.lines_per_level, 5);
/// assert_eq!(config.line_scores, GameConfig::default().line_scores);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Points for clearing 0-4 rows with one lock, multiplied by the level.
    pub line_scores: [u64; 5],
    /// Points per row moved by a soft drop input.
    pub soft_drop_points: u64,
    /// Points per row travelled by a hard drop.
    pub hard_drop_points: u64,
    pub starting_level: u32,
    /// Total cleared rows needed for each level increase.
    pub lines_per_level: u32,
    /// Gravity interval at `starting_level` 1.
    pub base_drop_interval_ms: u64,
    /// Interval reduction per level above 1.
    pub drop_interval_step_ms: u64,
    /// Gravity never gets faster than this.
    pub min_drop_interval_ms: u64,
    pub randomizer: RandomizerKind,
    /// Number of upcoming kinds exposed to renderers.
    pub preview_len: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            line_scores: [0, 100, 300, 500, 800],
            soft_drop_points: 1,
            hard_drop_points: 2,
            starting_level: 1,
            lines_per_level: 10,
            base_drop_interval_ms: 1000,
            drop_interval_step_ms: 100,
            min_drop_interval_ms: 100,
            randomizer: RandomizerKind::Bag,
            preview_len: 5,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lines_per_level == 0 {
            return Err(ConfigError::ZeroLinesPerLevel);
        }
        if self.starting_level == 0 {
            return Err(ConfigError::ZeroStartingLevel);
        }
        if self.min_drop_interval_ms == 0 {
            return Err(ConfigError::ZeroMinInterval);
        }
        if self.min_drop_interval_ms > self.base_drop_interval_ms {
            return Err(ConfigError::MinAboveBase {
                min: self.min_drop_interval_ms,
                base: self.base_drop_interval_ms,
            });
        }
        Ok(())
    }

    /// Gravity interval for `level`.
    ///
    /// Decreases by `drop_interval_step_ms` per level and is clamped to
    /// `min_drop_interval_ms`, so it never increases with level.
    #[must_use]
    pub fn drop_interval(&self, level: u32) -> Duration {
        let speedup = u64::from(level.saturating_sub(1)).saturating_mul(self.drop_interval_step_ms);
        let millis = self
            .base_drop_interval_ms
            .saturating_sub(speedup)
            .max(self.min_drop_interval_ms);
        Duration::from_millis(millis)
    }

    /// Points for clearing `rows` rows at once.
    #[must_use]
    pub fn line_clear_points(&self, rows: usize, level: u32) -> u64 {
        let base = self.line_scores.get(rows).copied().unwrap_or(0);
        base.saturating_mul(u64::from(level))
    }
}
