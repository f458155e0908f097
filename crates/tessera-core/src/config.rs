//! Grid configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default number of frames a one-cell slide takes.
pub const BIG_FRAME: u32 = 8;

/// Default number of frames an actor spends dying.
pub const DYING_FRAMES: u32 = 10;

/// Configuration for a [`Grid`](crate::grid::Grid).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Number of rows.
    pub rows: i32,
    /// Number of columns.
    pub columns: i32,
    /// Edge length of one cell in pixels.
    pub cell_size: f32,
    /// Frames per one-cell slide.
    pub big_frame: u32,
    /// Frames an actor spends dying before removal.
    pub dying_frames: u32,
    /// Seed for the grid's random number generator.
    pub seed: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 16,
            columns: 16,
            cell_size: 32.0,
            big_frame: BIG_FRAME,
            dying_frames: DYING_FRAMES,
            seed: 0,
        }
    }
}

impl GridConfig {
    /// Creates a config with the given dimensions and default timing.
    #[must_use]
    pub fn with_dimensions(rows: i32, columns: i32) -> Self {
        Self {
            rows,
            columns,
            ..Default::default()
        }
    }

    /// Returns a copy with a different RNG seed.
    #[must_use]
    pub fn seeded(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Pixels travelled per frame while sliding.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn slide_speed(&self) -> f32 {
        self.cell_size / self.big_frame as f32
    }

    /// Checks that the dimensions and timing constants are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidGrid`] for non-positive dimensions,
    /// cell size, or timing constants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows <= 0 || self.columns <= 0 {
            return Err(ConfigError::InvalidGrid("dimensions must be positive"));
        }
        if !(self.cell_size > 0.0) {
            return Err(ConfigError::InvalidGrid("cell size must be positive"));
        }
        if self.big_frame == 0 {
            return Err(ConfigError::InvalidGrid("big frame must be positive"));
        }
        if self.dying_frames == 0 {
            return Err(ConfigError::InvalidGrid("dying frames must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(GridConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_rows_rejected() {
        let config = GridConfig::with_dimensions(0, 4);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidGrid(_))));
    }

    #[test]
    fn slide_speed_divides_cell() {
        let config = GridConfig::default();
        assert!((config.slide_speed() - 4.0).abs() < f32::EPSILON);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: GridConfig = serde_json::from_str(r#"{"rows": 5, "seed": 9}"#).unwrap();
        assert_eq!(config.rows, 5);
        assert_eq!(config.columns, 16);
        assert_eq!(config.seed, 9);
    }
}
