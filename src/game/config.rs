use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::board::MAX_CELLS;
use super::error::ConfigError;

/// Configuration for a game session
///
/// Every field has a default, so a config file only needs to name the
/// values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the board in cells
    pub width: usize,
    /// Height of the board in cells
    pub height: usize,
    /// Seconds between ticks
    pub tick_rate: f64,
    /// Fastest tick rate reachable with the speed-up key
    pub min_tick_rate: f64,
    /// Slowest tick rate reachable with the slow-down key
    pub max_tick_rate: f64,
    /// Factor applied to the tick rate by one speed adjustment
    pub tick_rate_step: f64,
    /// Seed for food placement; a fresh one is drawn when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 20,
            tick_rate: 0.3,
            min_tick_rate: 0.05,
            max_tick_rate: 2.0,
            tick_rate_step: 1.25,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom board size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Create a small board for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::NotPositive { field: "width" });
        }
        if self.height == 0 {
            return Err(ConfigError::NotPositive { field: "height" });
        }
        if self
            .width
            .checked_mul(self.height)
            .is_none_or(|cells| cells > MAX_CELLS)
        {
            return Err(ConfigError::TooLarge {
                width: self.width,
                height: self.height,
                max: MAX_CELLS,
            });
        }

        for (field, value) in [
            ("tick_rate", self.tick_rate),
            ("min_tick_rate", self.min_tick_rate),
            ("max_tick_rate", self.max_tick_rate),
            ("tick_rate_step", self.tick_rate_step),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field });
            }
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field });
            }
        }

        if self.min_tick_rate > self.max_tick_rate {
            return Err(ConfigError::InvertedTickRange {
                min: self.min_tick_rate,
                max: self.max_tick_rate,
            });
        }
        if self.tick_rate_step <= 1.0 {
            return Err(ConfigError::StepTooSmall(self.tick_rate_step));
        }

        Ok(())
    }

    /// Shorten the delay between ticks by one step, returning the new rate
    ///
    /// Stops at `min_tick_rate`, unless the rate already started below it.
    pub fn faster(&mut self) -> f64 {
        let floor = self.min_tick_rate.min(self.tick_rate);
        self.tick_rate = (self.tick_rate / self.tick_rate_step).max(floor);
        self.tick_rate
    }

    /// Lengthen the delay between ticks by one step, returning the new rate
    ///
    /// Stops at `max_tick_rate`, unless the rate already started above it.
    pub fn slower(&mut self) -> f64 {
        let ceiling = self.max_tick_rate.max(self.tick_rate);
        self.tick_rate = (self.tick_rate * self.tick_rate_step).min(ceiling);
        self.tick_rate
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(self.tick_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.width, 40);
        assert_eq!(config.height, 20);
        assert_eq!(config.tick_rate, 0.3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12);
        assert_eq!(config.width, 15);
        assert_eq!(config.height, 12);
        assert_eq!(config.tick_rate, GameConfig::default().tick_rate);
    }

    #[test]
    fn test_validation_zero_dimensions() {
        assert!(matches!(
            GameConfig::new(0, 10).validate(),
            Err(ConfigError::NotPositive { field: "width" })
        ));
        assert!(matches!(
            GameConfig::new(10, 0).validate(),
            Err(ConfigError::NotPositive { field: "height" })
        ));
    }

    #[test]
    fn test_validation_tick_rate() {
        let mut config = GameConfig::small();
        config.tick_rate = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite { field: "tick_rate" })
        ));

        config.tick_rate = -0.1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive { field: "tick_rate" })
        ));

        // The hotkey bounds do not restrict the starting rate
        config.tick_rate = 5.0;
        assert!(config.validate().is_ok());
        config.tick_rate = 0.01;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_board_size() {
        assert!(GameConfig::new(4096, 4096).validate().is_ok());
        assert!(matches!(
            GameConfig::new(4096, 4097).validate(),
            Err(ConfigError::TooLarge {
                width: 4096,
                height: 4097,
                ..
            })
        ));
        assert!(matches!(
            GameConfig::new(usize::MAX, 2).validate(),
            Err(ConfigError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_validation_step_and_range() {
        let mut config = GameConfig::small();
        config.tick_rate_step = 1.0;
        assert!(matches!(config.validate(), Err(ConfigError::StepTooSmall(_))));

        let mut config = GameConfig::small();
        config.min_tick_rate = 3.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedTickRange { .. })
        ));
    }

    #[test]
    fn test_speed_adjustment_is_clamped() {
        let mut config = GameConfig::small();
        for _ in 0..100 {
            config.faster();
        }
        assert_eq!(config.tick_rate, config.min_tick_rate);

        for _ in 0..100 {
            config.slower();
        }
        assert_eq!(config.tick_rate, config.max_tick_rate);
    }

    #[test]
    fn test_speed_adjustment_outside_bounds() {
        let mut config = GameConfig::small();
        config.tick_rate = 3.0;
        assert!(config.validate().is_ok());
        assert_eq!(config.slower(), 3.0);
        assert!((config.faster() - 2.4).abs() < 1e-9);

        config.tick_rate = 0.02;
        assert_eq!(config.faster(), 0.02);
        assert!((config.slower() - 0.025).abs() < 1e-9);
    }

    #[test]
    fn test_faster_then_slower_round_trips() {
        let mut config = GameConfig::small();
        let before = config.tick_rate;
        config.faster();
        assert!(config.tick_rate < before);
        config.slower();
        assert!((config.tick_rate - before).abs() < 1e-9);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"width": 12, "seed": 7}"#).unwrap();
        assert_eq!(config.width, 12);
        assert_eq!(config.height, 20);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "torus_snake_config_{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"{"width": 8, "height": 6, "tick_rate": 0.5}"#).unwrap();

        let config = GameConfig::load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.width, 8);
        assert_eq!(config.height, 6);
        assert_eq!(config.tick_rate, 0.5);
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("torus_snake_does_not_exist.json");
        assert!(matches!(
            GameConfig::load(&path),
            Err(ConfigError::Read { .. })
        ));
    }
}
