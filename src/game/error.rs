use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while constructing a board
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("board of {width}x{height} cells is too large")]
    TooLarge { width: usize, height: usize },
}

/// Errors raised while loading or validating a game configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{field} must be positive")]
    NotPositive { field: &'static str },

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("board of {width}x{height} cells exceeds {max} cells")]
    TooLarge {
        width: usize,
        height: usize,
        max: usize,
    },

    #[error("min_tick_rate {min} exceeds max_tick_rate {max}")]
    InvertedTickRange { min: f64, max: f64 },

    #[error("tick_rate_step must be greater than 1, got {0}")]
    StepTooSmall(f64),
}
