//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal front end and the headless runner both drive it through
//! [`Board::tick`] and read it back through [`Board::render`].

pub mod board;
pub mod cell;
pub mod config;
pub mod direction;
pub mod error;

// Re-export commonly used types
pub use board::{Board, MAX_CELLS, Phase, TickInfo, TickOutcome};
pub use cell::{Cell, FOOD_GLYPHS, Position, SEGMENT_GLYPH};
pub use config::GameConfig;
pub use direction::Direction;
pub use error::{BoardError, ConfigError};
