//! Torus Snake - Snake on a grid whose edges wrap around
//!
//! This library provides:
//! - Core simulation (game module), free of any I/O
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Interactive and headless game loops (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
