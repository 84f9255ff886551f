//! Core simulation module for Snake
//!
//! This module contains the field, the snake and the environment that keeps
//! them in sync. It has no I/O or rendering dependencies, so it can drive
//! human play, scripted agents and training loops alike.

pub mod action;
pub mod config;
pub mod environment;
pub mod error;
pub mod field;
pub mod levels;
pub mod point;
pub mod snake;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::EnvironmentConfig;
pub use environment::{Environment, TerminationReason, TimestepResult};
pub use error::{ConfigError, EnvironmentError, LevelError};
pub use field::{CellType, Field};
pub use point::Point;
pub use snake::{DEFAULT_SNAKE_LENGTH, Snake};
