//! Grid Snake - a deterministic Snake environment
//!
//! This library provides:
//! - Core simulation (game module): field, snake, environment
//! - Observations for agents (rl module)
//! - Agent interface and a random baseline (agent module)
//! - Per-episode statistics (metrics module)
//! - A headless episode runner (modes module)

pub mod agent;
pub mod game;
pub mod metrics;
pub mod modes;
pub mod rl;
