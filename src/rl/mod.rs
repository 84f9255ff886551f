//! Agent-facing view of the environment
//!
//! Provides:
//! - Field snapshots handed out after every timestep
//! - One-hot feature vectors derived from those snapshots

pub mod observation;

pub use observation::{Observation, create_observation};
