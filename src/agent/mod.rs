//! Agents that choose actions for the Snake environment
//!
//! An agent sees the observation and reward of the last timestep and
//! answers with one [`Action`]. How it decides is up to the agent.

pub mod random;

pub use random::RandomAgent;

use crate::game::Action;
use crate::rl::Observation;

/// An agent playing in the Snake environment
pub trait Agent {
    /// Reset the agent for a new episode
    fn reset_state(&mut self) {}

    /// Choose the next action to take
    ///
    /// `reward` is the reward received at the end of the previous timestep.
    fn next_action(&mut self, observation: &Observation, reward: f32) -> Action;

    /// Notify the agent that the episode has ended
    fn end_episode(&mut self) {}
}
