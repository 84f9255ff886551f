//! Per-episode statistics
//!
//! Collects the `(action, reward)` pairs and the termination reason of one
//! episode. Presentation is left to the caller; the struct serializes as a
//! flat record.

use serde::Serialize;

use crate::game::{Action, TerminationReason, TimestepResult};

/// How often each action was chosen during an episode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActionCounts {
    pub maintain_direction: u32,
    pub turn_left: u32,
    pub turn_right: u32,
}

impl ActionCounts {
    pub fn get(&self, action: Action) -> u32 {
        match action {
            Action::MaintainDirection => self.maintain_direction,
            Action::TurnLeft => self.turn_left,
            Action::TurnRight => self.turn_right,
        }
    }

    fn increment(&mut self, action: Action) {
        let counter = match action {
            Action::MaintainDirection => &mut self.maintain_direction,
            Action::TurnLeft => &mut self.turn_left,
            Action::TurnRight => &mut self.turn_right,
        };
        *counter += 1;
    }
}

/// Summary of the agent's performance during one episode
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EpisodeStatistics {
    /// Timesteps that did not end in a collision
    pub timesteps_survived: u32,
    pub sum_episode_rewards: f32,
    pub fruits_eaten: u32,
    pub termination_reason: Option<TerminationReason>,
    pub action_counter: ActionCounts,
}

impl EpisodeStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all previous statistics and prepare for a new episode
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Update the stats with the outcome of one timestep
    ///
    /// `action` is `None` when no action was chosen for the timestep.
    pub fn record_timestep(&mut self, action: Option<Action>, result: &TimestepResult) {
        self.sum_episode_rewards += result.reward;
        if let Some(action) = action {
            self.action_counter.increment(action);
        }
        if result.ate_fruit {
            self.fruits_eaten += 1;
        }

        let collided = matches!(
            result.termination_reason,
            Some(TerminationReason::HitWall | TerminationReason::HitOwnBody)
        );
        if !collided {
            self.timesteps_survived += 1;
        }
        if result.termination_reason.is_some() {
            self.termination_reason = result.termination_reason;
        }
    }

    /// Mean reward per surviving timestep, `None` before the first one
    pub fn mean_reward(&self) -> Option<f32> {
        (self.timesteps_survived > 0)
            .then(|| self.sum_episode_rewards / self.timesteps_survived as f32)
    }
}
