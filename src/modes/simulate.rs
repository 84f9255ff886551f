//! Headless simulation mode
//!
//! Runs an agent in the environment for a number of episodes without any
//! rendering and collects [`EpisodeStatistics`] for every episode.
//!
//! # Example
//!
//! ```rust
//! use grid_snake::agent::RandomAgent;
//! use grid_snake::game::{Environment, EnvironmentConfig, levels};
//! use grid_snake::modes::{SimulateConfig, SimulateMode};
//!
//! let env = Environment::with_seed(&levels::CLASSIC_10, EnvironmentConfig::default(), 7).unwrap();
//! let mut mode = SimulateMode::new(SimulateConfig::new(3), env, RandomAgent::with_seed(7));
//! let episodes = mode.run();
//! assert_eq!(episodes.len(), 3);
//! ```

use rand::Rng;
use tracing::info;

use crate::agent::Agent;
use crate::game::Environment;
use crate::metrics::EpisodeStatistics;

/// Configuration for simulation mode
#[derive(Debug, Clone)]
pub struct SimulateConfig {
    /// Number of episodes to play
    pub num_episodes: usize,

    /// Log a summary every N episodes (0 is treated as 1)
    pub log_frequency: usize,
}

impl SimulateConfig {
    pub fn new(num_episodes: usize) -> Self {
        Self {
            num_episodes,
            log_frequency: 1,
        }
    }
}

/// Plays episodes with one agent in one environment
pub struct SimulateMode<A, R> {
    env: Environment<R>,
    agent: A,
    config: SimulateConfig,
}

impl<A: Agent, R: Rng> SimulateMode<A, R> {
    pub fn new(config: SimulateConfig, env: Environment<R>, agent: A) -> Self {
        Self { env, agent, config }
    }

    /// Play all configured episodes
    pub fn run(&mut self) -> Vec<EpisodeStatistics> {
        let log_frequency = self.config.log_frequency.max(1);

        (0..self.config.num_episodes)
            .map(|episode| {
                let stats = self.run_episode();
                if (episode + 1) % log_frequency == 0 {
                    info!(
                        episode = episode + 1,
                        timesteps = stats.timesteps_survived,
                        fruits = stats.fruits_eaten,
                        reward = stats.sum_episode_rewards,
                        reason = ?stats.termination_reason,
                        "episode finished"
                    );
                }
                stats
            })
            .collect()
    }

    /// Play a single episode to its end
    ///
    /// Without a `max_step_limit` this only returns once the agent collides
    /// or clears the board.
    pub fn run_episode(&mut self) -> EpisodeStatistics {
        let mut stats = EpisodeStatistics::new();
        let mut result = self.env.new_episode();
        self.agent.reset_state();

        while !result.is_episode_end {
            let action = self.agent.next_action(&result.observation, result.reward);
            self.env.choose_action(action);
            result = self.env.timestep();
            stats.record_timestep(Some(action), &result);
        }
        stats.termination_reason = result.termination_reason;

        self.agent.end_episode();
        stats
    }

    pub fn env(&self) -> &Environment<R> {
        &self.env
    }

    pub fn agent(&self) -> &A {
        &self.agent
    }
}
