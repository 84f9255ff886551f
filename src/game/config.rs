use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::ConfigError;
use super::snake::DEFAULT_SNAKE_LENGTH;

/// Configuration for the environment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Initial length of the snake
    pub initial_snake_length: usize,

    // Rewards
    /// Reward for eating a fruit
    pub fruit_reward: f32,
    /// Reward for every other surviving timestep
    pub timestep_reward: f32,
    /// Reward for the timestep that ends in a collision, must be negative
    pub death_penalty: f32,

    /// End the episode after this many timesteps (`None` = unlimited)
    pub max_step_limit: Option<u32>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            initial_snake_length: DEFAULT_SNAKE_LENGTH,
            fruit_reward: 1.0,
            timestep_reward: 0.0,
            death_penalty: -1.0,
            max_step_limit: Some(1000),
        }
    }
}

impl EnvironmentConfig {
    /// Parse a configuration from TOML, missing keys take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EnvironmentConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_snake_length == 0 {
            return Err(ConfigError::Invalid(
                "initial_snake_length must be at least 1".to_string(),
            ));
        }
        if self.max_step_limit == Some(0) {
            return Err(ConfigError::Invalid(
                "max_step_limit must be positive, omit it to disable the limit".to_string(),
            ));
        }
        let rewards = [
            ("fruit_reward", self.fruit_reward),
            ("timestep_reward", self.timestep_reward),
            ("death_penalty", self.death_penalty),
        ];
        if let Some((name, value)) = rewards.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigError::Invalid(format!("{name} must be finite, got {value}")));
        }
        if self.death_penalty >= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "death_penalty must be negative, got {}",
                self.death_penalty
            )));
        }
        Ok(())
    }
}
