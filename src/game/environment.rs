use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{
    action::{Action, Direction},
    config::EnvironmentConfig,
    error::{EnvironmentError, LevelError},
    field::{CellType, Field},
    point::Point,
    snake::Snake,
};
use crate::rl::observation::{Observation, create_observation};

/// Why an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// The head ran into a wall or off the board
    HitWall,
    /// The head ran into a body cell
    ///
    /// Also covers `s` cells of the level map that are not part of the
    /// initial snake, which stay on the field as obstacles.
    HitOwnBody,
    /// No empty cell was left for the next fruit
    BoardCleared,
    /// The episode reached `max_step_limit` timesteps
    TimestepLimitExceeded,
}

/// Result of a timestep
#[derive(Debug, Clone, PartialEq)]
pub struct TimestepResult {
    /// Field state after the timestep
    pub observation: Observation,
    /// Reward for this timestep
    pub reward: f32,
    /// Whether the episode has ended
    pub is_episode_end: bool,
    /// Set once the episode has ended
    pub termination_reason: Option<TerminationReason>,
    /// Whether the snake ate a fruit this timestep
    pub ate_fruit: bool,
}

/// The Snake environment
///
/// Owns the field and the snake and keeps them in sync: every timestep
/// updates the snake first, then feeds the old head, old tail and new head
/// into [`Field::update_field_repr`].
pub struct Environment<R = ChaCha8Rng> {
    config: EnvironmentConfig,
    /// Parsed level map, cloned at the start of every episode
    level: Field,
    initial_head: Point,
    field: Field,
    snake: Snake,
    rng: R,
    pending_action: Action,
    timestep_index: u32,
    termination_reason: Option<TerminationReason>,
}

impl Environment<ChaCha8Rng> {
    /// Create an environment with a seeded random source
    pub fn with_seed<S: AsRef<str>>(
        level_map: &[S],
        config: EnvironmentConfig,
        seed: u64,
    ) -> Result<Self, EnvironmentError> {
        Self::new(level_map, config, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Create an environment seeded from OS entropy
    pub fn from_entropy<S: AsRef<str>>(
        level_map: &[S],
        config: EnvironmentConfig,
    ) -> Result<Self, EnvironmentError> {
        Self::new(level_map, config, ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> Environment<R> {
    /// Create a new environment and start its first episode
    ///
    /// The level map is parsed and validated once: it must contain exactly
    /// one snake head, and a straight snake of the configured length must
    /// fit south of it on empty or body cells.
    pub fn new<S: AsRef<str>>(
        level_map: &[S],
        config: EnvironmentConfig,
        rng: R,
    ) -> Result<Self, EnvironmentError> {
        config.validate()?;
        let level = Field::create_level(level_map)?;
        let initial_head = validate_snake_start(&level, config.initial_snake_length)?;

        let snake = Snake::new(initial_head, Direction::North, config.initial_snake_length);
        let mut env = Self {
            field: level.clone(),
            level,
            initial_head,
            snake,
            config,
            rng,
            pending_action: Action::MaintainDirection,
            timestep_index: 0,
            termination_reason: None,
        };
        env.new_episode();
        Ok(env)
    }

    /// Reset the environment to the start of a new episode
    pub fn new_episode(&mut self) -> TimestepResult {
        self.field = self.level.clone();
        self.snake = Snake::new(
            self.initial_head,
            Direction::North,
            self.config.initial_snake_length,
        );
        self.field.place_snake(&self.snake);
        self.pending_action = Action::MaintainDirection;
        self.timestep_index = 0;
        self.termination_reason = None;

        if !self.generate_fruit() {
            self.termination_reason = Some(TerminationReason::BoardCleared);
        }

        debug!(head = %self.snake.head(), length = self.snake.length(), "new episode");
        self.result(0.0, false)
    }

    /// Record the action to apply at the next timestep
    pub fn choose_action(&mut self, action: Action) {
        self.pending_action = action;
    }

    /// Execute one timestep
    ///
    /// The pending action is consumed; a timestep without a fresh
    /// [`Environment::choose_action`] call keeps the current direction.
    pub fn timestep(&mut self) -> TimestepResult {
        if self.termination_reason.is_some() {
            return self.result(0.0, false);
        }

        self.timestep_index += 1;
        match std::mem::take(&mut self.pending_action) {
            Action::MaintainDirection => {}
            Action::TurnLeft => self.snake.turn_left(),
            Action::TurnRight => self.snake.turn_right(),
        }

        let old_head = self.snake.head();
        let old_tail = self.snake.tail();
        let new_head = self.snake.next_point();

        // The tail cell counts as free: it is vacated by the same move
        let collision = match self.field.try_get(new_head) {
            None | Some(CellType::Wall) => Some(TerminationReason::HitWall),
            Some(CellType::SnakeBody | CellType::SnakeHead) if new_head != old_tail => {
                Some(TerminationReason::HitOwnBody)
            }
            _ => None,
        };

        if let Some(reason) = collision {
            debug!(
                timestep = self.timestep_index,
                at = %new_head,
                ?reason,
                "snake collided"
            );
            self.termination_reason = Some(reason);
            return self.result(self.config.death_penalty, false);
        }

        let ate_fruit = self.field.get(new_head) == CellType::Fruit;
        let reward = if ate_fruit {
            self.snake.grow();
            self.field.update_field_repr(old_head, None, new_head);
            if !self.generate_fruit() {
                debug!(timestep = self.timestep_index, "board cleared");
                self.termination_reason = Some(TerminationReason::BoardCleared);
            }
            self.config.fruit_reward
        } else {
            self.snake.move_forward();
            self.field.update_field_repr(old_head, Some(old_tail), new_head);
            self.config.timestep_reward
        };

        if self.termination_reason.is_none()
            && self
                .config
                .max_step_limit
                .is_some_and(|limit| self.timestep_index >= limit)
        {
            debug!(timestep = self.timestep_index, "timestep limit reached");
            self.termination_reason = Some(TerminationReason::TimestepLimitExceeded);
        }

        trace!(
            timestep = self.timestep_index,
            head = %new_head,
            length = self.snake.length(),
            reward,
            "timestep"
        );
        self.result(reward, ate_fruit)
    }

    /// Put a fruit on a random empty cell, `false` if the board is full
    fn generate_fruit(&mut self) -> bool {
        match self.field.get_random_empty_cell(&mut self.rng) {
            Some(point) => {
                self.field.set(point, CellType::Fruit);
                true
            }
            None => false,
        }
    }

    fn result(&self, reward: f32, ate_fruit: bool) -> TimestepResult {
        TimestepResult {
            observation: self.observation(),
            reward,
            is_episode_end: self.termination_reason.is_some(),
            termination_reason: self.termination_reason,
            ate_fruit,
        }
    }

    /// Get current observation without stepping
    pub fn observation(&self) -> Observation {
        create_observation(&self.field)
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn config(&self) -> &EnvironmentConfig {
        &self.config
    }

    pub fn initial_snake_length(&self) -> usize {
        self.config.initial_snake_length
    }

    /// Timesteps taken in the current episode
    pub fn timestep_index(&self) -> u32 {
        self.timestep_index
    }

    pub fn is_game_over(&self) -> bool {
        self.termination_reason.is_some()
    }

    pub fn termination_reason(&self) -> Option<TerminationReason> {
        self.termination_reason
    }
}

/// Check that the level declares one head with room for the initial body
fn validate_snake_start(level: &Field, length: usize) -> Result<Point, LevelError> {
    let heads = level
        .cells()
        .filter(|&(_, cell)| cell == CellType::SnakeHead)
        .count();
    if heads > 1 {
        return Err(LevelError::MultipleSnakeHeads { count: heads });
    }

    let head = level.find_snake_head()?;
    let fits = Snake::new(head, Direction::North, length)
        .body()
        .skip(1)
        .all(|segment| {
            matches!(
                level.try_get(segment),
                Some(CellType::Empty | CellType::SnakeBody)
            )
        });
    if !fits {
        return Err(LevelError::SnakeDoesNotFit { head, length });
    }

    Ok(head)
}
