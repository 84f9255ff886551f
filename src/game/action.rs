use serde::{Deserialize, Serialize};

use super::point::Point;

/// Compass heading of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit offset of one step in this direction (`y` grows south)
    pub fn offset(&self) -> Point {
        match self {
            Direction::North => Point::new(0, -1),
            Direction::East => Point::new(1, 0),
            Direction::South => Point::new(0, 1),
            Direction::West => Point::new(-1, 0),
        }
    }

    /// Heading after a 90° counter-clockwise turn, as seen on screen
    pub fn turned_left(&self) -> Direction {
        match self {
            Direction::North => Direction::West,
            Direction::West => Direction::South,
            Direction::South => Direction::East,
            Direction::East => Direction::North,
        }
    }

    /// Heading after a 90° clockwise turn, as seen on screen
    pub fn turned_right(&self) -> Direction {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    /// Returns the direction pointing the other way
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}

/// Action an agent can take, relative to the current heading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    #[default]
    MaintainDirection,
    TurnLeft,
    TurnRight,
}

impl Action {
    /// Discrete action space in index order
    pub const ALL: [Action; 3] = [Action::MaintainDirection, Action::TurnLeft, Action::TurnRight];

    /// Convert a discrete action index to an action
    ///
    /// - 0 → MaintainDirection
    /// - 1 → TurnLeft
    /// - 2 → TurnRight
    /// - other → None
    pub fn from_index(idx: usize) -> Option<Action> {
        Self::ALL.get(idx).copied()
    }

    pub fn index(&self) -> usize {
        match self {
            Action::MaintainDirection => 0,
            Action::TurnLeft => 1,
            Action::TurnRight => 2,
        }
    }
}
