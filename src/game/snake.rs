use std::collections::VecDeque;

use super::action::Direction;
use super::point::Point;

/// Length of a freshly spawned snake unless configured otherwise
pub const DEFAULT_SNAKE_LENGTH: usize = 3;

/// The snake in the game
///
/// The body is ordered head first. Movement never checks bounds or
/// collisions; the environment does that before committing a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Body segments, with head at the front
    body: VecDeque<Point>,
    /// Current direction of movement
    direction: Direction,
}

impl Snake {
    /// Create a new snake with given head position and heading
    ///
    /// The body is laid out in a straight line behind the head, so a
    /// north-facing snake extends southward.
    ///
    /// # Panics
    ///
    /// Panics if `length` is zero.
    pub fn new(head: Point, direction: Direction, length: usize) -> Self {
        assert!(length >= 1, "snake length must be at least 1");

        let back = direction.opposite().offset();
        let body = std::iter::successors(Some(head), |&segment| Some(segment + back))
            .take(length)
            .collect();

        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Point {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Point {
        self.body[self.body.len() - 1]
    }

    /// Get the length of the snake
    pub fn length(&self) -> usize {
        self.body.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Body segments from head to tail
    pub fn body(&self) -> impl Iterator<Item = Point> + '_ {
        self.body.iter().copied()
    }

    /// Get the point the snake will move to at its next step
    pub fn next_point(&self) -> Point {
        self.head() + self.direction.offset()
    }

    /// At the next step, take a left turn relative to the current direction
    pub fn turn_left(&mut self) {
        self.direction = self.direction.turned_left();
    }

    /// At the next step, take a right turn relative to the current direction
    pub fn turn_right(&mut self) {
        self.direction = self.direction.turned_right();
    }

    /// Move one step forward, keeping the length
    pub fn move_forward(&mut self) {
        let next = self.next_point();
        self.body.push_front(next);
        self.body.pop_back();
    }

    /// Move one step forward, keeping the tail (length + 1)
    pub fn grow(&mut self) {
        let next = self.next_point();
        self.body.push_front(next);
    }
}
