use thiserror::Error;

use super::point::Point;

/// Problems found while loading a level template
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LevelError {
    #[error("Level map is empty")]
    Empty,

    #[error("Unknown level map symbol: \"{symbol}\" at row {row}, column {column}")]
    UnknownSymbol {
        symbol: char,
        row: usize,
        column: usize,
    },

    #[error("Level map must be a square: row {row} has {width} cells, expected {size}")]
    NotSquare { row: usize, width: usize, size: usize },

    #[error("Initial snake position not specified on the level map")]
    NoInitialPosition,

    #[error("Level map must contain exactly one snake head, found {count}")]
    MultipleSnakeHeads { count: usize },

    #[error("Snake of length {length} with head at {head} does not fit on the level map")]
    SnakeDoesNotFit { head: Point, length: usize },
}

/// Problems found while loading an environment configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Problems found while building an environment
#[derive(Error, Debug)]
pub enum EnvironmentError {
    #[error(transparent)]
    Level(#[from] LevelError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
