pub mod episode_stats;

pub use episode_stats::{ActionCounts, EpisodeStatistics};
