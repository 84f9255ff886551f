use anyhow::{Context, Result, anyhow};
use clap::Parser;
use grid_snake::agent::RandomAgent;
use grid_snake::game::{Environment, EnvironmentConfig, levels};
use grid_snake::modes::{SimulateConfig, SimulateMode};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Headless Snake environment runner")]
struct Cli {
    /// Level map file, one row per line
    #[arg(long, conflicts_with = "builtin")]
    level: Option<PathBuf>,

    /// Built-in level (classic, open, pillars)
    #[arg(long, default_value = "classic")]
    builtin: String,

    /// Environment configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of episodes to play
    #[arg(long, default_value = "10")]
    episodes: usize,

    /// Seed for the environment and the agent (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Log a summary every N episodes
    #[arg(long, default_value = "1")]
    log_frequency: usize,

    /// Print every episode's statistics as a JSON line
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("grid_snake=info")),
        )
        .init();

    let cli = Cli::parse();

    let level_map = match &cli.level {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read level map {}", path.display()))?;
            levels::parse_level_text(&text)
        }
        None => levels::builtin(&cli.builtin)
            .ok_or_else(|| {
                anyhow!(
                    "Unknown built-in level {:?}, expected one of {:?}",
                    cli.builtin,
                    levels::BUILTIN_NAMES
                )
            })?
            .iter()
            .map(|row| row.to_string())
            .collect(),
    };

    let config = match &cli.config {
        Some(path) => EnvironmentConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EnvironmentConfig::default(),
    };

    let (env, agent) = match cli.seed {
        Some(seed) => (
            Environment::with_seed(&level_map, config, seed),
            RandomAgent::with_seed(seed.wrapping_add(1)),
        ),
        None => (
            Environment::from_entropy(&level_map, config),
            RandomAgent::from_entropy(),
        ),
    };
    let env = env.context("Failed to create environment")?;

    tracing::info!(
        size = env.field().size(),
        episodes = cli.episodes,
        seed = ?cli.seed,
        "starting simulation"
    );

    let simulate_config = SimulateConfig {
        log_frequency: cli.log_frequency,
        ..SimulateConfig::new(cli.episodes)
    };
    let mut mode = SimulateMode::new(simulate_config, env, agent);
    let episodes = mode.run();

    if cli.json {
        for stats in &episodes {
            let line = serde_json::to_string(stats).context("Failed to serialize statistics")?;
            println!("{line}");
        }
    }

    let fruits: u32 = episodes.iter().map(|stats| stats.fruits_eaten).sum();
    tracing::info!(episodes = episodes.len(), fruits, "simulation complete");

    Ok(())
}
