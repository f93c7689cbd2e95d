//! UR CLI - Command-line interface
//!
//! Commands:
//! - play: Play one game against a built-in agent
//! - simulate: Run many games between two built-in agents

mod interactive;
mod play_cmd;
mod simulate_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ur")]
#[command(about = "The Royal Game of Ur")]
struct Cli {
    /// Random seed for reproducible dice
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game against a built-in agent
    Play(play_cmd::PlayArgs),
    /// Simulate many games between built-in agents
    Simulate(simulate_cmd::SimulateArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, cli.seed),
        Commands::Simulate(args) => simulate_cmd::run(args, cli.seed),
    }
}
