//! Simulate command - batch games between built-in agents
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), report_results()
//! - Level 4: formatting utilities

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Args;

use ur_core::AgentKind;
use ur_sim::{play_match, MatchResult, SimConfig};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SimulateArgs {
    /// JSON config file; flags below override its fields
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of games to play
    #[arg(long)]
    pub games: Option<usize>,

    /// Agent rolling first (farthest, closest)
    #[arg(long)]
    pub first: Option<AgentKind>,

    /// Agent rolling second (farthest, closest)
    #[arg(long)]
    pub second: Option<AgentKind>,

    /// Games still running after this many rolls count as draws
    #[arg(long)]
    pub max_rolls: Option<u64>,

    /// Run games on a single thread
    #[arg(long)]
    pub sequential: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run simulate command
pub fn run(args: SimulateArgs, seed: Option<u64>) -> Result<()> {
    let config = build_config(&args, seed)?;

    let start = Instant::now();
    let results = play_match(&config);
    tracing::info!(
        "Played {} games in {:.2}s",
        results.games_played,
        start.elapsed().as_secs_f64()
    );

    report_results(&results, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Merge the config file (if any) with command-line overrides
fn build_config(args: &SimulateArgs, seed: Option<u64>) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };

    if let Some(games) = args.games {
        config.games = games;
    }
    if let Some(first) = args.first {
        config.first = first;
    }
    if let Some(second) = args.second {
        config.second = second;
    }
    if let Some(max_rolls) = args.max_rolls {
        config.max_rolls = max_rolls;
    }
    if args.sequential {
        config.parallel = false;
    }
    if seed.is_some() {
        config.seed = seed;
    }
    Ok(config)
}

/// Report match results
fn report_results(results: &MatchResult, json: bool) -> Result<()> {
    if json {
        print_json_results(results)
    } else {
        print_text_results(results);
        Ok(())
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Print results as JSON (per-game records omitted)
fn print_json_results(results: &MatchResult) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonOutput {
        first: AgentKind,
        second: AgentKind,
        total_games: u32,
        first_wins: u32,
        second_wins: u32,
        draws: u32,
        avg_rolls: f32,
        first_win_rate: f32,
    }

    let output = JsonOutput {
        first: results.first,
        second: results.second,
        total_games: results.games_played,
        first_wins: results.first_wins,
        second_wins: results.second_wins,
        draws: results.draws,
        avg_rolls: results.avg_rolls,
        first_win_rate: results.first_win_rate(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Print results as text
fn print_text_results(results: &MatchResult) {
    println!(
        "First player won {} / {}",
        results.first_wins, results.games_played
    );
    println!("\n=== Match Results ===");
    println!("First:        {}", results.first);
    println!("Second:       {}", results.second);
    println!(
        "First wins:   {} ({:.1}%)",
        results.first_wins,
        results.first_win_rate() * 100.0
    );
    println!(
        "Second wins:  {} ({:.1}%)",
        results.second_wins,
        results.second_win_rate() * 100.0
    );
    if results.draws > 0 {
        println!(
            "Unfinished:   {} ({:.1}%)",
            results.draws,
            results.draw_rate() * 100.0
        );
    }
    println!("Avg length:   {:.1} rolls", results.avg_rolls);
}
