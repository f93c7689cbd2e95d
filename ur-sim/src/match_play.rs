//! Match play - many games between two agents
//!
//! Level 2 - Phase-level implementation

use rayon::prelude::*;
use serde::Serialize;
use ur_core::{AgentKind, GameResult};

use crate::config::SimConfig;
use crate::game_runner::GameRunner;

/// Summary of one game in a match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    pub game_index: usize,
    pub seed: u64,
    pub result: GameResult,
    pub rolls: u64,
}

/// Result of a match (multiple games)
#[derive(Clone, Debug, Serialize)]
pub struct MatchResult {
    pub first: AgentKind,
    pub second: AgentKind,
    /// Wins for the agent rolling first
    pub first_wins: u32,
    /// Wins for the agent rolling second
    pub second_wins: u32,
    /// Games cut off by the roll limit
    pub draws: u32,
    /// Average game length in rolls
    pub avg_rolls: f32,
    /// Total games played
    pub games_played: u32,
    /// Individual games, in game order
    pub games: Vec<GameRecord>,
}

impl MatchResult {
    /// Create empty result
    pub fn empty(first: AgentKind, second: AgentKind) -> Self {
        Self {
            first,
            second,
            first_wins: 0,
            second_wins: 0,
            draws: 0,
            avg_rolls: 0.0,
            games_played: 0,
            games: Vec::new(),
        }
    }

    /// Get win rate for the first player
    pub fn first_win_rate(&self) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            self.first_wins as f32 / self.games_played as f32
        }
    }

    /// Get win rate for the second player
    pub fn second_win_rate(&self) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            self.second_wins as f32 / self.games_played as f32
        }
    }

    /// Get draw rate
    pub fn draw_rate(&self) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            self.draws as f32 / self.games_played as f32
        }
    }
}

/// Play a match as described by `config` (Level 2 phase)
///
/// Game `i` is seeded with `seed + i`, so the outcome does not depend on
/// whether games run sequentially or in parallel.
pub fn play_match(config: &SimConfig) -> MatchResult {
    if config.games == 0 {
        return MatchResult::empty(config.first, config.second);
    }

    let base_seed = config.seed.unwrap_or_else(rand::random);
    tracing::info!(
        "Starting match: {} vs {} ({} games, seed={})",
        config.first,
        config.second,
        config.games,
        base_seed
    );

    let runner = GameRunner::new(config.first, config.second, config.max_rolls);
    let records = if config.parallel {
        execute_games_parallel(&runner, base_seed, config.games)
    } else {
        execute_games(&runner, base_seed, config.games)
    };

    aggregate_results(config.first, config.second, records)
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Execute games sequentially
fn execute_games(runner: &GameRunner, base_seed: u64, games: usize) -> Vec<GameRecord> {
    (0..games)
        .map(|i| play_single_game(runner, base_seed, i))
        .collect()
}

/// Execute games in parallel using rayon
fn execute_games_parallel(runner: &GameRunner, base_seed: u64, games: usize) -> Vec<GameRecord> {
    (0..games)
        .into_par_iter()
        .map(|i| play_single_game(runner, base_seed, i))
        .collect()
}

/// Play game `game_index` of the match
fn play_single_game(runner: &GameRunner, base_seed: u64, game_index: usize) -> GameRecord {
    let seed = base_seed.wrapping_add(game_index as u64);
    let outcome = runner.play_seeded(seed);
    GameRecord {
        game_index,
        seed,
        result: outcome.result,
        rolls: outcome.rolls,
    }
}

/// Aggregate game records into a match result
fn aggregate_results(first: AgentKind, second: AgentKind, games: Vec<GameRecord>) -> MatchResult {
    let mut first_wins = 0u32;
    let mut second_wins = 0u32;
    let mut draws = 0u32;
    let mut total_rolls = 0u64;

    for record in &games {
        total_rolls += record.rolls;
        match record.result {
            GameResult::FirstWins => first_wins += 1,
            GameResult::SecondWins => second_wins += 1,
            GameResult::Ongoing => draws += 1,
        }
    }

    let games_played = games.len() as u32;
    let avg_rolls = if games_played > 0 {
        total_rolls as f32 / games_played as f32
    } else {
        0.0
    };

    MatchResult {
        first,
        second,
        first_wins,
        second_wins,
        draws,
        avg_rolls,
        games_played,
        games,
    }
}
