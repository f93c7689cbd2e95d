//! UR Sim - Batch simulation of agent-vs-agent games
//!
//! This crate runs many independent games:
//! - Configuration (agents, game count, seeds, roll limit)
//! - Single games with fresh agents and dice per game
//! - Matches executed sequentially or in parallel with rayon
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 2: play_match (phases)
//! - Level 3: play_single_game, aggregate_results (steps)
//! - Level 4: utilities, configuration

mod config;
mod game_runner;
mod match_play;

pub use config::{SimConfig, DEFAULT_MAX_ROLLS};
pub use game_runner::GameRunner;
pub use match_play::{play_match, GameRecord, MatchResult};
