//! UR Core - Rules engine for the Royal Game of Ur
//!
//! This crate provides the core game logic:
//! - Board representation (pile count plus a 16-bit path occupancy per side)
//! - Legal move generation and the move transition (captures, rosettes)
//! - Tetrahedral dice
//! - Greedy move-selection agents
//! - Text rendering and the turn loop

pub mod board;
pub mod rules;
pub mod dice;
pub mod agent;
pub mod display;
pub mod game;
pub mod error;

// Re-exports for convenient access
pub use board::{Options, Position, Side, Steps, FINISH, MAX_STEPS, ROSETTES, START_PILE, TILES};
pub use rules::{apply_move, is_consistent, legal_moves, play_move, MoveOutcome};
pub use dice::{roll, Dice};
pub use agent::{Agent, AgentKind, ClosestAgent, FarthestAgent};
pub use display::{render, BoardView};
pub use game::{play_game, GameOutcome, GameResult, GameState, Player, RollOutcome};
pub use error::UrError;
