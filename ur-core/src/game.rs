//! Game state and the turn loop
//!
//! A roll goes: throw the dice, compute the options, ask the agent, apply
//! the move. The mover keeps the turn only after landing on a rosette.

use serde::{Deserialize, Serialize};

use crate::agent::Agent;
use crate::board::{Options, Position, Side, Steps};
use crate::dice::Dice;
use crate::display::BoardView;
use crate::error::UrError;
use crate::rules::{is_consistent, legal_moves, play_move, MoveOutcome};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Seat at the table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    First = 0,
    Second = 1,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }
}

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    FirstWins,
    SecondWins,
}

impl GameResult {
    pub fn winner(self) -> Option<Player> {
        match self {
            GameResult::FirstWins => Some(Player::First),
            GameResult::SecondWins => Some(Player::Second),
            GameResult::Ongoing => None,
        }
    }
}

/// What a single roll amounted to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollOutcome {
    /// Nothing to move; the agent is not consulted
    ZeroRoll,
    /// Every piece is blocked
    NoMoves,
    /// The agent gave no choice or one outside the legal set
    Forfeit { choice: Option<Position> },
    Moved(MoveOutcome),
}

impl RollOutcome {
    /// Whether the same player rolls next
    pub fn extra_turn(&self) -> bool {
        matches!(self, RollOutcome::Moved(mv) if mv.extra_turn)
    }
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Both sides plus whose roll it is
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    sides: [Side; 2],
    current_player: Player,
    rolls: u64,
}

impl GameState {
    /// Fresh game, first player to roll
    pub fn new() -> Self {
        Self {
            sides: [Side::START, Side::START],
            current_player: Player::First,
            rolls: 0,
        }
    }

    /// Resume from arbitrary sides
    pub fn from_sides(first: Side, second: Side, to_move: Player) -> Result<Self, UrError> {
        if !is_consistent(&first, &second) {
            return Err(UrError::InvalidSide(
                "both sides occupy the same shared cell".to_string(),
            ));
        }
        Ok(Self {
            sides: [first, second],
            current_player: to_move,
            rolls: 0,
        })
    }

    pub fn side(&self, player: Player) -> &Side {
        &self.sides[player as usize]
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Rolls taken so far, including zero rolls and forfeits
    pub fn rolls(&self) -> u64 {
        self.rolls
    }

    pub fn result(&self) -> GameResult {
        if self.sides[0].is_complete() {
            GameResult::FirstWins
        } else if self.sides[1].is_complete() {
            GameResult::SecondWins
        } else {
            GameResult::Ongoing
        }
    }

    pub fn is_over(&self) -> bool {
        self.result() != GameResult::Ongoing
    }

    /// (mover, opponent) for the player about to roll
    pub fn perspective(&self) -> (Side, Side) {
        let me = self.sides[self.current_player as usize];
        let other = self.sides[self.current_player.opponent() as usize];
        (me, other)
    }

    /// Legal options for the player about to roll
    pub fn legal_moves(&self, steps: Steps) -> Options {
        let (me, other) = self.perspective();
        legal_moves(&me, &other, steps)
    }

    /// Board with the player about to roll on top
    pub fn view(&self) -> BoardView<'_> {
        BoardView::new(
            &self.sides[self.current_player as usize],
            &self.sides[self.current_player.opponent() as usize],
        )
    }

    fn split_mut(&mut self) -> (&mut Side, &mut Side) {
        let [first, second] = &mut self.sides;
        match self.current_player {
            Player::First => (first, second),
            Player::Second => (second, first),
        }
    }

    /// Play out one roll of `steps` for the current player
    pub fn play_roll(&mut self, agent: &mut dyn Agent, steps: Steps) -> RollOutcome {
        self.rolls += 1;
        tracing::debug!("{} rolls a {}", agent.name(), steps);

        let outcome = self.resolve_roll(agent, steps);
        match outcome {
            RollOutcome::ZeroRoll => {}
            RollOutcome::NoMoves => tracing::debug!("No legal moves."),
            RollOutcome::Forfeit { choice } => {
                tracing::debug!("{} forfeits with {:?}", agent.name(), choice)
            }
            RollOutcome::Moved(mv) => {
                tracing::debug!(
                    "{} moves {} -> {}{}{}",
                    agent.name(),
                    mv.start,
                    mv.end,
                    if mv.captured { " (capture)" } else { "" },
                    if mv.extra_turn { " (rosette)" } else { "" },
                );
            }
        }

        if !outcome.extra_turn() {
            self.current_player = self.current_player.opponent();
        }
        outcome
    }

    fn resolve_roll(&mut self, agent: &mut dyn Agent, steps: Steps) -> RollOutcome {
        if steps == 0 {
            return RollOutcome::ZeroRoll;
        }

        let options = self.legal_moves(steps);
        if options.is_empty() {
            return RollOutcome::NoMoves;
        }

        let (me, other) = self.perspective();
        match agent.choose_move(&me, &other, steps, options) {
            Some(start) if options.contains(start) => {
                let (me, other) = self.split_mut();
                let mv = play_move(me, other, start, steps);
                debug_assert!(is_consistent(me, other));
                RollOutcome::Moved(mv)
            }
            choice => RollOutcome::Forfeit { choice },
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// FULL GAMES
// ============================================================================

/// Outcome of a complete (or abandoned) game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub result: GameResult,
    pub rolls: u64,
    pub final_state: GameState,
}

/// Play until a side bears off every piece or `max_rolls` is reached
///
/// A game cut off by the roll limit reports `GameResult::Ongoing`.
pub fn play_game(
    first: &mut dyn Agent,
    second: &mut dyn Agent,
    dice: &mut Dice,
    max_rolls: u64,
) -> GameOutcome {
    let mut state = GameState::new();

    while !state.is_over() && state.rolls() < max_rolls {
        tracing::trace!("\n{}", state.view());
        let steps = dice.roll();
        let agent: &mut dyn Agent = match state.current_player() {
            Player::First => &mut *first,
            Player::Second => &mut *second,
        };
        state.play_roll(agent, steps);
    }

    tracing::debug!("Ended after {} rolls.", state.rolls());
    GameOutcome {
        result: state.result(),
        rolls: state.rolls(),
        final_state: state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{ClosestAgent, FarthestAgent};
    use crate::board::TILES;

    /// Always answers with the same position
    struct FixedAgent(Option<Position>);

    impl Agent for FixedAgent {
        fn name(&self) -> &str {
            "Fixed"
        }

        fn choose_move(&mut self, _: &Side, _: &Side, _: Steps, _: Options) -> Option<Position> {
            self.0
        }
    }

    #[test]
    fn test_game_creation() {
        let game = GameState::new();
        assert_eq!(game.current_player(), Player::First);
        assert_eq!(game.result(), GameResult::Ongoing);
        assert_eq!(game.rolls(), 0);
        assert_eq!(*game.side(Player::First), Side::START);
    }

    #[test]
    fn test_legal_moves_follow_the_mover() {
        let first = Side::with_pieces(6, &[5]).unwrap();
        let second = Side::with_pieces(6, &[9]).unwrap();
        let mut game = GameState::from_sides(first, second, Player::First).unwrap();
        assert_eq!(game.legal_moves(2).iter().collect::<Vec<_>>(), vec![0, 5]);

        // Second player's turn: the 9 piece and the pile, from its own side
        game.play_roll(&mut FixedAgent(None), 1);
        assert_eq!(game.current_player(), Player::Second);
        assert_eq!(game.legal_moves(1), legal_moves(&second, &first, 1));
        assert_eq!(game.legal_moves(1).iter().collect::<Vec<_>>(), vec![0, 9]);
        assert!(game.legal_moves(0).is_empty());
    }

    #[test]
    fn test_zero_roll_passes() {
        let mut game = GameState::new();
        let outcome = game.play_roll(&mut FarthestAgent::new(), 0);
        assert_eq!(outcome, RollOutcome::ZeroRoll);
        assert_eq!(game.current_player(), Player::Second);
        assert_eq!(game.rolls(), 1);
    }

    #[test]
    fn test_rosette_keeps_turn() {
        let mut game = GameState::new();
        let outcome = game.play_roll(&mut FarthestAgent::new(), 4);
        assert!(outcome.extra_turn());
        assert_eq!(game.current_player(), Player::First);
        assert_eq!(game.side(Player::First).remaining(), TILES - 1);
        assert!(game.side(Player::First).is_occupied(4));
    }

    #[test]
    fn test_plain_move_passes_turn() {
        let mut game = GameState::new();
        let outcome = game.play_roll(&mut FarthestAgent::new(), 2);
        assert!(matches!(outcome, RollOutcome::Moved(mv) if mv.end == 2));
        assert_eq!(game.current_player(), Player::Second);
    }

    #[test]
    fn test_invalid_choice_forfeits() {
        let mut game = GameState::new();
        let outcome = game.play_roll(&mut FixedAgent(Some(5)), 2);
        assert_eq!(outcome, RollOutcome::Forfeit { choice: Some(5) });
        assert_eq!(*game.side(Player::First), Side::START);
        assert_eq!(game.current_player(), Player::Second);

        let outcome = game.play_roll(&mut FixedAgent(None), 2);
        assert_eq!(outcome, RollOutcome::Forfeit { choice: None });
        assert_eq!(game.current_player(), Player::First);
    }

    #[test]
    fn test_no_moves() {
        // Every piece blocked: one at 14 needing exactly 1, one at 13 behind it
        let first = Side::with_pieces(0, &[13, 14]).unwrap();
        let mut game = GameState::from_sides(first, Side::START, Player::First).unwrap();
        let outcome = game.play_roll(&mut FarthestAgent::new(), 3);
        assert_eq!(outcome, RollOutcome::NoMoves);
        assert_eq!(game.current_player(), Player::Second);
    }

    #[test]
    fn test_capture_via_driver() {
        let first = Side::with_pieces(0, &[5]).unwrap();
        let second = Side::with_pieces(0, &[9]).unwrap();
        let mut game = GameState::from_sides(first, second, Player::First).unwrap();
        let outcome = game.play_roll(&mut ClosestAgent::new(), 4);
        assert!(matches!(outcome, RollOutcome::Moved(mv) if mv.captured));
        assert_eq!(game.side(Player::Second).remaining(), 1);
    }

    #[test]
    fn test_from_sides_rejects_collision() {
        let a = Side::with_pieces(0, &[7]).unwrap();
        let b = Side::with_pieces(0, &[7]).unwrap();
        assert!(GameState::from_sides(a, b, Player::First).is_err());
    }

    #[test]
    fn test_finished_game_result() {
        let game =
            GameState::from_sides(Side::START, Side::COMPLETE, Player::First).unwrap();
        assert_eq!(game.result(), GameResult::SecondWins);
        assert_eq!(game.result().winner(), Some(Player::Second));
    }

    #[test]
    fn test_play_full_game() {
        let mut dice = Dice::seeded(42);
        let outcome = play_game(
            &mut FarthestAgent::new(),
            &mut ClosestAgent::new(),
            &mut dice,
            100_000,
        );
        assert_ne!(outcome.result, GameResult::Ongoing);
        assert!(outcome.rolls > 0);
        let winner = outcome.result.winner().unwrap();
        assert!(outcome.final_state.side(winner).is_complete());
        assert!(!outcome.final_state.side(winner.opponent()).is_complete());
    }

    #[test]
    fn test_play_game_roll_limit() {
        let mut dice = Dice::seeded(1);
        let outcome = play_game(
            &mut FarthestAgent::new(),
            &mut ClosestAgent::new(),
            &mut dice,
            5,
        );
        assert_eq!(outcome.result, GameResult::Ongoing);
        assert_eq!(outcome.rolls, 5);
    }

    #[test]
    fn test_seeded_games_repeat() {
        let play = |seed| {
            play_game(
                &mut FarthestAgent::new(),
                &mut ClosestAgent::new(),
                &mut Dice::seeded(seed),
                100_000,
            )
        };
        assert_eq!(play(9), play(9));
    }
}
