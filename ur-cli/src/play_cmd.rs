//! Play command - a human against a built-in agent
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_game_verbose()
//! - Level 3: narrate()

use anyhow::Result;
use clap::Args;

use ur_core::{render, Agent, AgentKind, Dice, GameResult, GameState, Player, RollOutcome};
use ur_sim::DEFAULT_MAX_ROLLS;

use crate::interactive::InteractiveAgent;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Your name
    #[arg(long, default_value = "Player")]
    pub name: String,

    /// Built-in agent to play against (farthest, closest)
    #[arg(long, default_value = "closest")]
    pub opponent: AgentKind,

    /// Let the opponent roll first
    #[arg(long)]
    pub second: bool,

    /// Maximum rolls before the game is abandoned
    #[arg(long, default_value_t = DEFAULT_MAX_ROLLS)]
    pub max_rolls: u64,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    println!("Hello, world! Welcome to the Royal Game of Ur.");

    let mut human = InteractiveAgent::stdio(args.name.clone());
    let mut opponent = args.opponent.build();
    let mut dice = Dice::new(seed);

    tracing::info!(
        "Starting game: {} vs {} (human rolls {})",
        args.name,
        args.opponent,
        if args.second { "second" } else { "first" }
    );

    let (first, second): (&mut dyn Agent, &mut dyn Agent) = if args.second {
        (opponent.as_mut(), &mut human)
    } else {
        (&mut human, opponent.as_mut())
    };

    let state = play_game_verbose(first, second, &mut dice, args.max_rolls);

    match state.result() {
        GameResult::FirstWins => println!("{} wins after {} rolls.", first.name(), state.rolls()),
        GameResult::SecondWins => println!("{} wins after {} rolls.", second.name(), state.rolls()),
        GameResult::Ongoing => println!("Game abandoned after {} rolls.", state.rolls()),
    }
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play one game, narrating every roll on stdout
fn play_game_verbose(
    first: &mut dyn Agent,
    second: &mut dyn Agent,
    dice: &mut Dice,
    max_rolls: u64,
) -> GameState {
    println!("{} is T (top row), {} is B (bottom row).", first.name(), second.name());
    let mut state = GameState::new();

    while !state.is_over() && state.rolls() < max_rolls {
        println!("{}", render(state.side(Player::First), state.side(Player::Second)));

        let agent: &mut dyn Agent = match state.current_player() {
            Player::First => &mut *first,
            Player::Second => &mut *second,
        };
        let steps = dice.roll();
        println!("{} rolls a {}.", agent.name(), steps);

        let outcome = state.play_roll(agent, steps);
        narrate(agent.name(), &outcome);
    }

    println!("{}", render(state.side(Player::First), state.side(Player::Second)));
    state
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn narrate(name: &str, outcome: &RollOutcome) {
    match outcome {
        RollOutcome::ZeroRoll => {}
        RollOutcome::NoMoves => println!("No legal moves."),
        RollOutcome::Forfeit { choice } => {
            if let Some(pos) = choice {
                println!("{} chooses {}.", name, pos);
            }
            println!("Oh no! An invalid move...");
        }
        RollOutcome::Moved(mv) => {
            println!("{} chooses {}.", name, mv.start);
            if mv.captured {
                println!("{} captures at {}!", name, mv.end);
            }
            if mv.extra_turn {
                println!("{} lands on a rosette and goes again.", name);
            }
        }
    }
}
