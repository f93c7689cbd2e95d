//! Game runner - executes single games
//!
//! Level 3 - Step-level implementation

use ur_core::{play_game, AgentKind, Dice, GameOutcome};

/// Plays games between two built-in agents
pub struct GameRunner {
    first: AgentKind,
    second: AgentKind,
    max_rolls: u64,
}

impl GameRunner {
    /// Create a new game runner
    pub fn new(first: AgentKind, second: AgentKind, max_rolls: u64) -> Self {
        Self {
            first,
            second,
            max_rolls,
        }
    }

    /// Play a single game with fresh agents and dice seeded by `seed`
    pub fn play_seeded(&self, seed: u64) -> GameOutcome {
        let mut first = self.first.build();
        let mut second = self.second.build();
        let mut dice = Dice::seeded(seed);

        let outcome = play_game(first.as_mut(), second.as_mut(), &mut dice, self.max_rolls);
        tracing::trace!(seed, rolls = outcome.rolls, "{:?}", outcome.result);
        outcome
    }
}
