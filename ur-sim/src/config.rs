//! Configuration types for batch simulation
//!
//! Level 4 - Utilities and configuration

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use ur_core::AgentKind;

/// Safety net for pathological games; real games take a few hundred rolls
pub const DEFAULT_MAX_ROLLS: u64 = 10_000;

/// Configuration for a batch of games between two agents
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of games to play
    pub games: usize,
    /// Agent rolling first in every game
    pub first: AgentKind,
    /// Agent rolling second in every game
    pub second: AgentKind,
    /// Games still running after this many rolls count as draws
    pub max_rolls: u64,
    /// Whether to run games in parallel
    pub parallel: bool,
    /// Base seed; game `i` uses `seed + i` (None = random)
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            games: 10_000,
            first: AgentKind::Farthest,
            second: AgentKind::Closest,
            max_rolls: DEFAULT_MAX_ROLLS,
            parallel: true,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Create config with the given number of games
    pub fn new(games: usize) -> Self {
        Self {
            games,
            ..Default::default()
        }
    }

    /// Set both agents
    pub fn with_agents(mut self, first: AgentKind, second: AgentKind) -> Self {
        self.first = first;
        self.second = second;
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the roll limit
    pub fn with_max_rolls(mut self, max_rolls: u64) -> Self {
        self.max_rolls = max_rolls;
        self
    }

    /// Run games one after another on the calling thread
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Load from JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}
