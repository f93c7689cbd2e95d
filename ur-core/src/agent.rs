//! Move-selection agents
//!
//! An agent only ever sees the legal options for the current roll and picks
//! one of them. Returning `None` means it has no valid choice, which the
//! driver treats as a forfeited roll.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{Options, Position, Side, Steps};
use crate::error::UrError;

/// A strategy for picking a move from the legal options
pub trait Agent {
    fn name(&self) -> &str;

    /// Pick a start position, ideally one of `options`
    fn choose_move(
        &mut self,
        me: &Side,
        other: &Side,
        steps: Steps,
        options: Options,
    ) -> Option<Position>;
}

/// Advances the piece farthest from home
#[derive(Clone, Debug)]
pub struct FarthestAgent {
    name: String,
}

impl FarthestAgent {
    pub fn new() -> Self {
        Self::named("Farthest")
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for FarthestAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for FarthestAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, _: &Side, _: &Side, _: Steps, options: Options) -> Option<Position> {
        options.first()
    }
}

/// Advances the piece closest to home
#[derive(Clone, Debug)]
pub struct ClosestAgent {
    name: String,
}

impl ClosestAgent {
    pub fn new() -> Self {
        Self::named("Closest")
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for ClosestAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for ClosestAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, _: &Side, _: &Side, _: Steps, options: Options) -> Option<Position> {
        options.last()
    }
}

// ============================================================================
// AGENT KINDS
// ============================================================================

/// Built-in agents, selectable from configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Farthest,
    Closest,
}

impl AgentKind {
    pub const ALL: [AgentKind; 2] = [AgentKind::Farthest, AgentKind::Closest];

    /// Construct a fresh agent of this kind
    pub fn build(self) -> Box<dyn Agent + Send> {
        match self {
            AgentKind::Farthest => Box::new(FarthestAgent::new()),
            AgentKind::Closest => Box::new(ClosestAgent::new()),
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentKind::Farthest => write!(f, "farthest"),
            AgentKind::Closest => write!(f, "closest"),
        }
    }
}

impl FromStr for AgentKind {
    type Err = UrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "farthest" | "furthest" => Ok(AgentKind::Farthest),
            "closest" => Ok(AgentKind::Closest),
            other => Err(UrError::UnknownAgent(other.to_string())),
        }
    }
}
