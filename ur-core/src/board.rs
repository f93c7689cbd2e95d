//! Board representation: path positions, one player's side, and move options
//!
//! Positions are numbered along a player's own path. Position 0 is the
//! starting pile and position 15 the finishing pile; 1-4 and 13-14 are
//! private to each player, while 5-12 form the shared middle lane. A side is
//! stored as its pile count plus a 16-bit occupancy set. Bit 15 is never set
//! and bit 0 mirrors `remaining > 0`.

use serde::{Deserialize, Serialize};

use crate::error::UrError;

/// Index of a cell along a player's path, in [0, 15]
pub type Position = u8;

/// Number of cells a roll advances a piece, in [0, 4]
pub type Steps = u8;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Pieces per player
pub const TILES: u16 = 7;

/// Off-board starting pile
pub const START_PILE: Position = 0;

/// Off-board finishing pile
pub const FINISH: Position = 15;

/// Largest possible roll
pub const MAX_STEPS: Steps = 4;

/// Cells that grant an extra turn
pub const ROSETTES: [Position; 3] = [4, 8, 14];

/// The rosette in the shared lane, where pieces cannot be captured
pub const CENTRAL_ROSETTE: Position = 8;

/// First and last cells of the shared lane
pub const SHARED_LANE: (Position, Position) = (5, 12);

/// Bits 5..=12
pub const SHARED_LANE_MASK: u16 = 0x1FE0;

/// Bit 8
pub const CENTRAL_ROSETTE_MASK: u16 = 1 << CENTRAL_ROSETTE;

/// Bits 1..=14, the cells actually on the board
pub const PATH_MASK: u16 = 0x7FFE;

/// Every position a move may start from (bits 0..=14)
pub const MOVABLE_MASK: u16 = 0x7FFF;

/// Single-bit mask for a position
#[inline]
pub const fn bit(pos: Position) -> u16 {
    1 << pos
}

/// Whether landing on `pos` grants an extra turn
#[inline]
pub const fn is_rosette(pos: Position) -> bool {
    matches!(pos, 4 | 8 | 14)
}

/// Whether `pos` lies in the lane both players traverse
#[inline]
pub const fn is_shared(pos: Position) -> bool {
    pos >= SHARED_LANE.0 && pos <= SHARED_LANE.1
}

/// Parse a user-supplied start position
pub fn parse_position(input: &str) -> Result<Position, UrError> {
    let trimmed = input.trim();
    let pos: Position = trimmed
        .parse()
        .map_err(|_| UrError::InvalidPosition(format!("'{}' is not a number", trimmed)))?;
    if pos >= FINISH {
        return Err(UrError::InvalidPosition(format!(
            "{} is outside 0..={}",
            pos,
            FINISH - 1
        )));
    }
    Ok(pos)
}

// ============================================================================
// SIDE
// ============================================================================

/// One player's pieces: the starting pile and path occupancy
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SideParts")]
pub struct Side {
    pub(crate) remaining: u16,
    pub(crate) occupied: u16,
}

#[derive(Deserialize)]
struct SideParts {
    remaining: u16,
    occupied: u16,
}

impl TryFrom<SideParts> for Side {
    type Error = UrError;

    fn try_from(parts: SideParts) -> Result<Self, Self::Error> {
        Side::from_parts(parts.remaining, parts.occupied)
    }
}

impl Side {
    /// All pieces waiting in the starting pile
    pub const START: Side = Side {
        remaining: TILES,
        occupied: bit(START_PILE),
    };

    /// Every piece has been borne off
    pub const COMPLETE: Side = Side {
        remaining: 0,
        occupied: 0,
    };

    /// Build a side from its raw parts, checking the representation invariants
    pub fn from_parts(remaining: u16, occupied: u16) -> Result<Self, UrError> {
        if remaining > TILES {
            return Err(UrError::InvalidSide(format!(
                "{} pieces in the pile, at most {} allowed",
                remaining, TILES
            )));
        }
        if occupied & bit(FINISH) != 0 {
            return Err(UrError::InvalidSide(
                "position 15 cannot be occupied".to_string(),
            ));
        }
        if (occupied & bit(START_PILE) != 0) != (remaining > 0) {
            return Err(UrError::InvalidSide(format!(
                "pile flag does not match {} remaining pieces",
                remaining
            )));
        }
        let on_path = (occupied & PATH_MASK).count_ones() as u16;
        if remaining + on_path > TILES {
            return Err(UrError::InvalidSide(format!(
                "{} pieces accounted for, only {} exist",
                remaining + on_path,
                TILES
            )));
        }
        Ok(Self {
            remaining,
            occupied,
        })
    }

    /// Build a side from a pile count and the occupied board cells
    pub fn with_pieces(remaining: u16, positions: &[Position]) -> Result<Self, UrError> {
        let mut occupied = if remaining > 0 { bit(START_PILE) } else { 0 };
        for &pos in positions {
            if pos == START_PILE || pos >= FINISH {
                return Err(UrError::InvalidPosition(format!(
                    "{} is not a board cell",
                    pos
                )));
            }
            if occupied & bit(pos) != 0 {
                return Err(UrError::InvalidSide(format!(
                    "position {} listed twice",
                    pos
                )));
            }
            occupied |= bit(pos);
        }
        Self::from_parts(remaining, occupied)
    }

    /// Pieces still in the starting pile
    pub fn remaining(&self) -> u16 {
        self.remaining
    }

    /// Raw occupancy bits (bit 0 = pile non-empty)
    pub fn occupied(&self) -> u16 {
        self.occupied
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        pos < 16 && self.occupied & bit(pos) != 0
    }

    /// Pieces currently on board cells 1..=14
    pub fn on_path(&self) -> u16 {
        (self.occupied & PATH_MASK).count_ones() as u16
    }

    /// Pieces borne off at position 15
    pub fn finished(&self) -> u16 {
        TILES - self.remaining - self.on_path()
    }

    pub fn is_complete(&self) -> bool {
        *self == Side::COMPLETE
    }

    /// Board cells holding one of this side's pieces, nearest the start first
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (1..FINISH).filter(move |&pos| self.occupied & bit(pos) != 0)
    }
}

impl Default for Side {
    fn default() -> Self {
        Side::START
    }
}

// ============================================================================
// OPTIONS
// ============================================================================

/// Set of legal start positions for a fixed roll
///
/// Bit `i` is set iff the mover may advance the piece at position `i`
/// (position 0 meaning a piece entered from the pile).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Options(u16);

impl Options {
    pub const EMPTY: Options = Options(0);

    pub const fn from_bits(bits: u16) -> Self {
        Self(bits & MOVABLE_MASK)
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos < FINISH && self.0 & bit(pos) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Lowest start position (the piece farthest from home)
    pub fn first(&self) -> Option<Position> {
        if self.is_empty() {
            None
        } else {
            Some(self.0.trailing_zeros() as Position)
        }
    }

    /// Highest start position (the piece closest to home)
    pub fn last(&self) -> Option<Position> {
        if self.is_empty() {
            None
        } else {
            Some((15 - self.0.leading_zeros()) as Position)
        }
    }

    /// Start positions in ascending order
    pub fn iter(&self) -> impl Iterator<Item = Position> {
        let bits = self.0;
        (0..FINISH).filter(move |&pos| bits & bit(pos) != 0)
    }
}

impl FromIterator<Position> for Options {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        let bits = iter
            .into_iter()
            .filter(|&pos| pos < FINISH)
            .fold(0u16, |acc, pos| acc | bit(pos));
        Options(bits)
    }
}
