//! Move generation and the move transition
//!
//! Given a fixed roll, a move is identified entirely by its start position,
//! so legal moves are reported as an [`Options`] bitset.

use serde::{Deserialize, Serialize};

use crate::board::{
    bit, is_rosette, is_shared, Options, Position, Side, Steps, CENTRAL_ROSETTE,
    CENTRAL_ROSETTE_MASK, FINISH, MAX_STEPS, MOVABLE_MASK, SHARED_LANE_MASK, START_PILE,
};

/// What happened when a move was applied
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub start: Position,
    pub end: Position,
    /// The mover landed on a rosette and rolls again
    pub extra_turn: bool,
    /// An opponent piece was sent back to its pile
    pub captured: bool,
}

/// Start positions from which `me` may advance exactly `steps` cells
///
/// A start `p` is legal iff all of the following hold:
/// 1. `me` has a piece at `p` (bit 0 stands for a non-empty pile).
/// 2. `me` has no piece at `p + steps`.
/// 3. `p + steps` is not the central rosette while `other` sits there.
/// 4. `p + steps` does not run past the finishing pile.
pub fn legal_moves(me: &Side, other: &Side, steps: Steps) -> Options {
    if steps == 0 || steps > MAX_STEPS {
        return Options::EMPTY;
    }

    let mut options = MOVABLE_MASK;
    options &= me.occupied;
    options &= !(me.occupied >> steps);
    options &= !((other.occupied & CENTRAL_ROSETTE_MASK) >> steps);
    options &= u16::MAX >> steps;
    Options::from_bits(options)
}

/// Move the piece at `start` forward by `steps`, returning whether the mover
/// goes again
///
/// Pre: `start` is in `legal_moves(me, other, steps)`. Nothing is checked in
/// release builds.
pub fn apply_move(me: &mut Side, other: &mut Side, start: Position, steps: Steps) -> bool {
    debug_assert!(
        legal_moves(me, other, steps).contains(start),
        "illegal move from {} by {}",
        start,
        steps
    );
    let end = start + steps;

    // Pick the piece up...
    if start == START_PILE {
        me.remaining -= 1;
        if me.remaining == 0 {
            me.occupied &= !bit(START_PILE);
        }
    } else {
        me.occupied &= !bit(start);
    }
    // ...and put it down, unless it was borne off.
    if end < FINISH {
        me.occupied |= bit(end);
    }

    // Landing on the opponent in the shared lane sends them home. The
    // central rosette is already excluded by move generation.
    if is_shared(end) && other.occupied & bit(end) != 0 {
        other.occupied &= !bit(end);
        other.remaining += 1;
        other.occupied |= bit(START_PILE);
    }

    is_rosette(end)
}

/// Apply a legal move and report what it did
pub fn play_move(me: &mut Side, other: &mut Side, start: Position, steps: Steps) -> MoveOutcome {
    let end = start + steps;
    let captured = is_shared(end) && end != CENTRAL_ROSETTE && other.is_occupied(end);
    let extra_turn = apply_move(me, other, start, steps);
    MoveOutcome {
        start,
        end,
        extra_turn,
        captured,
    }
}

/// Whether no shared-lane cell is held by both sides
pub fn is_consistent(me: &Side, other: &Side) -> bool {
    me.occupied & other.occupied & SHARED_LANE_MASK == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{ROSETTES, TILES};
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;

    fn side(remaining: u16, positions: &[Position]) -> Side {
        Side::with_pieces(remaining, positions).unwrap()
    }

    /// Every side with no pile and an arbitrary board, plus a pile variant
    fn all_sides() -> impl Iterator<Item = Side> {
        (0u16..1 << 14).filter_map(|cells| {
            let occupied = cells << 1;
            if occupied.count_ones() as u16 > TILES {
                return None;
            }
            let remaining = TILES - occupied.count_ones() as u16;
            let pile = if remaining > 0 { bit(START_PILE) } else { 0 };
            Side::from_parts(remaining, occupied | pile).ok()
        })
    }

    #[test]
    fn test_opening_roll() {
        let me = Side::START;
        let other = Side::START;
        let options = legal_moves(&me, &other, 4);
        assert_eq!(options.iter().collect::<Vec<_>>(), vec![0]);

        let (mut me, mut other) = (me, other);
        assert!(apply_move(&mut me, &mut other, 0, 4));
        assert_eq!(me, side(6, &[4]));
        assert_eq!(me.occupied(), bit(0) | bit(4));
        assert_eq!(other, Side::START);
    }

    #[test]
    fn test_capture_scenario() {
        let mut me = side(0, &[5]);
        let mut other = side(0, &[9]);
        let options = legal_moves(&me, &other, 4);
        assert!(options.contains(5));

        let outcome = play_move(&mut me, &mut other, 5, 4);
        assert_eq!(
            outcome,
            MoveOutcome {
                start: 5,
                end: 9,
                extra_turn: false,
                captured: true
            }
        );
        assert_eq!(me.occupied(), bit(9));
        assert_eq!(other.remaining(), 1);
        assert_eq!(other.occupied(), bit(0));
    }

    #[test]
    fn test_zero_and_oversized_rolls() {
        assert!(legal_moves(&Side::START, &Side::START, 0).is_empty());
        assert!(legal_moves(&Side::START, &Side::START, 5).is_empty());
    }

    #[test]
    fn test_self_collision_blocked() {
        let me = side(5, &[3]);
        // 0 + 3 lands on our own piece
        assert!(!legal_moves(&me, &Side::START, 3).contains(0));
        assert!(legal_moves(&me, &Side::START, 3).contains(3));
        assert!(legal_moves(&me, &Side::START, 2).contains(0));
    }

    #[test]
    fn test_central_rosette_sanctuary() {
        let me = side(0, &[6]);
        let other = side(0, &[8]);
        assert!(!legal_moves(&me, &other, 2).contains(6));
        // Passing over it is fine
        assert!(legal_moves(&me, &other, 3).contains(6));
        // Pieces already on the rosette may still leave
        let me = side(0, &[8]);
        let other = side(0, &[9]);
        assert!(legal_moves(&me, &other, 1).contains(8));
    }

    #[test]
    fn test_bearing_off_exactly() {
        let me = side(0, &[13]);
        assert!(legal_moves(&me, &Side::START, 2).contains(13));
        assert!(!legal_moves(&me, &Side::START, 3).contains(13));

        let mut me = me;
        let mut other = Side::START;
        assert!(!apply_move(&mut me, &mut other, 13, 2));
        assert!(me.is_complete());
    }

    #[test]
    fn test_private_cells_never_capture() {
        // Both players have a piece at their own position 3
        let mut me = side(5, &[1]);
        let mut other = side(5, &[3]);
        apply_move(&mut me, &mut other, 1, 2);
        assert!(me.is_occupied(3));
        assert!(other.is_occupied(3));
        assert_eq!(other.remaining(), 5);
    }

    #[test]
    fn test_last_pile_piece_clears_flag() {
        let mut me = side(1, &[2]);
        let mut other = Side::START;
        apply_move(&mut me, &mut other, 0, 1);
        assert_eq!(me.remaining(), 0);
        assert!(!me.is_occupied(START_PILE));
        assert!(me.is_occupied(1));
    }

    #[test]
    fn test_extra_turn_iff_rosette() {
        for start in 0..FINISH {
            for steps in 1..=MAX_STEPS {
                let end = start + steps;
                if end > FINISH {
                    continue;
                }
                let mut me = if start == START_PILE {
                    Side::START
                } else {
                    side(TILES - 1, &[start])
                };
                let mut other = side(0, &[]);
                let again = apply_move(&mut me, &mut other, start, steps);
                assert_eq!(again, ROSETTES.contains(&end), "{} + {}", start, steps);
            }
        }
    }

    #[test]
    fn test_exhaustive_legality_properties() {
        let opponents = [
            Side::START,
            side(0, &[8]),
            side(2, &[5, 6, 7, 8, 9]),
            side(3, &[9, 10, 11, 12]),
        ];
        for me in all_sides() {
            for other in &opponents {
                if !is_consistent(&me, other) {
                    continue;
                }
                for steps in 1..=MAX_STEPS {
                    for start in legal_moves(&me, other, steps).iter() {
                        let end = start + steps;
                        assert!(me.is_occupied(start));
                        assert!(end <= FINISH);
                        assert!(end == FINISH || !me.is_occupied(end));
                        if other.is_occupied(CENTRAL_ROSETTE) {
                            assert_ne!(end, CENTRAL_ROSETTE);
                        }

                        let (mut a, mut b) = (me, *other);
                        apply_move(&mut a, &mut b, start, steps);
                        assert!(is_consistent(&a, &b));
                        assert_eq!(a.remaining() + a.on_path() + a.finished(), TILES);
                        assert_eq!(b.remaining() + b.on_path() + b.finished(), TILES);
                        assert_eq!(
                            a.on_path() + a.remaining() + (end == FINISH) as u16,
                            me.on_path() + me.remaining()
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_capture_increments_pile_once() {
        for end in 5..=12u8 {
            if end == CENTRAL_ROSETTE {
                continue;
            }
            let mut me = side(0, &[end - 1]);
            let mut other = side(4, &[end]);
            let outcome = play_move(&mut me, &mut other, end - 1, 1);
            assert!(outcome.captured);
            assert_eq!(other.remaining(), 5);
            assert!(!other.is_occupied(end));
            assert!(other.is_occupied(START_PILE));
        }
    }

    #[test]
    fn test_random_playouts_terminate_consistently() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            let mut sides = [Side::START, Side::START];
            let mut finished = [0u16; 2];
            let mut current = 0;
            let mut rolls = 0;
            while !sides[0].is_complete() && !sides[1].is_complete() {
                rolls += 1;
                assert!(rolls < 100_000, "playout did not terminate");
                let steps = crate::dice::roll(&mut rng);
                let [a, b] = &mut sides;
                let (me, other) = if current == 0 { (a, b) } else { (b, a) };
                let options = legal_moves(me, other, steps);
                let again = match options.iter().choose(&mut rng) {
                    Some(start) => {
                        if start + steps == FINISH {
                            finished[current] += 1;
                        }
                        apply_move(me, other, start, steps)
                    }
                    None => false,
                };
                assert!(is_consistent(&sides[0], &sides[1]));
                for (s, done) in sides.iter().zip(finished) {
                    assert_eq!(s.finished(), done);
                }
                if !again {
                    current = 1 - current;
                }
            }
        }
    }
}
