//! Text rendering of the board
//!
//! ```text
//! ....  ..
//! ........
//! ....  ..
//! ```
//!
//! The top player's pieces are drawn as `T` and the bottom player's as `B`.
//! The two gaps in each outer row hold that player's pile count and number of
//! finished pieces.

use std::fmt;

use crate::board::{Side, FINISH, START_PILE};

const TEMPLATE: &[u8; 26] = b"....00..\n........\n....00..";

/// Offset into the rendered text of each path position
const TOP_PATH: [usize; 16] = [4, 3, 2, 1, 0, 9, 10, 11, 12, 13, 14, 15, 16, 7, 6, 5];
const BOTTOM_PATH: [usize; 16] = [22, 21, 20, 19, 18, 9, 10, 11, 12, 13, 14, 15, 16, 25, 24, 23];

/// Render both sides, `top` on the first row
///
/// An in-progress game might look like:
///
/// ```text
/// .TT.31..
/// ...T..B.
/// B...50..
/// ```
pub fn render(top: &Side, bottom: &Side) -> String {
    let mut content = *TEMPLATE;

    // Digits are counted up from '0'
    content[TOP_PATH[START_PILE as usize]] += top.remaining() as u8;
    content[BOTTOM_PATH[START_PILE as usize]] += bottom.remaining() as u8;
    content[TOP_PATH[FINISH as usize]] += top.finished() as u8;
    content[BOTTOM_PATH[FINISH as usize]] += bottom.finished() as u8;

    for pos in top.positions() {
        content[TOP_PATH[pos as usize]] = b'T';
    }
    for pos in bottom.positions() {
        content[BOTTOM_PATH[pos as usize]] = b'B';
    }

    content.iter().map(|&b| b as char).collect()
}

/// Displayable pair of sides
#[derive(Clone, Copy, Debug)]
pub struct BoardView<'a> {
    pub top: &'a Side,
    pub bottom: &'a Side,
}

impl<'a> BoardView<'a> {
    pub fn new(top: &'a Side, bottom: &'a Side) -> Self {
        Self { top, bottom }
    }
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self.top, self.bottom))
    }
}
