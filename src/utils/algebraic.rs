//! Square name conversions (`e4` and friends) for FEN and UCI components.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::square::Square;
use crate::game_state::square_set::SquareSet;

/// Convert a square name (for example: "e4") to a square.
#[inline]
pub fn algebraic_to_square(name: &str) -> ChessResult<Square> {
    let bytes = name.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidSquareName(name.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidSquareName(name.to_owned()));
    }

    Square::from_coords(file - b'a', rank - b'1')
        .ok_or_else(|| ChessError::InvalidSquareName(name.to_owned()))
}

#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    square.to_string()
}

/// Names of every member of a set, in ascending square order.
pub fn square_set_to_algebraic(set: SquareSet) -> Vec<String> {
    set.iter().map(square_to_algebraic).collect()
}
