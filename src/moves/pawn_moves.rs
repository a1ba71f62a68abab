//! Pawn capture tables per color. Pushes are not attacks and live in the
//! pawn move generator.

use crate::game_state::chess_types::Color;
use crate::game_state::square::Square;
use crate::game_state::square_set::SquareSet;
use crate::moves::knight_moves::bit_if_on_board;

pub const WHITE_PAWN_ATTACKS: [SquareSet; 64] = generate_pawn_attacks(1);
pub const BLACK_PAWN_ATTACKS: [SquareSet; 64] = generate_pawn_attacks(-1);

#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> SquareSet {
    match color {
        Color::White => WHITE_PAWN_ATTACKS[square.index()],
        Color::Black => BLACK_PAWN_ATTACKS[square.index()],
    }
}

const fn generate_pawn_attacks(forward: i32) -> [SquareSet; 64] {
    let mut table = [SquareSet::EMPTY; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        table[sq] = SquareSet(
            bit_if_on_board(file - 1, rank + forward) | bit_if_on_board(file + 1, rank + forward),
        );
        sq += 1;
    }

    table
}
